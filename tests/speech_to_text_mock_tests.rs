//! Speech to Text client against a mock service.

mod fixtures;

use serde_json::json;
use wiremock::matchers::{
    any, body_bytes, body_json, body_string_contains, header, header_regex, method, path,
    query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixtures::audio::a440_wav;
use fixtures::{TRANSACTION_ID, error_body, mock_options};
use watson_sdk::core::speech_to_text::{
    CustomWord, IbmAudioEncoding, IbmModel, JobEvent, JobOptions, RecognizeOptions,
    SpeechToTextV1,
};
use watson_sdk::errors::WatsonError;

async fn setup() -> (MockServer, SpeechToTextV1) {
    let server = MockServer::start().await;
    let stt = SpeechToTextV1::with_options(mock_options(&server)).unwrap();
    (server, stt)
}

// =============================================================================
// Recognition
// =============================================================================

#[tokio::test]
async fn test_recognize_sends_audio_and_options() {
    let (server, stt) = setup().await;
    let audio = a440_wav();

    Mock::given(method("POST"))
        .and(path("/v1/recognize"))
        .and(header("content-type", "audio/wav"))
        .and(header("accept", "application/json"))
        .and(header(
            "x-ibmcloud-sdk-analytics",
            "service_name=speech_to_text;service_version=V1;operation_id=recognize",
        ))
        .and(header_regex("user-agent", "^watson-sdk-rust/"))
        .and(query_param("model", "en-US_Telephony"))
        .and(query_param("keywords", "colorado,tornado"))
        .and(query_param("keywords_threshold", "0.5"))
        .and(query_param("smart_formatting", "true"))
        .and(query_param_is_missing("version"))
        .and(body_bytes(audio.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result_index": 0,
            "results": [{
                "final": true,
                "alternatives": [{"transcript": "a tornado in colorado ", "confidence": 0.91}],
                "keywords_result": {
                    "tornado": [{"normalized_text": "tornado", "start_time": 0.2, "end_time": 0.7, "confidence": 0.9}]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = RecognizeOptions {
        keywords: vec!["colorado".to_string(), "tornado".to_string()],
        keywords_threshold: Some(0.5),
        smart_formatting: Some(true),
        ..RecognizeOptions::for_model(IbmModel::EnUsTelephony)
    };
    let results = stt
        .recognize(audio, IbmAudioEncoding::Wav.content_type(16000).as_str(), &options)
        .await
        .unwrap();

    assert_eq!(results.transcript(), "a tornado in colorado");
    assert!(results.results[0].keywords_result.is_some());
}

#[tokio::test]
async fn test_recognize_without_audio_sends_nothing() {
    let (server, stt) = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = stt
        .recognize(Vec::<u8>::new(), "audio/wav", &RecognizeOptions::default())
        .await;
    assert!(matches!(result, Err(WatsonError::MissingArgument("audio"))));
}

#[tokio::test]
async fn test_service_error_carries_transaction_id() {
    let (server, stt) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/models/xx-XX_Unknown"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("X-Global-Transaction-Id", TRANSACTION_ID)
                .set_body_json(error_body(404, "Model xx-XX_Unknown not found")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = stt.get_model("xx-XX_Unknown").await.unwrap_err();
    assert!(err.is_not_found());
    let service_error = err.as_service_error().unwrap();
    assert_eq!(service_error.message, "Model xx-XX_Unknown not found");
    assert_eq!(service_error.code, Some(404));
    assert_eq!(service_error.transaction_id.as_deref(), Some(TRANSACTION_ID));
}

#[tokio::test]
async fn test_unparseable_success_body_is_deserialization_error() {
    let (server, stt) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    assert!(matches!(
        stt.list_models().await,
        Err(WatsonError::Deserialization(_))
    ));
}

// =============================================================================
// Asynchronous jobs
// =============================================================================

#[tokio::test]
async fn test_create_job_with_callback() {
    let (server, stt) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/recognitions"))
        .and(query_param("callback_url", "https://example.com/results"))
        .and(query_param(
            "events",
            "recognitions.started,recognitions.completed_with_results",
        ))
        .and(query_param("user_token", "job-42"))
        .and(query_param("results_ttl", "60"))
        .and(header("content-type", "audio/flac"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "4bd734c0-e575-21f3-de03-f932aa0468a0",
            "status": "waiting",
            "created": "2016-08-17T19:15:17.926Z",
            "url": "https://example.com/v1/recognitions/4bd734c0-e575-21f3-de03-f932aa0468a0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let job = JobOptions {
        callback_url: Some("https://example.com/results".to_string()),
        events: vec![JobEvent::Started, JobEvent::CompletedWithResults],
        user_token: Some("job-42".to_string()),
        results_ttl: Some(60),
    };
    let created = stt
        .create_job(vec![1u8; 64], "audio/flac", &RecognizeOptions::default(), &job)
        .await
        .unwrap();
    assert_eq!(created.status, "waiting");
    assert!(!created.is_finished());
}

#[tokio::test]
async fn test_register_callback() {
    let (server, stt) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/register_callback"))
        .and(query_param("callback_url", "https://example.com/results"))
        .and(query_param("user_secret", "s3cr3t"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "created",
            "url": "https://example.com/results"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = stt
        .register_callback("https://example.com/results", Some("s3cr3t"))
        .await
        .unwrap();
    assert_eq!(status.status, "created");
}

#[tokio::test]
async fn test_registered_callback_url_matches_job_callback_url() {
    let (server, stt) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/register_callback"))
        .and(query_param("callback_url", "https://Example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "already created",
            "url": "https://Example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/recognitions"))
        .and(query_param("callback_url", "https://Example.com"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "job-1",
            "status": "waiting"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/unregister_callback"))
        .and(query_param("callback_url", "https://Example.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    stt.register_callback(" https://Example.com ", None)
        .await
        .unwrap();

    let job = JobOptions {
        callback_url: Some("https://Example.com".to_string()),
        ..Default::default()
    };
    stt.create_job(vec![1u8; 64], "audio/flac", &RecognizeOptions::default(), &job)
        .await
        .unwrap();

    stt.unregister_callback("https://Example.com").await.unwrap();
}

// =============================================================================
// Customization
// =============================================================================

#[tokio::test]
async fn test_word_names_are_percent_encoded() {
    let (server, stt) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/customizations/cust-1/words/AC%2FDC%20live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "word": "AC/DC live",
            "sounds_like": ["A. C. D. C. live"],
            "display_as": "AC/DC live",
            "count": 1,
            "source": ["user"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let word = stt.get_word("cust-1", "AC/DC live").await.unwrap();
    assert_eq!(word.source, vec!["user"]);
}

#[tokio::test]
async fn test_add_words_body() {
    let (server, stt) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/customizations/cust-1/words"))
        .and(body_json(json!({
            "words": [
                {"word": "HHonors", "sounds_like": ["hilton honors", "h honors"], "display_as": "HHonors"},
                {"word": "IEEE", "sounds_like": ["I. triple E."]}
            ]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let words = [
        CustomWord {
            word: Some("HHonors".to_string()),
            sounds_like: vec!["hilton honors".to_string(), "h honors".to_string()],
            display_as: Some("HHonors".to_string()),
            ..Default::default()
        },
        CustomWord {
            word: Some("IEEE".to_string()),
            sounds_like: vec!["I. triple E.".to_string()],
            ..Default::default()
        },
    ];
    stt.add_words("cust-1", &words).await.unwrap();
}

#[tokio::test]
async fn test_add_corpus_is_multipart() {
    let (server, stt) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/customizations/cust-1/corpora/faq"))
        .and(query_param("allow_overwrite", "true"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"corpus_file\""))
        .and(body_string_contains("How do I reset my router"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    stt.add_corpus(
        "cust-1",
        "faq",
        b"How do I reset my router?\n".to_vec(),
        Some(true),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_add_archive_audio_sets_contained_content_type() {
    let (server, stt) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/acoustic_customizations/ac-1/audio/batch1"))
        .and(header("content-type", "application/zip"))
        .and(header("contained-content-type", "audio/l16;rate=16000"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    stt.add_audio(
        "ac-1",
        "batch1",
        vec![0x50u8, 0x4b, 0x03, 0x04],
        "application/zip",
        Some("audio/l16;rate=16000"),
        None,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_train_language_model_query() {
    let (server, stt) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/customizations/cust-1/train"))
        .and(query_param("word_type_to_add", "user"))
        .and(query_param("customization_weight", "0.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    stt.train_language_model("cust-1", Some("user"), Some(0.4))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_user_data() {
    let (server, stt) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/user_data"))
        .and(query_param("customer_id", "customer-7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    stt.delete_user_data("customer-7").await.unwrap();
}
