//! Text to Speech client against a mock service.

mod fixtures;

use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixtures::audio::a440_wav;
use fixtures::{error_body, mock_options};
use watson_sdk::core::text_to_speech::{
    CreateCustomModel, IbmOutputFormat, IbmVoice, PhonemeFormat, SynthesizeOptions,
    TextToSpeechV1, Translation, Word,
};
use watson_sdk::errors::WatsonError;

async fn setup() -> (MockServer, TextToSpeechV1) {
    let server = MockServer::start().await;
    let tts = TextToSpeechV1::with_options(mock_options(&server)).unwrap();
    (server, tts)
}

// =============================================================================
// Synthesis
// =============================================================================

#[tokio::test]
async fn test_synthesize_returns_audio_bytes() {
    let (server, tts) = setup().await;
    let audio = a440_wav();

    Mock::given(method("POST"))
        .and(path("/v1/synthesize"))
        .and(query_param("voice", "en-US_AllisonV3Voice"))
        .and(header("accept", "audio/wav"))
        .and(header("content-type", "application/json"))
        .and(header(
            "x-ibmcloud-sdk-analytics",
            "service_name=text_to_speech;service_version=V1;operation_id=synthesize",
        ))
        .and(body_json(json!({"text": "Hello world"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/wav")
                .set_body_bytes(audio.clone()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = SynthesizeOptions::new("Hello world")
        .voice(IbmVoice::EnUsAllisonV3Voice)
        .format(IbmOutputFormat::Wav);
    let bytes = tts.synthesize(&options).await.unwrap();

    assert_eq!(bytes.as_ref(), audio.as_slice());
}

#[tokio::test]
async fn test_synthesize_raw_pcm_with_prosody() {
    let (server, tts) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/synthesize"))
        .and(query_param("voice", "en-US_MichaelV3Voice"))
        .and(query_param("customization_id", "cust-9"))
        .and(header("accept", "audio/l16;rate=16000"))
        .and(body_json(json!({
            "text": "<speak version=\"1.0\"><prosody rate=\"-20%\" pitch=\"+10%\">Q&amp;A</prosody></speak>"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 320]))
        .expect(1)
        .mount(&server)
        .await;

    let options = SynthesizeOptions::new("Q&A")
        .format(IbmOutputFormat::L16)
        .sample_rate(16000)
        .customization_id("cust-9")
        .rate_percentage(-20)
        .pitch_percentage(10);
    let bytes = tts.synthesize(&options).await.unwrap();

    assert_eq!(bytes.len(), 320);
}

#[tokio::test]
async fn test_synthesize_rejects_oversized_text_locally() {
    let (server, tts) = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let options = SynthesizeOptions::new("a".repeat(6000));
    assert!(matches!(
        tts.synthesize(&options).await,
        Err(WatsonError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_unknown_voice_maps_to_service_error() {
    let (server, tts) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/synthesize"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
            400,
            "Model xx-XX_NobodyVoice not found",
        )))
        .mount(&server)
        .await;

    let options = SynthesizeOptions::new("hi").voice(IbmVoice::from_name("xx-XX_NobodyVoice"));
    let err = tts.synthesize(&options).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.as_service_error().unwrap().message,
        "Model xx-XX_NobodyVoice not found"
    );
}

// =============================================================================
// Voices and pronunciation
// =============================================================================

#[tokio::test]
async fn test_list_voices() {
    let (server, tts) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/voices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "voices": [{
                "url": "https://example.com/v1/voices/en-US_AllisonV3Voice",
                "name": "en-US_AllisonV3Voice",
                "language": "en-US",
                "gender": "female",
                "description": "Allison: American English female voice.",
                "customizable": true,
                "supported_features": {"custom_pronunciation": true, "voice_transformation": false}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let voices = tts.list_voices().await.unwrap();
    assert_eq!(voices.voices.len(), 1);
    assert!(voices.voices[0].supported_features.custom_pronunciation);
}

#[tokio::test]
async fn test_get_pronunciation_query() {
    let (server, tts) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/pronunciation"))
        .and(query_param("text", "IEEE"))
        .and(query_param("voice", "en-US_AllisonV3Voice"))
        .and(query_param("format", "ibm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pronunciation": ".1Y .0tr1Ip.0L .1i"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pronunciation = tts
        .get_pronunciation(
            "IEEE",
            Some(&IbmVoice::EnUsAllisonV3Voice),
            Some(PhonemeFormat::Ibm),
            None,
        )
        .await
        .unwrap();
    assert_eq!(pronunciation.pronunciation, ".1Y .0tr1Ip.0L .1i");
}

// =============================================================================
// Custom models
// =============================================================================

#[tokio::test]
async fn test_create_custom_model() {
    let (server, tts) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/customizations"))
        .and(body_json(json!({"name": "support", "language": "en-US"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "customization_id": "64f4807f-a5f1-5867-924f-7bba1a84fe97"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = tts
        .create_custom_model(&CreateCustomModel {
            name: "support".to_string(),
            language: Some("en-US".to_string()),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(model.customization_id, "64f4807f-a5f1-5867-924f-7bba1a84fe97");
}

#[tokio::test]
async fn test_add_word_is_put_with_translation() {
    let (server, tts) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/v1/customizations/cust-9/words/IEEE"))
        .and(body_json(json!({"translation": "I triple E"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let translation = Translation {
        translation: "I triple E".to_string(),
        part_of_speech: None,
    };
    tts.add_word("cust-9", "IEEE", &translation).await.unwrap();
}

#[tokio::test]
async fn test_add_words_body() {
    let (server, tts) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/customizations/cust-9/words"))
        .and(body_json(json!({
            "words": [
                {"word": "NCAA", "translation": "N C double A"},
                {"word": "iPhone", "translation": "I phone"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let words = [Word::new("NCAA", "N C double A"), Word::new("iPhone", "I phone")];
    tts.add_words("cust-9", &words).await.unwrap();
}

#[tokio::test]
async fn test_deleted_model_is_not_found() {
    let (server, tts) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/customizations/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(error_body(404, "Customization not found")),
        )
        .mount(&server)
        .await;

    let err = tts.get_custom_model("gone").await.unwrap_err();
    assert!(err.is_not_found());
}
