//! Unit tests for the Speech to Text client.
//!
//! Argument checks are exercised against an unroutable URL: they must fail
//! before any request is attempted.

use std::sync::Arc;

use bytes::Bytes;

use super::*;
use crate::auth::NoAuthAuthenticator;
use crate::core::base::ServiceOptions;
use crate::errors::WatsonError;

fn client() -> SpeechToTextV1 {
    SpeechToTextV1::with_options(
        ServiceOptions::new(Arc::new(NoAuthAuthenticator)).with_service_url("http://127.0.0.1:9"),
    )
    .unwrap()
}

fn assert_missing<T: std::fmt::Debug>(result: Result<T, WatsonError>, name: &str) {
    match result {
        Err(WatsonError::MissingArgument(arg)) => assert_eq!(arg, name),
        other => panic!("expected MissingArgument({name}), got {other:?}"),
    }
}

// =============================================================================
// Construction Tests
// =============================================================================

mod construction_tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::core::base::IbmRegion;
    use zeroize::Zeroizing;

    #[test]
    fn test_default_url() {
        let stt = SpeechToTextV1::new(Arc::new(NoAuthAuthenticator)).unwrap();
        assert_eq!(stt.service_url(), DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_from_config_with_region() {
        let config = ServiceConfig {
            apikey: Some(Zeroizing::new("key".to_string())),
            region: Some(IbmRegion::EuDe),
            ..Default::default()
        };
        let stt = SpeechToTextV1::from_config(&config).unwrap();
        assert_eq!(
            stt.service_url(),
            "https://api.eu-de.speech-to-text.watson.cloud.ibm.com"
        );
    }

    #[test]
    fn test_set_service_url() {
        let mut stt = client();
        stt.set_service_url("https://private.example.com/instances/123/")
            .unwrap();
        assert_eq!(stt.service_url(), "https://private.example.com/instances/123");
    }
}

// =============================================================================
// Argument Validation Tests
// =============================================================================

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_recognize_requires_audio() {
        let stt = client();
        assert_missing(
            stt.recognize(Vec::<u8>::new(), "audio/wav", &RecognizeOptions::default())
                .await,
            "audio",
        );
    }

    #[tokio::test]
    async fn test_recognize_validates_options() {
        let stt = client();
        let options = RecognizeOptions {
            keywords: vec!["watson".to_string()],
            ..Default::default()
        };
        let result = stt.recognize(vec![1u8, 2, 3], "audio/wav", &options).await;
        assert!(matches!(result, Err(WatsonError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_create_job_requires_audio_and_valid_callback() {
        let stt = client();
        assert_missing(
            stt.create_job(
                Bytes::new(),
                "audio/wav",
                &RecognizeOptions::default(),
                &JobOptions::default(),
            )
            .await,
            "audio",
        );

        let job = JobOptions {
            callback_url: Some("relative/callback".to_string()),
            ..Default::default()
        };
        let result = stt
            .create_job(vec![0u8; 4], "audio/wav", &RecognizeOptions::default(), &job)
            .await;
        assert!(matches!(result, Err(WatsonError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_register_callback_validation() {
        let stt = client();
        assert_missing(stt.register_callback("", None).await, "callback_url");
        assert!(matches!(
            stt.register_callback("ftp://example.com", None).await,
            Err(WatsonError::InvalidArgument(_))
        ));
        assert_missing(stt.unregister_callback(" ").await, "callback_url");
    }

    #[tokio::test]
    async fn test_path_ids_required() {
        let stt = client();
        assert_missing(stt.get_model("").await, "model_id");
        assert_missing(stt.check_job("").await, "id");
        assert_missing(stt.delete_job("").await, "id");
        assert_missing(stt.get_language_model("").await, "customization_id");
        assert_missing(
            stt.train_language_model("", None, None).await,
            "customization_id",
        );
        assert_missing(stt.get_corpus("cust", "").await, "corpus_name");
        assert_missing(stt.get_word("cust", "").await, "word_name");
        assert_missing(stt.get_grammar("cust", "").await, "grammar_name");
        assert_missing(stt.get_acoustic_model("").await, "customization_id");
        assert_missing(stt.get_audio("cust", "").await, "audio_name");
        assert_missing(stt.delete_user_data("").await, "customer_id");
    }

    #[tokio::test]
    async fn test_create_models_require_names() {
        let stt = client();
        assert_missing(
            stt.create_language_model(&CreateLanguageModel {
                base_model_name: "en-US_Multimedia".to_string(),
                ..Default::default()
            })
            .await,
            "name",
        );
        assert_missing(
            stt.create_acoustic_model(&CreateAcousticModel {
                name: "acoustic".to_string(),
                ..Default::default()
            })
            .await,
            "base_model_name",
        );
    }

    #[tokio::test]
    async fn test_uploads_require_content() {
        let stt = client();
        assert_missing(
            stt.add_corpus("cust", "corpus1", Vec::<u8>::new(), None).await,
            "corpus_file",
        );
        assert_missing(
            stt.add_grammar("cust", "g1", Vec::<u8>::new(), "application/srgs", None)
                .await,
            "grammar_file",
        );
        assert_missing(
            stt.add_audio("cust", "audio1", Vec::<u8>::new(), "audio/wav", None, None)
                .await,
            "audio_resource",
        );
        assert_missing(stt.add_words("cust", &[]).await, "words");
        assert_missing(
            stt.add_words("cust", &[CustomWord::default()]).await,
            "word",
        );
    }
}

// =============================================================================
// Model Mapping Tests
// =============================================================================

mod model_tests {
    use super::*;

    #[test]
    fn test_recognition_results_mapping() {
        let json = r#"{
            "result_index": 0,
            "results": [
                {
                    "final": true,
                    "alternatives": [
                        {
                            "transcript": "several tornadoes touch down ",
                            "confidence": 0.96,
                            "timestamps": [["several", 1.0, 1.51], ["tornadoes", 1.51, 2.15]],
                            "word_confidence": [["several", 1.0]]
                        }
                    ],
                    "keywords_result": {
                        "tornadoes": [
                            {"normalized_text": "tornadoes", "start_time": 1.51, "end_time": 2.15, "confidence": 0.95}
                        ]
                    }
                },
                {
                    "final": false,
                    "alternatives": [{"transcript": "as a line"}]
                }
            ],
            "speaker_labels": [
                {"from": 1.0, "to": 1.51, "speaker": 0, "confidence": 0.55, "final": true}
            ]
        }"#;

        let results: SpeechRecognitionResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.results.len(), 2);
        assert!(results.results[0].is_final);

        let alternative = &results.results[0].alternatives[0];
        assert_eq!(alternative.confidence, Some(0.96));
        assert_eq!(
            alternative.timestamps.as_ref().unwrap()[1],
            ("tornadoes".to_string(), 1.51, 2.15)
        );
        let keywords = results.results[0].keywords_result.as_ref().unwrap();
        assert_eq!(keywords["tornadoes"][0].confidence, 0.95);
        assert_eq!(results.speaker_labels[0].speaker, 0);

        // Interim results are excluded from the transcript.
        assert_eq!(results.transcript(), "several tornadoes touch down");
    }

    #[test]
    fn test_recognition_job_mapping() {
        let json = r#"{
            "id": "4bd734c0-e575-21f3-de03-f932aa0468a0",
            "status": "completed",
            "created": "2016-08-17T19:15:17.926Z",
            "updated": "2016-08-17T19:15:19.104Z",
            "results": [{"results": [], "result_index": 0}]
        }"#;
        let job: RecognitionJob = serde_json::from_str(json).unwrap();
        assert!(job.is_finished());
        assert_eq!(job.results.len(), 1);
        assert!(job.user_token.is_none());
    }

    #[test]
    fn test_audio_listing_archive() {
        let json = r#"{
            "container": {
                "duration": 150,
                "name": "audio2",
                "details": {"type": "archive", "compression": "zip"},
                "status": "ok"
            },
            "audio": [
                {"duration": 75, "name": "audio-file1.wav", "details": {"type": "audio", "codec": "pcm_s16le", "frequency": 22050}, "status": "ok"}
            ]
        }"#;
        let listing: AudioListing = serde_json::from_str(json).unwrap();
        let container = listing.container.unwrap();
        assert_eq!(container.details.kind.as_deref(), Some("archive"));
        assert_eq!(listing.audio[0].details.frequency, Some(22050));
        assert!(listing.name.is_none());
    }

    #[test]
    fn test_custom_word_serialization_skips_unset_fields() {
        let word = CustomWord {
            sounds_like: vec!["I triple E".to_string()],
            display_as: Some("IEEE".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&word).unwrap();
        assert!(json.get("word").is_none());
        assert_eq!(json["display_as"], "IEEE");
    }
}
