//! Unit tests for the Discovery client.

use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::auth::NoAuthAuthenticator;
use crate::core::base::ServiceOptions;
use crate::errors::WatsonError;

fn client() -> DiscoveryV1 {
    DiscoveryV1::with_options(
        LATEST_VERSION,
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
// Query Options Tests
// =============================================================================

mod query_options_tests {
    use super::*;

    #[test]
    fn test_body_uses_api_field_names() {
        let options = QueryOptions {
            natural_language_query: Some("storms".to_string()),
            return_fields: vec!["title".to_string(), "url".to_string()],
            sort: vec!["-publication_date".to_string()],
            passages_count: Some(3),
            similar_document_ids: vec!["d1".to_string()],
            logging_opt_out: Some(true),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "natural_language_query": "storms",
                "return": "title,url",
                "sort": "-publication_date",
                "passages.count": 3,
                "similar.document_ids": "d1"
            })
        );
    }

    #[test]
    fn test_empty_options_serialize_to_empty_object() {
        assert_eq!(
            serde_json::to_value(QueryOptions::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_builders() {
        let options = QueryOptions::query("enriched_text.entities.text:IBM")
            .filter("language:english")
            .count(10);
        assert_eq!(options.filter.as_deref(), Some("language:english"));
        assert_eq!(options.count, Some(10));
        assert!(options.natural_language_query.is_none());
    }
}

// =============================================================================
// Document Upload Tests
// =============================================================================

mod upload_tests {
    use super::*;

    #[test]
    fn test_upload_requires_a_part() {
        assert!(matches!(
            DocumentUpload::default().to_form(),
            Err(WatsonError::MissingArgument("file or metadata"))
        ));
    }

    #[test]
    fn test_upload_rejects_empty_file() {
        let upload = DocumentUpload::file("empty.json", Vec::<u8>::new(), "application/json");
        assert!(matches!(
            upload.to_form(),
            Err(WatsonError::MissingArgument("file"))
        ));
    }

    #[test]
    fn test_upload_rejects_bad_content_type() {
        let upload = DocumentUpload::file("doc.txt", b"hello".to_vec(), "not a mime type");
        assert!(matches!(
            upload.to_form(),
            Err(WatsonError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_metadata_only_upload() {
        let upload = DocumentUpload::metadata(json!({"author": "ops"}));
        assert!(upload.to_form().is_ok());
    }
}

// =============================================================================
// Argument Validation Tests
// =============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_version_required() {
        assert_missing(
            DiscoveryV1::new(" ", Arc::new(NoAuthAuthenticator)),
            "version",
        );
    }

    #[tokio::test]
    async fn test_path_ids_required() {
        let discovery = client();
        assert_missing(discovery.get_environment("").await, "environment_id");
        assert_missing(
            discovery.get_configuration("env", "").await,
            "configuration_id",
        );
        assert_missing(discovery.get_collection("env", "").await, "collection_id");
        assert_missing(
            discovery.list_expansions("", "coll").await,
            "environment_id",
        );
        assert_missing(
            discovery.get_document_status("env", "coll", "").await,
            "document_id",
        );
        assert_missing(
            discovery
                .query("env", "", &QueryOptions::default())
                .await,
            "collection_id",
        );
        assert_missing(
            discovery.get_training_data("env", "coll", "").await,
            "query_id",
        );
        assert_missing(discovery.delete_user_data("").await, "customer_id");
    }

    #[tokio::test]
    async fn test_collection_lists_required() {
        let discovery = client();
        assert_missing(
            discovery
                .federated_query::<&str>("env", &[], &QueryOptions::default())
                .await,
            "collection_ids",
        );
        assert_missing(
            discovery.list_fields::<&str>("env", &[]).await,
            "collection_ids",
        );
        assert_missing(
            discovery
                .create_expansions("env", "coll", &Expansions::default())
                .await,
            "expansions",
        );
    }

    #[tokio::test]
    async fn test_bodies_validated() {
        let discovery = client();
        assert_missing(
            discovery
                .create_environment(&CreateEnvironment::default())
                .await,
            "name",
        );
        assert_missing(
            discovery
                .add_document("env", "coll", &DocumentUpload::default())
                .await,
            "file or metadata",
        );
        assert_missing(
            discovery
                .add_training_data("env", "coll", &TrainingQuery::default())
                .await,
            "natural_language_query",
        );
    }
}

// =============================================================================
// Model Mapping Tests
// =============================================================================

mod model_tests {
    use super::*;

    #[test]
    fn test_query_response_mapping() {
        let body = json!({
            "matching_results": 24,
            "results": [{
                "id": "watson-generated-ID",
                "result_metadata": {"score": 14.7, "confidence": 0.32},
                "title": "Storm warning",
                "enriched_text": {"sentiment": {"document": {"label": "negative"}}}
            }],
            "passages": [{
                "document_id": "watson-generated-ID",
                "passage_score": 9.1,
                "passage_text": "Heavy rain expected",
                "start_offset": 10,
                "end_offset": 29,
                "field": "text"
            }],
            "aggregations": [{"type": "term", "field": "enriched_text.entities.type"}]
        });

        let response: QueryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.matching_results, 24);
        let result = &response.results[0];
        assert_eq!(result.result_metadata.confidence, Some(0.32));
        assert_eq!(result.fields["title"], "Storm warning");
        assert!(!result.fields.contains_key("id"));
        assert_eq!(response.passages[0].field.as_deref(), Some("text"));
        assert_eq!(response.aggregations.len(), 1);
    }

    #[test]
    fn test_document_status_mapping() {
        let body = json!({
            "document_id": "f1360220-ea2d-4271-9d62-89a910b13c37",
            "configuration_id": "e8b9d793-b163-452a-9373-bce07efb510b",
            "status": "available with notices",
            "status_description": "Document is successfully ingested but was indexed with warnings",
            "filename": "instructions.html",
            "file_type": "html",
            "sha1": "de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3",
            "notices": [{
                "notice_id": "index_342",
                "severity": "warning",
                "step": "indexing",
                "description": "something bad happened"
            }]
        });
        let status: DocumentStatus = serde_json::from_value(body).unwrap();
        assert!(status.is_available());
        assert_eq!(status.notices[0].severity.as_deref(), Some("warning"));
    }

    #[test]
    fn test_environment_and_fields_mapping() {
        let env: Environment = serde_json::from_value(json!({
            "environment_id": "system",
            "name": "Watson System Environment",
            "read_only": true,
            "status": "active"
        }))
        .unwrap();
        assert!(env.read_only);

        let fields: ListCollectionFieldsResponse = serde_json::from_value(json!({
            "fields": [{"field": "warnings", "type": "nested"}]
        }))
        .unwrap();
        assert_eq!(fields.fields[0].field_type, "nested");
    }
}
