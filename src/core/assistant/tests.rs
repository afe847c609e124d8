//! Unit tests for the Assistant client.

use std::sync::Arc;

use super::*;
use crate::auth::NoAuthAuthenticator;
use crate::core::base::ServiceOptions;
use crate::errors::WatsonError;

const VERSION: &str = "2021-06-14";

fn client() -> AssistantV1 {
    AssistantV1::with_options(
        VERSION,
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

    #[test]
    fn test_version_required() {
        let result = AssistantV1::new("", Arc::new(NoAuthAuthenticator));
        assert_missing(result, "version");
    }

    #[test]
    fn test_defaults() {
        let assistant = AssistantV1::new(VERSION, Arc::new(NoAuthAuthenticator)).unwrap();
        assert_eq!(assistant.version(), VERSION);
        assert_eq!(assistant.service_url(), DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_opt_out_header() {
        let mut assistant = client();
        assert!(
            assistant
                .set_default_header("X-Watson-Learning-Opt-Out", "true")
                .is_ok()
        );
        assert!(matches!(
            assistant.set_default_header("bad header", "x"),
            Err(WatsonError::InvalidArgument(_))
        ));
    }
}

// =============================================================================
// Argument Validation Tests
// =============================================================================

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_message_requires_workspace() {
        let assistant = client();
        assert_missing(
            assistant
                .message("", &MessageRequest::text("hi"), None)
                .await,
            "workspace_id",
        );
    }

    #[tokio::test]
    async fn test_create_bodies_require_names() {
        let assistant = client();
        assert_missing(
            assistant.create_intent("ws", &CreateIntent::default()).await,
            "intent",
        );
        assert_missing(
            assistant
                .create_example("ws", "greeting", &Example::new(""))
                .await,
            "text",
        );
        assert_missing(assistant.create_counterexample("ws", " ").await, "text");
        assert_missing(
            assistant.create_entity("ws", &CreateEntity::default()).await,
            "entity",
        );
        assert_missing(
            assistant
                .create_value("ws", "beverage", &CreateValue::default())
                .await,
            "value",
        );
        assert_missing(
            assistant.create_synonym("ws", "beverage", "soda", "").await,
            "synonym",
        );
        assert_missing(
            assistant
                .create_dialog_node("ws", &DialogNode::default())
                .await,
            "dialog_node",
        );
    }

    #[tokio::test]
    async fn test_path_ids_required() {
        let assistant = client();
        assert_missing(
            assistant.get_workspace("", None, None, None).await,
            "workspace_id",
        );
        assert_missing(assistant.delete_workspace("").await, "workspace_id");
        assert_missing(
            assistant.list_intents("", &ListOptions::default()).await,
            "workspace_id",
        );
        assert_missing(
            assistant.get_intent("ws", "", None, None).await,
            "intent",
        );
        assert_missing(
            assistant.delete_example("ws", "greeting", "").await,
            "text",
        );
        assert_missing(
            assistant.list_mentions("ws", "", None, None).await,
            "entity",
        );
        assert_missing(
            assistant.delete_value("ws", "beverage", "").await,
            "value",
        );
        assert_missing(
            assistant
                .get_synonym("ws", "beverage", "soda", "", None)
                .await,
            "synonym",
        );
        assert_missing(
            assistant
                .update_dialog_node("ws", "", &UpdateDialogNode::default())
                .await,
            "dialog_node",
        );
        assert_missing(
            assistant.list_logs("", &LogOptions::default()).await,
            "workspace_id",
        );
        assert_missing(assistant.delete_user_data("").await, "customer_id");
    }

    #[tokio::test]
    async fn test_list_all_logs_requires_filter() {
        let assistant = client();
        // A filter in the options does not replace the mandatory argument.
        let options = LogOptions {
            filter: Some("workspace_id::abc".to_string()),
            ..Default::default()
        };
        assert_missing(assistant.list_all_logs("", &options).await, "filter");
    }
}

// =============================================================================
// Model Mapping Tests
// =============================================================================

mod model_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_response_mapping() {
        let body = json!({
            "input": {"text": "turn on the lights"},
            "intents": [
                {"intent": "turn_off", "confidence": 0.12},
                {"intent": "turn_on", "confidence": 0.93}
            ],
            "entities": [
                {"entity": "appliance", "location": [12, 18], "value": "light", "confidence": 1}
            ],
            "context": {
                "conversation_id": "1b7b67c0-90ed-45dc-8508-9488bc483d5b",
                "system": {"dialog_turn_counter": 1}
            },
            "output": {
                "text": ["Ok, turning on the lights."],
                "nodes_visited": ["node_1_1467221909631"],
                "log_messages": []
            }
        });

        let response: MessageResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.top_intent().unwrap().intent, "turn_on");
        assert_eq!(response.entities[0].location, vec![12, 18]);
        assert_eq!(
            response.conversation_id(),
            Some("1b7b67c0-90ed-45dc-8508-9488bc483d5b")
        );
        assert_eq!(response.output.text, vec!["Ok, turning on the lights."]);
    }

    #[test]
    fn test_message_request_serialization() {
        let request = MessageRequest::text("hello").with_context(json!({"conversation_id": "c1"}));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"input": {"text": "hello"}, "context": {"conversation_id": "c1"}})
        );
    }

    #[test]
    fn test_update_bodies_use_plain_field_names() {
        let update = UpdateValue {
            new_value: Some("cola".to_string()),
            new_type: Some(ValueType::Patterns),
            new_patterns: Some(vec!["\\bcola\\b".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"value": "cola", "type": "patterns", "patterns": ["\\bcola\\b"]})
        );

        let update = UpdateIntent {
            new_examples: Some(vec![Example::new("hi there")]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"examples": [{"text": "hi there"}]})
        );
    }

    #[test]
    fn test_exported_workspace_mapping() {
        let body = json!({
            "name": "Car Dashboard",
            "language": "en",
            "workspace_id": "9978a49e-ea89-4493-b33d-82298d3db20d",
            "learning_opt_out": false,
            "status": "Available",
            "intents": [{"intent": "hello", "examples": [{"text": "hi"}]}],
            "entities": [{"entity": "beverage", "values": [{"value": "water", "type": "synonyms", "synonyms": ["h2o"]}]}],
            "dialog_nodes": [{"dialog_node": "root", "type": "standard", "conditions": "#hello"}],
            "counterexamples": [],
            "pagination": {"refresh_url": "/v1/workspaces"}
        });
        let workspace: Workspace = serde_json::from_value(body).unwrap();
        assert_eq!(workspace.intents[0].examples[0].text, "hi");
        assert_eq!(workspace.entities[0].values[0].value_type, ValueType::Synonyms);
        assert_eq!(workspace.dialog_nodes[0].node_type.as_deref(), Some("standard"));
    }

    #[test]
    fn test_log_collection_mapping() {
        let body = json!({
            "logs": [{
                "log_id": "l1",
                "request": {"input": {"text": "hi"}},
                "response": {"output": {"text": ["Hello"]}, "context": {}},
                "request_timestamp": "2024-03-01T10:00:00.000Z",
                "response_timestamp": "2024-03-01T10:00:00.120Z",
                "workspace_id": "ws"
            }],
            "pagination": {"next_cursor": "abc"}
        });
        let logs: LogCollection = serde_json::from_value(body).unwrap();
        assert_eq!(logs.logs[0].response.output.text, vec!["Hello"]);
        assert_eq!(logs.pagination.next_cursor.as_deref(), Some("abc"));
    }
}
