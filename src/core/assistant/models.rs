//! Assistant V1 request and response models.
//!
//! Workspace content is modelled field by field. Free-form JSON the service
//! passes through untouched (dialog `output`, `context`, `metadata`, ...) is
//! kept as [`serde_json::Value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Message
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_suggestions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_auto_correct: Option<bool>,
    /// Set by the service when spelling correction changed the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl MessageInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<MessageInput>,
    /// Intents to use instead of classifying the input.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intents: Vec<RuntimeIntent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<RuntimeEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_intents: Option<bool>,
    /// Conversation state returned by the previous turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

impl MessageRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            input: Some(MessageInput::text(text)),
            ..Default::default()
        }
    }

    /// Continue a conversation with the context of the previous response.
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub input: MessageInput,
    #[serde(default)]
    pub intents: Vec<RuntimeIntent>,
    #[serde(default)]
    pub entities: Vec<RuntimeEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_intents: Option<bool>,
    #[serde(default)]
    pub context: Value,
    #[serde(default)]
    pub output: OutputData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Value>,
}

impl MessageResponse {
    /// Highest-confidence intent, if any was recognised.
    pub fn top_intent(&self) -> Option<&RuntimeIntent> {
        self.intents
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    /// Conversation ID carried in the context.
    pub fn conversation_id(&self) -> Option<&str> {
        self.context.get("conversation_id")?.as_str()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputData {
    #[serde(default)]
    pub text: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes_visited: Vec<String>,
    /// Filled in when `nodes_visited_details` is requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes_visited_details: Vec<DialogNodeVisitedDetails>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log_messages: Vec<LogMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DialogNodeVisitedDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LogMessage {
    pub level: String,
    pub msg: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuntimeIntent {
    pub intent: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuntimeEntity {
    pub entity: String,
    /// Character offsets `[start, end)` in the input text.
    pub location: Vec<i64>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Value>>,
}

// =============================================================================
// Pagination
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    pub refresh_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

// =============================================================================
// Workspaces
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    pub name: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub learning_opt_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    // Only populated with `export=true`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intents: Vec<Intent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dialog_nodes: Vec<DialogNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub counterexamples: Vec<Counterexample>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhooks: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceCollection {
    pub workspaces: Vec<Workspace>,
    pub pagination: Pagination,
}

/// Body for `create_workspace`. Every field is optional; a workspace created
/// without content can be filled in later.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateWorkspace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_opt_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intents: Vec<CreateIntent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<CreateEntity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dialog_nodes: Vec<DialogNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub counterexamples: Vec<Counterexample>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhooks: Vec<Value>,
}

/// Body for `update_workspace`. Lists replace the existing content unless
/// `append` is set on the call.
pub type UpdateWorkspace = CreateWorkspace;

// =============================================================================
// Intents and examples
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Intent {
    pub intent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntentCollection {
    pub intents: Vec<Intent>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateIntent {
    pub intent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateIntent {
    #[serde(rename = "intent", skip_serializing_if = "Option::is_none")]
    pub new_intent: Option<String>,
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub new_description: Option<String>,
    #[serde(rename = "examples", skip_serializing_if = "Option::is_none")]
    pub new_examples: Option<Vec<Example>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Example {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<Mention>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl Example {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExampleCollection {
    pub examples: Vec<Example>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateExample {
    #[serde(rename = "text", skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,
    #[serde(rename = "mentions", skip_serializing_if = "Option::is_none")]
    pub new_mentions: Option<Vec<Mention>>,
}

/// An entity annotated inside an example.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Mention {
    pub entity: String,
    pub location: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Counterexample {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CounterexampleCollection {
    pub counterexamples: Vec<Counterexample>,
    pub pagination: Pagination,
}

// =============================================================================
// Entities, values and synonyms
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<EntityValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityCollection {
    pub entities: Vec<Entity>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateEntity {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_match: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<CreateValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateEntity {
    #[serde(rename = "entity", skip_serializing_if = "Option::is_none")]
    pub new_entity: Option<String>,
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub new_description: Option<String>,
    #[serde(rename = "metadata", skip_serializing_if = "Option::is_none")]
    pub new_metadata: Option<Value>,
    #[serde(rename = "fuzzy_match", skip_serializing_if = "Option::is_none")]
    pub new_fuzzy_match: Option<bool>,
    #[serde(rename = "values", skip_serializing_if = "Option::is_none")]
    pub new_values: Option<Vec<CreateValue>>,
}

/// An example of an entity appearing in a user input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityMention {
    pub text: String,
    pub intent: String,
    pub location: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityMentionCollection {
    pub examples: Vec<EntityMention>,
    pub pagination: Pagination,
}

/// Whether a value is matched by synonyms or by regular expressions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Synonyms,
    Patterns,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityValue {
    pub value: String,
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValueCollection {
    pub values: Vec<EntityValue>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateValue {
    pub value: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateValue {
    #[serde(rename = "value", skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub new_type: Option<ValueType>,
    #[serde(rename = "metadata", skip_serializing_if = "Option::is_none")]
    pub new_metadata: Option<Value>,
    #[serde(rename = "synonyms", skip_serializing_if = "Option::is_none")]
    pub new_synonyms: Option<Vec<String>>,
    #[serde(rename = "patterns", skip_serializing_if = "Option::is_none")]
    pub new_patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Synonym {
    pub synonym: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SynonymCollection {
    pub synonyms: Vec<Synonym>,
    pub pagination: Pagination,
}

// =============================================================================
// Dialog nodes
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DialogNode {
    pub dialog_node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_sibling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `standard`, `event_handler`, `frame`, `slot` or `response_condition`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digress_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digress_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digress_out_slots: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disambiguation_opt_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl DialogNode {
    pub fn new(dialog_node: impl Into<String>) -> Self {
        Self {
            dialog_node: dialog_node.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DialogNodeCollection {
    pub dialog_nodes: Vec<DialogNode>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateDialogNode {
    #[serde(rename = "dialog_node", skip_serializing_if = "Option::is_none")]
    pub new_dialog_node: Option<String>,
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    pub new_description: Option<String>,
    #[serde(rename = "conditions", skip_serializing_if = "Option::is_none")]
    pub new_conditions: Option<String>,
    #[serde(rename = "parent", skip_serializing_if = "Option::is_none")]
    pub new_parent: Option<String>,
    #[serde(rename = "previous_sibling", skip_serializing_if = "Option::is_none")]
    pub new_previous_sibling: Option<String>,
    #[serde(rename = "output", skip_serializing_if = "Option::is_none")]
    pub new_output: Option<Value>,
    #[serde(rename = "context", skip_serializing_if = "Option::is_none")]
    pub new_context: Option<Value>,
    #[serde(rename = "metadata", skip_serializing_if = "Option::is_none")]
    pub new_metadata: Option<Value>,
    #[serde(rename = "next_step", skip_serializing_if = "Option::is_none")]
    pub new_next_step: Option<Value>,
    #[serde(rename = "title", skip_serializing_if = "Option::is_none")]
    pub new_title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub new_type: Option<String>,
    #[serde(rename = "event_name", skip_serializing_if = "Option::is_none")]
    pub new_event_name: Option<String>,
    #[serde(rename = "variable", skip_serializing_if = "Option::is_none")]
    pub new_variable: Option<String>,
    #[serde(rename = "actions", skip_serializing_if = "Option::is_none")]
    pub new_actions: Option<Vec<Value>>,
    #[serde(rename = "user_label", skip_serializing_if = "Option::is_none")]
    pub new_user_label: Option<String>,
    #[serde(rename = "disabled", skip_serializing_if = "Option::is_none")]
    pub new_disabled: Option<bool>,
}

// =============================================================================
// Logs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Log {
    pub log_id: String,
    pub request: MessageRequest,
    pub response: MessageResponse,
    pub request_timestamp: String,
    pub response_timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LogPagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LogCollection {
    pub logs: Vec<Log>,
    #[serde(default)]
    pub pagination: LogPagination,
}
