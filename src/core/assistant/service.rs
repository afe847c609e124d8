use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;

use super::config::{ListOptions, LogOptions};
use super::models::*;
use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::base::{BaseService, ServiceOptions, require};
use crate::errors::WatsonResult;

/// Configuration key prefix and analytics name.
pub const SERVICE_NAME: &str = "assistant";

/// DNS label used to derive regional URLs.
pub const SERVICE_HOST: &str = "assistant";

pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.assistant.watson.cloud.ibm.com";

/// Assistant V1 client: workspace authoring and the `message` runtime API.
///
/// Every request carries the `version` date given at construction.
#[derive(Debug, Clone)]
pub struct AssistantV1 {
    base: BaseService,
}

#[derive(Serialize)]
struct TextBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Serialize)]
struct SynonymBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    synonym: Option<&'a str>,
}

impl AssistantV1 {
    pub fn new(version: &str, authenticator: Arc<dyn Authenticator>) -> WatsonResult<Self> {
        Self::with_options(version, ServiceOptions::new(authenticator))
    }

    pub fn with_options(version: &str, options: ServiceOptions) -> WatsonResult<Self> {
        Ok(Self {
            base: BaseService::new(SERVICE_NAME, DEFAULT_SERVICE_URL, options)?
                .with_version(version)?,
        })
    }

    pub fn from_config(version: &str, config: &ServiceConfig) -> WatsonResult<Self> {
        Self::with_options(
            version,
            ServiceOptions::from_config(config, DEFAULT_SERVICE_URL, SERVICE_HOST)?,
        )
    }

    /// Build a client from `ASSISTANT_*` env vars and the credentials file.
    pub fn from_env(version: &str) -> WatsonResult<Self> {
        Self::from_config(version, &ServiceConfig::load(SERVICE_NAME)?)
    }

    pub fn version(&self) -> &str {
        self.base.version().unwrap_or_default()
    }

    pub fn service_url(&self) -> &str {
        self.base.service_url()
    }

    pub fn set_service_url(&mut self, url: &str) -> WatsonResult<()> {
        self.base.set_service_url(url)
    }

    pub fn set_default_header(&mut self, name: &str, value: &str) -> WatsonResult<()> {
        self.base.set_default_header(name, value)
    }

    // =========================================================================
    // Message
    // =========================================================================

    /// Send user input to a workspace and get the dialog response.
    ///
    /// Pass the `context` of the previous response back in `request` to
    /// continue a conversation.
    pub async fn message(
        &self,
        workspace_id: &str,
        request: &MessageRequest,
        nodes_visited_details: Option<bool>,
    ) -> WatsonResult<MessageResponse> {
        require("workspace_id", workspace_id)?;

        self.base
            .request(Method::POST, &["v1", "workspaces", workspace_id, "message"])
            .operation("message")
            .query_opt("nodes_visited_details", nodes_visited_details)
            .json(request)
            .send_json()
            .await
    }

    // =========================================================================
    // Workspaces
    // =========================================================================

    pub async fn list_workspaces(&self, options: &ListOptions) -> WatsonResult<WorkspaceCollection> {
        let request = self
            .base
            .request(Method::GET, &["v1", "workspaces"])
            .operation("listWorkspaces");

        options.apply(request).send_json().await
    }

    pub async fn create_workspace(&self, workspace: &CreateWorkspace) -> WatsonResult<Workspace> {
        self.base
            .request(Method::POST, &["v1", "workspaces"])
            .operation("createWorkspace")
            .json(workspace)
            .send_json()
            .await
    }

    /// Fetch a workspace; with `export` the response includes all content.
    pub async fn get_workspace(
        &self,
        workspace_id: &str,
        export: Option<bool>,
        include_audit: Option<bool>,
        sort: Option<&str>,
    ) -> WatsonResult<Workspace> {
        require("workspace_id", workspace_id)?;

        self.base
            .request(Method::GET, &["v1", "workspaces", workspace_id])
            .operation("getWorkspace")
            .query_opt("export", export)
            .query_opt("include_audit", include_audit)
            .query_opt("sort", sort)
            .send_json()
            .await
    }

    /// Update a workspace. With `append` unset or false, any list in
    /// `workspace` replaces the existing content of that kind.
    pub async fn update_workspace(
        &self,
        workspace_id: &str,
        workspace: &UpdateWorkspace,
        append: Option<bool>,
    ) -> WatsonResult<Workspace> {
        require("workspace_id", workspace_id)?;

        self.base
            .request(Method::POST, &["v1", "workspaces", workspace_id])
            .operation("updateWorkspace")
            .query_opt("append", append)
            .json(workspace)
            .send_json()
            .await
    }

    pub async fn delete_workspace(&self, workspace_id: &str) -> WatsonResult<()> {
        require("workspace_id", workspace_id)?;

        self.base
            .request(Method::DELETE, &["v1", "workspaces", workspace_id])
            .operation("deleteWorkspace")
            .send_empty()
            .await
    }

    // =========================================================================
    // Intents
    // =========================================================================

    pub async fn list_intents(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> WatsonResult<IntentCollection> {
        require("workspace_id", workspace_id)?;

        let request = self
            .base
            .request(Method::GET, &["v1", "workspaces", workspace_id, "intents"])
            .operation("listIntents");

        options.apply_with_export(request).send_json().await
    }

    pub async fn create_intent(
        &self,
        workspace_id: &str,
        intent: &CreateIntent,
    ) -> WatsonResult<Intent> {
        require("workspace_id", workspace_id)?;
        require("intent", &intent.intent)?;

        self.base
            .request(Method::POST, &["v1", "workspaces", workspace_id, "intents"])
            .operation("createIntent")
            .json(intent)
            .send_json()
            .await
    }

    pub async fn get_intent(
        &self,
        workspace_id: &str,
        intent: &str,
        export: Option<bool>,
        include_audit: Option<bool>,
    ) -> WatsonResult<Intent> {
        require("workspace_id", workspace_id)?;
        require("intent", intent)?;

        self.base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "intents", intent],
            )
            .operation("getIntent")
            .query_opt("export", export)
            .query_opt("include_audit", include_audit)
            .send_json()
            .await
    }

    pub async fn update_intent(
        &self,
        workspace_id: &str,
        intent: &str,
        update: &UpdateIntent,
        append: Option<bool>,
    ) -> WatsonResult<Intent> {
        require("workspace_id", workspace_id)?;
        require("intent", intent)?;

        self.base
            .request(
                Method::POST,
                &["v1", "workspaces", workspace_id, "intents", intent],
            )
            .operation("updateIntent")
            .query_opt("append", append)
            .json(update)
            .send_json()
            .await
    }

    pub async fn delete_intent(&self, workspace_id: &str, intent: &str) -> WatsonResult<()> {
        require("workspace_id", workspace_id)?;
        require("intent", intent)?;

        self.base
            .request(
                Method::DELETE,
                &["v1", "workspaces", workspace_id, "intents", intent],
            )
            .operation("deleteIntent")
            .send_empty()
            .await
    }

    // =========================================================================
    // Examples
    // =========================================================================

    pub async fn list_examples(
        &self,
        workspace_id: &str,
        intent: &str,
        options: &ListOptions,
    ) -> WatsonResult<ExampleCollection> {
        require("workspace_id", workspace_id)?;
        require("intent", intent)?;

        let request = self
            .base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "intents", intent, "examples"],
            )
            .operation("listExamples");

        options.apply(request).send_json().await
    }

    pub async fn create_example(
        &self,
        workspace_id: &str,
        intent: &str,
        example: &Example,
    ) -> WatsonResult<Example> {
        require("workspace_id", workspace_id)?;
        require("intent", intent)?;
        require("text", &example.text)?;

        self.base
            .request(
                Method::POST,
                &["v1", "workspaces", workspace_id, "intents", intent, "examples"],
            )
            .operation("createExample")
            .json(example)
            .send_json()
            .await
    }

    pub async fn get_example(
        &self,
        workspace_id: &str,
        intent: &str,
        text: &str,
        include_audit: Option<bool>,
    ) -> WatsonResult<Example> {
        require("workspace_id", workspace_id)?;
        require("intent", intent)?;
        require("text", text)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "intents",
                    intent,
                    "examples",
                    text,
                ],
            )
            .operation("getExample")
            .query_opt("include_audit", include_audit)
            .send_json()
            .await
    }

    pub async fn update_example(
        &self,
        workspace_id: &str,
        intent: &str,
        text: &str,
        update: &UpdateExample,
    ) -> WatsonResult<Example> {
        require("workspace_id", workspace_id)?;
        require("intent", intent)?;
        require("text", text)?;

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "intents",
                    intent,
                    "examples",
                    text,
                ],
            )
            .operation("updateExample")
            .json(update)
            .send_json()
            .await
    }

    pub async fn delete_example(
        &self,
        workspace_id: &str,
        intent: &str,
        text: &str,
    ) -> WatsonResult<()> {
        require("workspace_id", workspace_id)?;
        require("intent", intent)?;
        require("text", text)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "intents",
                    intent,
                    "examples",
                    text,
                ],
            )
            .operation("deleteExample")
            .send_empty()
            .await
    }

    // =========================================================================
    // Counterexamples
    // =========================================================================

    pub async fn list_counterexamples(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> WatsonResult<CounterexampleCollection> {
        require("workspace_id", workspace_id)?;

        let request = self
            .base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "counterexamples"],
            )
            .operation("listCounterexamples");

        options.apply(request).send_json().await
    }

    pub async fn create_counterexample(
        &self,
        workspace_id: &str,
        text: &str,
    ) -> WatsonResult<Counterexample> {
        require("workspace_id", workspace_id)?;
        require("text", text)?;

        self.base
            .request(
                Method::POST,
                &["v1", "workspaces", workspace_id, "counterexamples"],
            )
            .operation("createCounterexample")
            .json(&TextBody { text: Some(text) })
            .send_json()
            .await
    }

    pub async fn get_counterexample(
        &self,
        workspace_id: &str,
        text: &str,
        include_audit: Option<bool>,
    ) -> WatsonResult<Counterexample> {
        require("workspace_id", workspace_id)?;
        require("text", text)?;

        self.base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "counterexamples", text],
            )
            .operation("getCounterexample")
            .query_opt("include_audit", include_audit)
            .send_json()
            .await
    }

    pub async fn update_counterexample(
        &self,
        workspace_id: &str,
        text: &str,
        new_text: Option<&str>,
    ) -> WatsonResult<Counterexample> {
        require("workspace_id", workspace_id)?;
        require("text", text)?;

        self.base
            .request(
                Method::POST,
                &["v1", "workspaces", workspace_id, "counterexamples", text],
            )
            .operation("updateCounterexample")
            .json(&TextBody { text: new_text })
            .send_json()
            .await
    }

    pub async fn delete_counterexample(&self, workspace_id: &str, text: &str) -> WatsonResult<()> {
        require("workspace_id", workspace_id)?;
        require("text", text)?;

        self.base
            .request(
                Method::DELETE,
                &["v1", "workspaces", workspace_id, "counterexamples", text],
            )
            .operation("deleteCounterexample")
            .send_empty()
            .await
    }

    // =========================================================================
    // Entities
    // =========================================================================

    pub async fn list_entities(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> WatsonResult<EntityCollection> {
        require("workspace_id", workspace_id)?;

        let request = self
            .base
            .request(Method::GET, &["v1", "workspaces", workspace_id, "entities"])
            .operation("listEntities");

        options.apply_with_export(request).send_json().await
    }

    pub async fn create_entity(
        &self,
        workspace_id: &str,
        entity: &CreateEntity,
    ) -> WatsonResult<Entity> {
        require("workspace_id", workspace_id)?;
        require("entity", &entity.entity)?;

        self.base
            .request(Method::POST, &["v1", "workspaces", workspace_id, "entities"])
            .operation("createEntity")
            .json(entity)
            .send_json()
            .await
    }

    pub async fn get_entity(
        &self,
        workspace_id: &str,
        entity: &str,
        export: Option<bool>,
        include_audit: Option<bool>,
    ) -> WatsonResult<Entity> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;

        self.base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "entities", entity],
            )
            .operation("getEntity")
            .query_opt("export", export)
            .query_opt("include_audit", include_audit)
            .send_json()
            .await
    }

    pub async fn update_entity(
        &self,
        workspace_id: &str,
        entity: &str,
        update: &UpdateEntity,
        append: Option<bool>,
    ) -> WatsonResult<Entity> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;

        self.base
            .request(
                Method::POST,
                &["v1", "workspaces", workspace_id, "entities", entity],
            )
            .operation("updateEntity")
            .query_opt("append", append)
            .json(update)
            .send_json()
            .await
    }

    pub async fn delete_entity(&self, workspace_id: &str, entity: &str) -> WatsonResult<()> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;

        self.base
            .request(
                Method::DELETE,
                &["v1", "workspaces", workspace_id, "entities", entity],
            )
            .operation("deleteEntity")
            .send_empty()
            .await
    }

    /// User inputs in which the entity was recognised.
    pub async fn list_mentions(
        &self,
        workspace_id: &str,
        entity: &str,
        export: Option<bool>,
        include_audit: Option<bool>,
    ) -> WatsonResult<EntityMentionCollection> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;

        self.base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "entities", entity, "mentions"],
            )
            .operation("listMentions")
            .query_opt("export", export)
            .query_opt("include_audit", include_audit)
            .send_json()
            .await
    }

    // =========================================================================
    // Values
    // =========================================================================

    pub async fn list_values(
        &self,
        workspace_id: &str,
        entity: &str,
        options: &ListOptions,
    ) -> WatsonResult<ValueCollection> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;

        let request = self
            .base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "entities", entity, "values"],
            )
            .operation("listValues");

        options.apply_with_export(request).send_json().await
    }

    pub async fn create_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &CreateValue,
    ) -> WatsonResult<EntityValue> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", &value.value)?;

        self.base
            .request(
                Method::POST,
                &["v1", "workspaces", workspace_id, "entities", entity, "values"],
            )
            .operation("createValue")
            .json(value)
            .send_json()
            .await
    }

    pub async fn get_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        export: Option<bool>,
        include_audit: Option<bool>,
    ) -> WatsonResult<EntityValue> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", value)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "entities",
                    entity,
                    "values",
                    value,
                ],
            )
            .operation("getValue")
            .query_opt("export", export)
            .query_opt("include_audit", include_audit)
            .send_json()
            .await
    }

    pub async fn update_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        update: &UpdateValue,
        append: Option<bool>,
    ) -> WatsonResult<EntityValue> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", value)?;

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "entities",
                    entity,
                    "values",
                    value,
                ],
            )
            .operation("updateValue")
            .query_opt("append", append)
            .json(update)
            .send_json()
            .await
    }

    pub async fn delete_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
    ) -> WatsonResult<()> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", value)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "entities",
                    entity,
                    "values",
                    value,
                ],
            )
            .operation("deleteValue")
            .send_empty()
            .await
    }

    // =========================================================================
    // Synonyms
    // =========================================================================

    pub async fn list_synonyms(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        options: &ListOptions,
    ) -> WatsonResult<SynonymCollection> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", value)?;

        let request = self
            .base
            .request(
                Method::GET,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "entities",
                    entity,
                    "values",
                    value,
                    "synonyms",
                ],
            )
            .operation("listSynonyms");

        options.apply(request).send_json().await
    }

    pub async fn create_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
    ) -> WatsonResult<Synonym> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", value)?;
        require("synonym", synonym)?;

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "entities",
                    entity,
                    "values",
                    value,
                    "synonyms",
                ],
            )
            .operation("createSynonym")
            .json(&SynonymBody {
                synonym: Some(synonym),
            })
            .send_json()
            .await
    }

    pub async fn get_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
        include_audit: Option<bool>,
    ) -> WatsonResult<Synonym> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", value)?;
        require("synonym", synonym)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "entities",
                    entity,
                    "values",
                    value,
                    "synonyms",
                    synonym,
                ],
            )
            .operation("getSynonym")
            .query_opt("include_audit", include_audit)
            .send_json()
            .await
    }

    pub async fn update_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
        new_synonym: Option<&str>,
    ) -> WatsonResult<Synonym> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", value)?;
        require("synonym", synonym)?;

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "entities",
                    entity,
                    "values",
                    value,
                    "synonyms",
                    synonym,
                ],
            )
            .operation("updateSynonym")
            .json(&SynonymBody {
                synonym: new_synonym,
            })
            .send_json()
            .await
    }

    pub async fn delete_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
    ) -> WatsonResult<()> {
        require("workspace_id", workspace_id)?;
        require("entity", entity)?;
        require("value", value)?;
        require("synonym", synonym)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "workspaces",
                    workspace_id,
                    "entities",
                    entity,
                    "values",
                    value,
                    "synonyms",
                    synonym,
                ],
            )
            .operation("deleteSynonym")
            .send_empty()
            .await
    }

    // =========================================================================
    // Dialog nodes
    // =========================================================================

    pub async fn list_dialog_nodes(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> WatsonResult<DialogNodeCollection> {
        require("workspace_id", workspace_id)?;

        let request = self
            .base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "dialog_nodes"],
            )
            .operation("listDialogNodes");

        options.apply(request).send_json().await
    }

    pub async fn create_dialog_node(
        &self,
        workspace_id: &str,
        node: &DialogNode,
    ) -> WatsonResult<DialogNode> {
        require("workspace_id", workspace_id)?;
        require("dialog_node", &node.dialog_node)?;

        self.base
            .request(
                Method::POST,
                &["v1", "workspaces", workspace_id, "dialog_nodes"],
            )
            .operation("createDialogNode")
            .json(node)
            .send_json()
            .await
    }

    pub async fn get_dialog_node(
        &self,
        workspace_id: &str,
        dialog_node: &str,
        include_audit: Option<bool>,
    ) -> WatsonResult<DialogNode> {
        require("workspace_id", workspace_id)?;
        require("dialog_node", dialog_node)?;

        self.base
            .request(
                Method::GET,
                &["v1", "workspaces", workspace_id, "dialog_nodes", dialog_node],
            )
            .operation("getDialogNode")
            .query_opt("include_audit", include_audit)
            .send_json()
            .await
    }

    pub async fn update_dialog_node(
        &self,
        workspace_id: &str,
        dialog_node: &str,
        update: &UpdateDialogNode,
    ) -> WatsonResult<DialogNode> {
        require("workspace_id", workspace_id)?;
        require("dialog_node", dialog_node)?;

        self.base
            .request(
                Method::POST,
                &["v1", "workspaces", workspace_id, "dialog_nodes", dialog_node],
            )
            .operation("updateDialogNode")
            .json(update)
            .send_json()
            .await
    }

    pub async fn delete_dialog_node(&self, workspace_id: &str, dialog_node: &str) -> WatsonResult<()> {
        require("workspace_id", workspace_id)?;
        require("dialog_node", dialog_node)?;

        self.base
            .request(
                Method::DELETE,
                &["v1", "workspaces", workspace_id, "dialog_nodes", dialog_node],
            )
            .operation("deleteDialogNode")
            .send_empty()
            .await
    }

    // =========================================================================
    // Logs
    // =========================================================================

    pub async fn list_logs(
        &self,
        workspace_id: &str,
        options: &LogOptions,
    ) -> WatsonResult<LogCollection> {
        require("workspace_id", workspace_id)?;

        let request = self
            .base
            .request(Method::GET, &["v1", "workspaces", workspace_id, "logs"])
            .operation("listLogs");

        options.apply(request, None).send_json().await
    }

    /// Logs across all workspaces of the instance.
    ///
    /// `filter` must name a workspace, e.g. `workspace_id::<id>` or
    /// `request.context.metadata.deployment::<name>`.
    pub async fn list_all_logs(
        &self,
        filter: &str,
        options: &LogOptions,
    ) -> WatsonResult<LogCollection> {
        require("filter", filter)?;

        let request = self
            .base
            .request(Method::GET, &["v1", "logs"])
            .operation("listAllLogs");

        options.apply(request, Some(filter)).send_json().await
    }

    // =========================================================================
    // User data
    // =========================================================================

    pub async fn delete_user_data(&self, customer_id: &str) -> WatsonResult<()> {
        require("customer_id", customer_id)?;

        self.base
            .request(Method::DELETE, &["v1", "user_data"])
            .operation("deleteUserData")
            .query("customer_id", customer_id)
            .send_empty()
            .await
    }
}
