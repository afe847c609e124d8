use std::sync::Arc;

use reqwest::Method;
use tracing::info;

use super::config::{DocumentUpload, FederatedQuery, QueryOptions};
use super::models::*;
use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::base::{BaseService, ServiceOptions, require};
use crate::errors::{WatsonError, WatsonResult};

/// Configuration key prefix and analytics name.
pub const SERVICE_NAME: &str = "discovery";

/// DNS label used to derive regional URLs.
pub const SERVICE_HOST: &str = "discovery";

pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.discovery.watson.cloud.ibm.com";

/// Discovery V1 client.
///
/// Environments hold configurations and collections; collections hold the
/// ingested documents that queries run against.
#[derive(Debug, Clone)]
pub struct DiscoveryV1 {
    base: BaseService,
}

impl DiscoveryV1 {
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

    /// Build a client from `DISCOVERY_*` env vars and the credentials file.
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
    // Environments
    // =========================================================================

    pub async fn create_environment(
        &self,
        environment: &CreateEnvironment,
    ) -> WatsonResult<Environment> {
        require("name", &environment.name)?;

        self.base
            .request(Method::POST, &["v1", "environments"])
            .operation("createEnvironment")
            .json(environment)
            .send_json()
            .await
    }

    pub async fn list_environments(
        &self,
        name: Option<&str>,
    ) -> WatsonResult<ListEnvironmentsResponse> {
        self.base
            .request(Method::GET, &["v1", "environments"])
            .operation("listEnvironments")
            .query_opt("name", name)
            .send_json()
            .await
    }

    pub async fn get_environment(&self, environment_id: &str) -> WatsonResult<Environment> {
        require("environment_id", environment_id)?;

        self.base
            .request(Method::GET, &["v1", "environments", environment_id])
            .operation("getEnvironment")
            .send_json()
            .await
    }

    pub async fn update_environment(
        &self,
        environment_id: &str,
        update: &UpdateEnvironment,
    ) -> WatsonResult<Environment> {
        require("environment_id", environment_id)?;

        self.base
            .request(Method::PUT, &["v1", "environments", environment_id])
            .operation("updateEnvironment")
            .json(update)
            .send_json()
            .await
    }

    pub async fn delete_environment(
        &self,
        environment_id: &str,
    ) -> WatsonResult<DeleteEnvironmentResponse> {
        require("environment_id", environment_id)?;

        self.base
            .request(Method::DELETE, &["v1", "environments", environment_id])
            .operation("deleteEnvironment")
            .send_json()
            .await
    }

    /// Fields shared by the given collections, with their index types.
    pub async fn list_fields<S: AsRef<str>>(
        &self,
        environment_id: &str,
        collection_ids: &[S],
    ) -> WatsonResult<ListCollectionFieldsResponse> {
        require("environment_id", environment_id)?;
        if collection_ids.is_empty() {
            return Err(WatsonError::MissingArgument("collection_ids"));
        }

        self.base
            .request(Method::GET, &["v1", "environments", environment_id, "fields"])
            .operation("listFields")
            .query_list("collection_ids", collection_ids)
            .send_json()
            .await
    }

    // =========================================================================
    // Configurations
    // =========================================================================

    pub async fn create_configuration(
        &self,
        environment_id: &str,
        configuration: &Configuration,
    ) -> WatsonResult<Configuration> {
        require("environment_id", environment_id)?;
        require("name", &configuration.name)?;

        self.base
            .request(
                Method::POST,
                &["v1", "environments", environment_id, "configurations"],
            )
            .operation("createConfiguration")
            .json(configuration)
            .send_json()
            .await
    }

    pub async fn list_configurations(
        &self,
        environment_id: &str,
        name: Option<&str>,
    ) -> WatsonResult<ListConfigurationsResponse> {
        require("environment_id", environment_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "environments", environment_id, "configurations"],
            )
            .operation("listConfigurations")
            .query_opt("name", name)
            .send_json()
            .await
    }

    pub async fn get_configuration(
        &self,
        environment_id: &str,
        configuration_id: &str,
    ) -> WatsonResult<Configuration> {
        require("environment_id", environment_id)?;
        require("configuration_id", configuration_id)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "configurations",
                    configuration_id,
                ],
            )
            .operation("getConfiguration")
            .send_json()
            .await
    }

    /// Replace a configuration. Documents already ingested are not
    /// reprocessed.
    pub async fn update_configuration(
        &self,
        environment_id: &str,
        configuration_id: &str,
        configuration: &Configuration,
    ) -> WatsonResult<Configuration> {
        require("environment_id", environment_id)?;
        require("configuration_id", configuration_id)?;
        require("name", &configuration.name)?;

        self.base
            .request(
                Method::PUT,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "configurations",
                    configuration_id,
                ],
            )
            .operation("updateConfiguration")
            .json(configuration)
            .send_json()
            .await
    }

    pub async fn delete_configuration(
        &self,
        environment_id: &str,
        configuration_id: &str,
    ) -> WatsonResult<DeleteConfigurationResponse> {
        require("environment_id", environment_id)?;
        require("configuration_id", configuration_id)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "configurations",
                    configuration_id,
                ],
            )
            .operation("deleteConfiguration")
            .send_json()
            .await
    }

    // =========================================================================
    // Collections
    // =========================================================================

    pub async fn create_collection(
        &self,
        environment_id: &str,
        collection: &CreateCollection,
    ) -> WatsonResult<Collection> {
        require("environment_id", environment_id)?;
        require("name", &collection.name)?;

        self.base
            .request(
                Method::POST,
                &["v1", "environments", environment_id, "collections"],
            )
            .operation("createCollection")
            .json(collection)
            .send_json()
            .await
    }

    pub async fn list_collections(
        &self,
        environment_id: &str,
        name: Option<&str>,
    ) -> WatsonResult<ListCollectionsResponse> {
        require("environment_id", environment_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "environments", environment_id, "collections"],
            )
            .operation("listCollections")
            .query_opt("name", name)
            .send_json()
            .await
    }

    pub async fn get_collection(
        &self,
        environment_id: &str,
        collection_id: &str,
    ) -> WatsonResult<Collection> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "environments", environment_id, "collections", collection_id],
            )
            .operation("getCollection")
            .send_json()
            .await
    }

    pub async fn update_collection(
        &self,
        environment_id: &str,
        collection_id: &str,
        update: &UpdateCollection,
    ) -> WatsonResult<Collection> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        require("name", &update.name)?;

        self.base
            .request(
                Method::PUT,
                &["v1", "environments", environment_id, "collections", collection_id],
            )
            .operation("updateCollection")
            .json(update)
            .send_json()
            .await
    }

    pub async fn delete_collection(
        &self,
        environment_id: &str,
        collection_id: &str,
    ) -> WatsonResult<DeleteCollectionResponse> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        self.base
            .request(
                Method::DELETE,
                &["v1", "environments", environment_id, "collections", collection_id],
            )
            .operation("deleteCollection")
            .send_json()
            .await
    }

    pub async fn list_collection_fields(
        &self,
        environment_id: &str,
        collection_id: &str,
    ) -> WatsonResult<ListCollectionFieldsResponse> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "fields",
                ],
            )
            .operation("listCollectionFields")
            .send_json()
            .await
    }

    // =========================================================================
    // Query expansions
    // =========================================================================

    pub async fn list_expansions(
        &self,
        environment_id: &str,
        collection_id: &str,
    ) -> WatsonResult<Expansions> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "expansions",
                ],
            )
            .operation("listExpansions")
            .send_json()
            .await
    }

    /// Replace the collection's expansion list.
    pub async fn create_expansions(
        &self,
        environment_id: &str,
        collection_id: &str,
        expansions: &Expansions,
    ) -> WatsonResult<Expansions> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        if expansions.expansions.is_empty() {
            return Err(WatsonError::MissingArgument("expansions"));
        }

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "expansions",
                ],
            )
            .operation("createExpansions")
            .json(expansions)
            .send_json()
            .await
    }

    pub async fn delete_expansions(
        &self,
        environment_id: &str,
        collection_id: &str,
    ) -> WatsonResult<()> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "expansions",
                ],
            )
            .operation("deleteExpansions")
            .send_empty()
            .await
    }

    // =========================================================================
    // Documents
    // =========================================================================

    /// Queue a document for ingestion.
    pub async fn add_document(
        &self,
        environment_id: &str,
        collection_id: &str,
        upload: &DocumentUpload,
    ) -> WatsonResult<DocumentAccepted> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        let form = upload.to_form()?;

        let accepted: DocumentAccepted = self
            .base
            .request(
                Method::POST,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "documents",
                ],
            )
            .operation("addDocument")
            .multipart(form)
            .send_json()
            .await?;

        info!(
            collection_id = collection_id,
            document_id = accepted.document_id.as_deref().unwrap_or("-"),
            status = accepted.status.as_deref().unwrap_or("-"),
            "Document accepted for ingestion"
        );
        Ok(accepted)
    }

    /// Replace a document, or create it under the given ID.
    pub async fn update_document(
        &self,
        environment_id: &str,
        collection_id: &str,
        document_id: &str,
        upload: &DocumentUpload,
    ) -> WatsonResult<DocumentAccepted> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        require("document_id", document_id)?;
        let form = upload.to_form()?;

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "documents",
                    document_id,
                ],
            )
            .operation("updateDocument")
            .multipart(form)
            .send_json()
            .await
    }

    pub async fn get_document_status(
        &self,
        environment_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> WatsonResult<DocumentStatus> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        require("document_id", document_id)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "documents",
                    document_id,
                ],
            )
            .operation("getDocumentStatus")
            .send_json()
            .await
    }

    pub async fn delete_document(
        &self,
        environment_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> WatsonResult<DeleteDocumentResponse> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        require("document_id", document_id)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "documents",
                    document_id,
                ],
            )
            .operation("deleteDocument")
            .send_json()
            .await
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Search a collection. Options travel in a JSON body, so long filters
    /// and aggregations do not hit URL length limits.
    pub async fn query(
        &self,
        environment_id: &str,
        collection_id: &str,
        options: &QueryOptions,
    ) -> WatsonResult<QueryResponse> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        let request = self
            .base
            .request(
                Method::POST,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "query",
                ],
            )
            .operation("query")
            .json(options);

        options.apply_headers(request).send_json().await
    }

    /// Search the ingestion notices (warnings and errors) of a collection.
    pub async fn query_notices(
        &self,
        environment_id: &str,
        collection_id: &str,
        options: &QueryOptions,
    ) -> WatsonResult<QueryNoticesResponse> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        let request = self
            .base
            .request(
                Method::GET,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "notices",
                ],
            )
            .operation("queryNotices");

        options.apply_query(request).send_json().await
    }

    /// Search several collections of one environment at once.
    pub async fn federated_query<S: AsRef<str>>(
        &self,
        environment_id: &str,
        collection_ids: &[S],
        options: &QueryOptions,
    ) -> WatsonResult<QueryResponse> {
        require("environment_id", environment_id)?;
        if collection_ids.is_empty() {
            return Err(WatsonError::MissingArgument("collection_ids"));
        }
        for id in collection_ids {
            require("collection_ids", id.as_ref())?;
        }

        let body = FederatedQuery {
            options,
            collection_ids: collection_ids
                .iter()
                .map(|id| id.as_ref())
                .collect::<Vec<_>>()
                .join(","),
        };

        let request = self
            .base
            .request(Method::POST, &["v1", "environments", environment_id, "query"])
            .operation("federatedQuery")
            .json(&body);

        options.apply_headers(request).send_json().await
    }

    // =========================================================================
    // Training data
    // =========================================================================

    pub async fn list_training_data(
        &self,
        environment_id: &str,
        collection_id: &str,
    ) -> WatsonResult<TrainingDataSet> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "training_data",
                ],
            )
            .operation("listTrainingData")
            .send_json()
            .await
    }

    pub async fn add_training_data(
        &self,
        environment_id: &str,
        collection_id: &str,
        query: &TrainingQuery,
    ) -> WatsonResult<TrainingQuery> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        require("natural_language_query", &query.natural_language_query)?;

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "training_data",
                ],
            )
            .operation("addTrainingData")
            .json(query)
            .send_json()
            .await
    }

    pub async fn delete_all_training_data(
        &self,
        environment_id: &str,
        collection_id: &str,
    ) -> WatsonResult<()> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "training_data",
                ],
            )
            .operation("deleteAllTrainingData")
            .send_empty()
            .await
    }

    pub async fn get_training_data(
        &self,
        environment_id: &str,
        collection_id: &str,
        query_id: &str,
    ) -> WatsonResult<TrainingQuery> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        require("query_id", query_id)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "training_data",
                    query_id,
                ],
            )
            .operation("getTrainingData")
            .send_json()
            .await
    }

    pub async fn delete_training_data(
        &self,
        environment_id: &str,
        collection_id: &str,
        query_id: &str,
    ) -> WatsonResult<()> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        require("query_id", query_id)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "environments",
                    environment_id,
                    "collections",
                    collection_id,
                    "training_data",
                    query_id,
                ],
            )
            .operation("deleteTrainingData")
            .send_empty()
            .await
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
