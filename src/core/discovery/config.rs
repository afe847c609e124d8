//! Query parameters and document upload payloads for Discovery.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::core::base::ServiceRequest;
use crate::errors::{WatsonError, WatsonResult};

/// Most recent API version date the models here were written against.
pub const LATEST_VERSION: &str = "2019-04-30";

/// Header that keeps a query out of the service's request logs.
const LOGGING_OPT_OUT_HEADER: &str = "X-Watson-Logging-Opt-Out";

// =============================================================================
// Query Options
// =============================================================================

/// Search parameters shared by `query`, `query_notices` and `federated_query`.
///
/// Serialized as the JSON body for POST queries; list fields are sent
/// comma-separated, as the API expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryOptions {
    /// Cacheable filter in the Discovery Query Language; does not affect
    /// relevance ranking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Query in the Discovery Query Language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(
        rename = "return",
        serialize_with = "comma_joined",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub return_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Sort fields; prefix with `-` for descending order.
    #[serde(serialize_with = "comma_joined", skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(
        rename = "passages.fields",
        serialize_with = "comma_joined",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub passages_fields: Vec<String>,
    #[serde(rename = "passages.count", skip_serializing_if = "Option::is_none")]
    pub passages_count: Option<i64>,
    #[serde(rename = "passages.characters", skip_serializing_if = "Option::is_none")]
    pub passages_characters: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplicate: Option<bool>,
    #[serde(rename = "deduplicate.field", skip_serializing_if = "Option::is_none")]
    pub deduplicate_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar: Option<bool>,
    #[serde(
        rename = "similar.document_ids",
        serialize_with = "comma_joined",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub similar_document_ids: Vec<String>,
    #[serde(
        rename = "similar.fields",
        serialize_with = "comma_joined",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub similar_fields: Vec<String>,
    /// Field to bias results towards, e.g. a date for recency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_suggestions: Option<bool>,
    /// Sent as the `X-Watson-Logging-Opt-Out` header.
    #[serde(skip)]
    pub logging_opt_out: Option<bool>,
}

impl QueryOptions {
    pub fn natural_language(text: impl Into<String>) -> Self {
        Self {
            natural_language_query: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn query(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub(crate) fn apply_headers<'a>(&self, request: ServiceRequest<'a>) -> ServiceRequest<'a> {
        let opt_out = self.logging_opt_out.map(|v| if v { "true" } else { "false" });
        request.header_opt(LOGGING_OPT_OUT_HEADER, opt_out)
    }

    /// Send the options as URL query arguments (GET endpoints).
    pub(crate) fn apply_query<'a>(&self, request: ServiceRequest<'a>) -> ServiceRequest<'a> {
        self.apply_headers(request)
            .query_opt("filter", self.filter.as_deref())
            .query_opt("query", self.query.as_deref())
            .query_opt("natural_language_query", self.natural_language_query.as_deref())
            .query_opt("passages", self.passages)
            .query_opt("aggregation", self.aggregation.as_deref())
            .query_opt("count", self.count)
            .query_list("return", &self.return_fields)
            .query_opt("offset", self.offset)
            .query_list("sort", &self.sort)
            .query_opt("highlight", self.highlight)
            .query_list("passages.fields", &self.passages_fields)
            .query_opt("passages.count", self.passages_count)
            .query_opt("passages.characters", self.passages_characters)
            .query_opt("deduplicate.field", self.deduplicate_field.as_deref())
            .query_opt("similar", self.similar)
            .query_list("similar.document_ids", &self.similar_document_ids)
            .query_list("similar.fields", &self.similar_fields)
    }
}

fn comma_joined<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&values.join(","))
}

/// Body of a federated query: the options plus the target collections.
#[derive(Serialize)]
pub(crate) struct FederatedQuery<'a> {
    #[serde(flatten)]
    pub options: &'a QueryOptions,
    pub collection_ids: String,
}

// =============================================================================
// Document Upload
// =============================================================================

/// A file to ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFile {
    pub filename: String,
    pub data: Bytes,
    /// `application/json`, `application/pdf`, `text/html`, ...
    pub content_type: String,
}

/// Multipart payload of `add_document` / `update_document`.
///
/// At least one of `file` and `metadata` must be set. Metadata alone updates
/// the metadata of an existing document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentUpload {
    pub file: Option<DocumentFile>,
    pub metadata: Option<Value>,
}

impl DocumentUpload {
    pub fn file(
        filename: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            file: Some(DocumentFile {
                filename: filename.into(),
                data: data.into(),
                content_type: content_type.into(),
            }),
            metadata: None,
        }
    }

    pub fn metadata(metadata: Value) -> Self {
        Self {
            file: None,
            metadata: Some(metadata),
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub(crate) fn to_form(&self) -> WatsonResult<Form> {
        if self.file.is_none() && self.metadata.is_none() {
            return Err(WatsonError::MissingArgument("file or metadata"));
        }

        let mut form = Form::new();
        if let Some(file) = &self.file {
            if file.data.is_empty() {
                return Err(WatsonError::MissingArgument("file"));
            }
            let part = Part::bytes(file.data.to_vec())
                .file_name(file.filename.clone())
                .mime_str(&file.content_type)
                .map_err(|e| WatsonError::InvalidArgument(format!("Invalid file part: {e}")))?;
            form = form.part("file", part);
        }
        if let Some(metadata) = &self.metadata {
            let part = Part::text(metadata.to_string())
                .mime_str("application/json")
                .map_err(|e| WatsonError::InvalidArgument(format!("Invalid metadata part: {e}")))?;
            form = form.part("metadata", part);
        }
        Ok(form)
    }
}
