//! Paging and filtering options for Assistant list operations.

use crate::core::base::ServiceRequest;

/// Most recent API version date the models here were written against.
pub const LATEST_VERSION: &str = "2021-11-27";

/// Options shared by the `list_*` operations.
///
/// `export` is only honoured by endpoints that can return nested content
/// (intents, entities, values); other endpoints never send it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub page_limit: Option<i64>,
    pub include_count: Option<bool>,
    /// Attribute to sort by; prefix with `-` for descending order.
    pub sort: Option<String>,
    pub cursor: Option<String>,
    pub include_audit: Option<bool>,
    pub export: Option<bool>,
}

impl ListOptions {
    pub fn page_limit(mut self, limit: i64) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn export(mut self, export: bool) -> Self {
        self.export = Some(export);
        self
    }

    pub(crate) fn apply<'a>(&self, request: ServiceRequest<'a>) -> ServiceRequest<'a> {
        request
            .query_opt("page_limit", self.page_limit)
            .query_opt("include_count", self.include_count)
            .query_opt("sort", self.sort.as_deref())
            .query_opt("cursor", self.cursor.as_deref())
            .query_opt("include_audit", self.include_audit)
    }

    pub(crate) fn apply_with_export<'a>(&self, request: ServiceRequest<'a>) -> ServiceRequest<'a> {
        self.apply(request.query_opt("export", self.export))
    }
}

/// Options for the log listing operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogOptions {
    pub sort: Option<String>,
    /// Filter expression, e.g. `response_timestamp>2024-01-01`.
    pub filter: Option<String>,
    pub page_limit: Option<i64>,
    pub cursor: Option<String>,
}

impl LogOptions {
    pub(crate) fn apply<'a>(
        &self,
        request: ServiceRequest<'a>,
        filter: Option<&str>,
    ) -> ServiceRequest<'a> {
        request
            .query_opt("sort", self.sort.as_deref())
            .query_opt("filter", filter.or(self.filter.as_deref()))
            .query_opt("page_limit", self.page_limit)
            .query_opt("cursor", self.cursor.as_deref())
    }
}
