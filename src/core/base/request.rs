use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use super::service::BaseService;
use crate::errors::{ServiceError, WatsonError, WatsonResult};

/// Header carrying the SDK analytics tuple.
pub const ANALYTICS_HEADER: &str = "x-ibmcloud-sdk-analytics";

enum RequestBody {
    Json(Vec<u8>),
    Raw { data: Bytes, content_type: String },
    Multipart(Form),
}

/// Builder for a single service operation.
///
/// Builder methods never fail; the first error (bad header value, body that
/// fails to serialize, ...) is held back and returned from [`send`](Self::send).
pub struct ServiceRequest<'a> {
    service: &'a BaseService,
    method: Method,
    url: WatsonResult<Url>,
    operation_id: Option<&'static str>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<RequestBody>,
    error: Option<WatsonError>,
}

impl<'a> ServiceRequest<'a> {
    pub(crate) fn new(service: &'a BaseService, method: Method, segments: &[&str]) -> Self {
        let query = service
            .version()
            .map(|version| vec![("version".to_string(), version.to_string())])
            .unwrap_or_default();

        Self {
            service,
            method,
            url: service.endpoint(segments),
            operation_id: None,
            query,
            headers: HeaderMap::new(),
            body: None,
            error: None,
        }
    }

    /// Tag the request with its operation ID for the analytics header.
    pub fn operation(mut self, operation_id: &'static str) -> Self {
        self.operation_id = Some(operation_id);
        self
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn query_opt<T: ToString>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Comma-join a list argument; nothing is sent for an empty list.
    pub fn query_list<S: AsRef<str>>(self, name: &str, values: &[S]) -> Self {
        if values.is_empty() {
            return self;
        }
        let joined = values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.query(name, joined)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => self.fail(WatsonError::InvalidArgument(format!(
                "Invalid header {name}: {value}"
            ))),
        }
        self
    }

    pub fn header_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.body = Some(RequestBody::Json(bytes)),
            Err(e) => self.fail(WatsonError::InvalidArgument(format!(
                "Failed to serialize request body: {e}"
            ))),
        }
        self
    }

    /// Attach a raw body such as audio or a plain-text corpus.
    pub fn bytes(mut self, data: impl Into<Bytes>, content_type: &str) -> Self {
        self.body = Some(RequestBody::Raw {
            data: data.into(),
            content_type: content_type.to_string(),
        });
        self
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    fn fail(&mut self, err: WatsonError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Authenticate and send; non-2xx responses become [`WatsonError::Service`].
    pub async fn send(self) -> WatsonResult<Response> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let url = self.url?;
        let service = self.service;
        let operation = self.operation_id.unwrap_or("unknown");

        let mut headers = service.default_headers().clone();
        headers.extend(self.headers);
        headers
            .entry(ACCEPT)
            .or_insert_with(|| HeaderValue::from_static("application/json"));
        let analytics = format!(
            "service_name={};service_version=V1;operation_id={}",
            service.service_name(),
            operation
        );
        if let Ok(value) = HeaderValue::from_str(&analytics) {
            headers.insert(ANALYTICS_HEADER, value);
        }

        service.authenticator().authenticate(&mut headers).await?;

        debug!(
            service = service.service_name(),
            operation = operation,
            method = %self.method,
            url = %url,
            "Sending Watson request"
        );

        let mut builder = service
            .client()
            .request(self.method.clone(), url)
            .query(&self.query);

        builder = match self.body {
            Some(RequestBody::Json(bytes)) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                builder.body(bytes)
            }
            Some(RequestBody::Raw { data, content_type }) => {
                let value = HeaderValue::from_str(&content_type).map_err(|_| {
                    WatsonError::InvalidArgument(format!("Invalid content type: {content_type}"))
                })?;
                headers.insert(CONTENT_TYPE, value);
                builder.body(data)
            }
            // reqwest sets the multipart boundary content type itself.
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        let response = builder.headers(headers).send().await?;
        let status = response.status();

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            let err = ServiceError::from_parts(status, &headers, &body);
            error!(
                service = service.service_name(),
                operation = operation,
                status = err.status,
                transaction_id = err.transaction_id.as_deref().unwrap_or("-"),
                "Watson request failed: {}",
                err.message
            );
            return Err(WatsonError::Service(err));
        }

        debug!(operation = operation, status = %status, "Watson request succeeded");
        Ok(response)
    }

    /// Send and deserialize a JSON response.
    pub async fn send_json<T: DeserializeOwned>(self) -> WatsonResult<T> {
        let response = self.send().await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(WatsonError::from)
    }

    /// Send and return the raw response body (audio, corpus text, ...).
    pub async fn send_bytes(self) -> WatsonResult<Bytes> {
        let response = self.send().await?;
        Ok(response.bytes().await?)
    }

    /// Send and discard the response body.
    pub async fn send_empty(self) -> WatsonResult<()> {
        self.send().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::NoAuthAuthenticator;
    use crate::core::base::ServiceOptions;

    fn service() -> BaseService {
        BaseService::new(
            "discovery",
            "http://127.0.0.1:9",
            ServiceOptions::new(Arc::new(NoAuthAuthenticator)),
        )
        .unwrap()
        .with_version("2019-04-30")
        .unwrap()
    }

    #[test]
    fn test_version_and_list_query() {
        let base = service();
        let request = base
            .request(Method::GET, &["v1", "environments"])
            .query_opt("name", Some("news"))
            .query_opt::<i64>("count", None)
            .query_list("collection_ids", &["a", "b"])
            .query_list::<&str>("empty", &[]);

        assert_eq!(
            request.query,
            vec![
                ("version".to_string(), "2019-04-30".to_string()),
                ("name".to_string(), "news".to_string()),
                ("collection_ids".to_string(), "a,b".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_header_fails_before_sending() {
        let base = service();
        let result = base
            .request(Method::GET, &["v1", "environments"])
            .header("Content-Language", "bad\nvalue")
            .send()
            .await;
        assert!(matches!(result, Err(WatsonError::InvalidArgument(_))));
    }
}
