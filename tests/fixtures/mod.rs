//! Shared fixtures for the mock-server integration tests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

pub mod audio;

use std::sync::Arc;

use watson_sdk::auth::{Authenticator, NoAuthAuthenticator};
use watson_sdk::core::ServiceOptions;
use wiremock::MockServer;

pub const TRANSACTION_ID: &str = "txn-8f1e0a2c";

/// Service options pointing at the mock server, without credentials.
pub fn mock_options(server: &MockServer) -> ServiceOptions {
    ServiceOptions::new(Arc::new(NoAuthAuthenticator)).with_service_url(server.uri())
}

/// Service options pointing at the mock server with the given authenticator.
pub fn mock_options_with(server: &MockServer, auth: Arc<dyn Authenticator>) -> ServiceOptions {
    ServiceOptions::new(auth).with_service_url(server.uri())
}

/// Typical Watson error body, as returned with a 4xx status.
pub fn error_body(code: u16, message: &str) -> serde_json::Value {
    serde_json::json!({ "code": code, "error": message })
}
