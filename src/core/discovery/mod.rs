//! IBM Watson Discovery V1.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use watson_sdk::core::discovery::{DiscoveryV1, DocumentUpload, LATEST_VERSION, QueryOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let discovery = DiscoveryV1::from_env(LATEST_VERSION)?;
//!
//!     let html = std::fs::read("faq.html")?;
//!     let upload = DocumentUpload::file("faq.html", html, "text/html")
//!         .with_metadata(serde_json::json!({"source": "support-site"}));
//!     discovery.add_document("env-id", "coll-id", &upload).await?;
//!
//!     let options = QueryOptions::natural_language("how do I reset my password").count(5);
//!     let response = discovery.query("env-id", "coll-id", &options).await?;
//!     for result in &response.results {
//!         println!("{} ({:.2})", result.id, result.result_metadata.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod models;
mod service;

#[cfg(test)]
mod tests;

pub use config::{DocumentFile, DocumentUpload, LATEST_VERSION, QueryOptions};
pub use models::*;
pub use service::{DEFAULT_SERVICE_URL, DiscoveryV1, SERVICE_HOST, SERVICE_NAME};
