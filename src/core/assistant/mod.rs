//! IBM Watson Assistant V1.
//!
//! Workspace authoring (intents, entities, dialog nodes, ...) and the
//! stateless `message` API. A version date such as [`LATEST_VERSION`] is
//! required at construction and sent with every request.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use watson_sdk::core::assistant::{AssistantV1, LATEST_VERSION, MessageRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let assistant = AssistantV1::from_env(LATEST_VERSION)?;
//!
//!     let first = assistant
//!         .message("my-workspace-id", &MessageRequest::text("Hello"), None)
//!         .await?;
//!     println!("{:?}", first.output.text);
//!
//!     // Carry the context forward to stay in the same conversation.
//!     let next = MessageRequest::text("What are your hours?").with_context(first.context);
//!     let second = assistant.message("my-workspace-id", &next, None).await?;
//!     println!("{:?}", second.top_intent());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod models;
mod service;

#[cfg(test)]
mod tests;

pub use config::{LATEST_VERSION, ListOptions, LogOptions};
pub use models::*;
pub use service::{AssistantV1, DEFAULT_SERVICE_URL, SERVICE_HOST, SERVICE_NAME};
