//! Async Rust client for IBM Watson services.
//!
//! | Service | Client | API version |
//! |---------|--------|-------------|
//! | Watson Assistant | [`AssistantV1`] | v1 (version date required) |
//! | Speech to Text | [`SpeechToTextV1`] | v1 |
//! | Text to Speech | [`TextToSpeechV1`] | v1 |
//! | Discovery | [`DiscoveryV1`] | v1 (version date required) |
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use watson_sdk::auth::IamAuthenticator;
//! use watson_sdk::core::text_to_speech::{IbmVoice, SynthesizeOptions, TextToSpeechV1};
//!
//! # async fn example() -> watson_sdk::WatsonResult<()> {
//! let auth = Arc::new(IamAuthenticator::new("my-api-key")?);
//! let tts = TextToSpeechV1::new(auth)?;
//!
//! let audio = tts
//!     .synthesize(&SynthesizeOptions::new("Hello world").voice(IbmVoice::EnUsAllisonV3Voice))
//!     .await?;
//! std::fs::write("hello.ogg", &audio).ok();
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod errors;
pub mod utils;

// Re-export commonly used items for convenience
pub use auth::{Authenticator, IamAuthenticator};
pub use config::ServiceConfig;
pub use core::*;
pub use errors::{ServiceError, WatsonError, WatsonResult};
