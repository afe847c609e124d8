//! IBM Watson Speech to Text V1.
//!
//! # Features
//!
//! - Sessionless recognition of a complete audio file (`recognize`)
//! - Asynchronous recognition jobs with optional callback notifications
//! - Custom language models: corpora, words and grammars
//! - Custom acoustic models: audio resources
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use watson_sdk::core::speech_to_text::{
//!     IbmAudioEncoding, IbmModel, RecognizeOptions, SpeechToTextV1,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SPEECH_TO_TEXT_APIKEY / SPEECH_TO_TEXT_URL
//!     let stt = SpeechToTextV1::from_env()?;
//!
//!     let audio = std::fs::read("meeting.flac")?;
//!     let options = RecognizeOptions {
//!         smart_formatting: Some(true),
//!         ..RecognizeOptions::for_model(IbmModel::EnUsMultimedia)
//!     };
//!     let results = stt
//!         .recognize(audio, &IbmAudioEncoding::Flac.content_type(16000), &options)
//!         .await?;
//!     println!("{}", results.transcript());
//!     Ok(())
//! }
//! ```
//!
//! # References
//!
//! - [API Reference](https://cloud.ibm.com/apidocs/speech-to-text)

pub mod config;
pub mod models;
mod service;

#[cfg(test)]
mod tests;

pub use config::{
    DEFAULT_MODEL, IbmAudioEncoding, IbmModel, JobEvent, JobOptions, MAX_RESULTS_TTL_MINUTES,
    RecognizeOptions,
};
pub use models::*;
pub use service::{DEFAULT_SERVICE_URL, SERVICE_HOST, SERVICE_NAME, SpeechToTextV1};
