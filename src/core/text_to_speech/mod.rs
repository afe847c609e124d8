//! IBM Watson Text to Speech V1.
//!
//! Synthesis is a single HTTP request returning the whole audio body; there
//! is no streaming. Custom models hold word translations that override the
//! default pronunciation of a voice.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use watson_sdk::core::text_to_speech::{
//!     IbmOutputFormat, IbmVoice, SynthesizeOptions, TextToSpeechV1,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tts = TextToSpeechV1::from_env()?;
//!
//!     let options = SynthesizeOptions::new("Hello from Watson")
//!         .voice(IbmVoice::EnGbCharlotteV3Voice)
//!         .format(IbmOutputFormat::Mp3)
//!         .rate_percentage(-10);
//!     let audio = tts.synthesize(&options).await?;
//!     std::fs::write("hello.mp3", &audio)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod models;
mod service;


pub use config::{
    DEFAULT_SAMPLE_RATE, DEFAULT_VOICE, IbmOutputFormat, IbmVoice, MAX_TEXT_LENGTH, PhonemeFormat,
    SynthesizeOptions, escape_xml,
};
pub use models::*;
pub use service::{DEFAULT_SERVICE_URL, SERVICE_HOST, SERVICE_NAME, TextToSpeechV1};
