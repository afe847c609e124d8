pub mod assistant;
pub mod base;
pub mod discovery;
pub mod speech_to_text;
pub mod text_to_speech;

// Re-export commonly used types for convenience
pub use assistant::AssistantV1;
pub use base::{BaseService, IbmRegion, ServiceOptions, ServiceRequest};
pub use discovery::DiscoveryV1;
pub use speech_to_text::SpeechToTextV1;
pub use text_to_speech::TextToSpeechV1;
