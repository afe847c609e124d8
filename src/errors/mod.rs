pub mod watson_error;

pub use watson_error::{ServiceError, WatsonError, WatsonResult};
