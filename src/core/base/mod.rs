//! Shared plumbing for the generated service clients.
//!
//! - [`BaseService`]: service URL, authenticator, pooled HTTP client
//! - [`ServiceRequest`]: per-operation request builder
//! - [`IbmRegion`]: region-to-URL mapping

mod region;
mod request;
mod service;

pub use region::IbmRegion;
pub use request::{ANALYTICS_HEADER, ServiceRequest};
pub use service::{BaseService, DEFAULT_TIMEOUT, ServiceOptions, USER_AGENT};

/// Reject empty required arguments before any network activity.
pub(crate) fn require(name: &'static str, value: &str) -> crate::errors::WatsonResult<()> {
    if value.trim().is_empty() {
        return Err(crate::errors::WatsonError::MissingArgument(name));
    }
    Ok(())
}

