//! Network layer: REST call helpers, identity provider client, and the
//! serde contract types shared with the backend.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, ApiError>` so pages can route failures
//! to the toast stack; nothing here panics. Hard failures (transport,
//! non-2xx, `success:false`) are `ApiError`; the soft recognition failure
//! (`recognized:false` on a 2xx response) is data, not an error.

pub mod api;
pub mod identity;
pub mod types;

/// Failure taxonomy for backend and identity-provider calls. All variants
/// are recoverable; the UI shows a transient notification and returns the
/// user to the prior state without retrying automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, ...).
    #[error("Network error: {0}")]
    Request(String),
    /// A response arrived with a non-2xx status and no usable error body.
    #[error("Server returned status {0}")]
    Status(u16),
    /// The backend answered with `success: false` or an `error` message.
    #[error("{0}")]
    Backend(String),
}
