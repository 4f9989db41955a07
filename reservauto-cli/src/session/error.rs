//! Login handshake error types.

use super::flow::LoginStep;

/// Errors from the login handshake. All fatal; the handshake is never
/// retried mid-sequence.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// HTTP request failed during the handshake
    #[error("HTTP error during login: {0}")]
    Http(#[from] reqwest::Error),

    /// A handshake page did not contain the expected form
    #[error("unexpected page structure at {step}: {reason}")]
    UnexpectedPageStructure {
        step: LoginStep,
        reason: &'static str,
    },

    /// A form action could not be resolved into a URL
    #[error("cannot resolve form action {action:?} at {step}")]
    BadFormAction { step: LoginStep, action: String },

    /// The flow was advanced past its final step
    #[error("login handshake already complete")]
    AlreadyAuthenticated,
}
