//! Login handshake and authenticated sessions.
//!
//! The site gates its booking pages behind a fixed three-step handshake:
//! select the regional service variant, submit credentials, confirm the
//! region again. [`LoginFlow`] is the handshake as a pure state machine;
//! [`Authenticator`] drives it over HTTP and yields a [`Session`].

mod authenticator;
mod error;
mod flow;

pub use authenticator::{AuthConfig, Authenticator, Session};
pub use error::AuthError;
pub use flow::{FormMethod, FormSubmission, LoginFlow, LoginState, LoginStep};
