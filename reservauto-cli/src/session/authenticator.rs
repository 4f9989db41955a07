//! Drives the login handshake over HTTP.

use std::time::Duration;

use tracing::debug;

use super::error::AuthError;
use super::flow::{FormMethod, LoginFlow};

/// Landing page whose first form selects the regional service variant.
const DEFAULT_LOGIN_URL: &str = "https://www.communauto.com/en/my-account.html";

/// Browser-like identification. The site rejects requests without one, so
/// this is part of the protocol, not cosmetics.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:78.0) Gecko/20100101 Firefox/78.0";

/// Configuration for the authenticator.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// URL of the login landing page.
    pub login_url: String,
    /// Request timeout in seconds, applied to every request on the session.
    pub timeout_secs: u64,
}

impl AuthConfig {
    pub fn new() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom login URL (for testing).
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An authenticated session: a cookie-jar HTTP client carrying the login
/// cookies.
///
/// Only the authenticator constructs one. The remote service's session
/// semantics are unknown, so a session must not be shared across
/// concurrent requests; this crate only ever has one request in flight.
#[derive(Debug, Clone)]
pub struct Session {
    http: reqwest::Client,
}

impl Session {
    fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// One GET on the session. Callers await completion before issuing the
    /// next request.
    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.http.get(url).send().await
    }
}

/// Performs the fixed three-step login handshake.
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Run the handshake and return an authenticated session.
    ///
    /// Known weak point, preserved from the site's own flow: the handshake
    /// only checks page *structure*. It succeeds even with wrong
    /// credentials, which then surface as a fetch or parse failure on the
    /// first real request.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;

        let mut flow = LoginFlow::new(username, password);

        debug!(url = %self.config.login_url, "opening login page");
        let response = http.get(&self.config.login_url).send().await?;
        let mut page_url = response.url().clone();
        let mut body = response.text().await?;

        while !flow.is_authenticated() {
            let submission = flow.advance(&page_url, &body)?;
            debug!(action = %submission.action, ?submission.method, "submitting login form");

            let request = match submission.method {
                FormMethod::Post => http.post(submission.action).form(&submission.fields),
                FormMethod::Get => http.get(submission.action).query(&submission.fields),
            };
            let response = request.send().await?;
            page_url = response.url().clone();
            body = response.text().await?;
        }

        debug!("login handshake complete");
        Ok(Session::new(http))
    }
}
