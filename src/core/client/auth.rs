//! Session bootstrap for quoteSummary: a consent cookie, then a crumb bound to it.

use reqwest::StatusCode;
use reqwest::header::SET_COOKIE;

use crate::core::DashError;

impl super::DashClient {
    /// Makes sure a crumb is available, bootstrapping the session on first use.
    ///
    /// Concurrent callers share one bootstrap: the first takes the fetch lock,
    /// the rest re-check once it is released.
    pub(crate) async fn ensure_credentials(&self) -> Result<(), DashError> {
        if self.has_crumb().await {
            return Ok(());
        }

        let _guard = self.credential_fetch_lock.lock().await;
        if self.has_crumb().await {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(cookie_url = %self.cookie_url, "bootstrapping provider session");

        self.fetch_session_cookie().await?;

        let crumb = self.fetch_crumb().await?;
        self.state.write().await.crumb = Some(crumb);
        Ok(())
    }

    /// Forgets the crumb so the next call bootstraps a fresh session.
    pub(crate) async fn clear_crumb(&self) {
        self.state.write().await.crumb = None;
    }

    pub(crate) async fn crumb(&self) -> Option<String> {
        self.state.read().await.crumb.clone()
    }

    async fn has_crumb(&self) -> bool {
        self.state.read().await.crumb.is_some()
    }

    /// The cookie itself lives in the HTTP client's cookie store; this only checks it arrived.
    async fn fetch_session_cookie(&self) -> Result<(), DashError> {
        let resp = self.http.get(self.cookie_url.clone()).send().await?;

        let Some(header) = resp.headers().get(SET_COOKIE) else {
            return Err(DashError::Auth(format!(
                "{} did not set a session cookie",
                self.cookie_url
            )));
        };
        header
            .to_str()
            .map(|_| ())
            .map_err(|_| DashError::Auth("session cookie is not valid ASCII".into()))
    }

    async fn fetch_crumb(&self) -> Result<String, DashError> {
        let resp = self.http.get(self.crumb_url.clone()).send().await?;

        match resp.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(DashError::RateLimited {
                    url: self.crumb_url.to_string(),
                });
            }
            s if !s.is_success() => {
                return Err(DashError::Status {
                    status: s.as_u16(),
                    url: self.crumb_url.to_string(),
                });
            }
            _ => {}
        }

        let body = resp.text().await?;
        let crumb = body.trim();
        // A usable crumb is a short opaque token; markup or JSON means the cookie was refused.
        if crumb.is_empty() || crumb.starts_with(['{', '<']) || crumb.contains(char::is_whitespace)
        {
            return Err(DashError::Auth(format!("crumb endpoint returned no token: {crumb:.40}")));
        }
        Ok(crumb.to_owned())
    }
}
