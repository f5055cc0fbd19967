// HTTP client for the switch's embedded web interface.
//
// Wraps `reqwest::Client` with the device's challenge-response login
// and the outlet control endpoint. The firmware speaks HTML forms, not
// JSON -- responses are consumed as raw text and picked apart with
// marker extraction.

use reqwest::header;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::auth::login_hash;
use crate::error::Error;
use crate::outlet::{Action, OutletSelector};
use crate::scrape;
use crate::transport::TransportConfig;

/// Session cookie issued by the switch after a successful login.
///
/// The device calls it `DLILPC`; it is replayed verbatim as a request
/// cookie on every control request.
#[derive(Debug, Clone)]
pub struct SessionCookie(String);

impl SessionCookie {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw cookie value.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Render the `Cookie` request header value.
    pub(crate) fn header_value(&self) -> String {
        format!("DLILPC={}", self.0)
    }
}

/// Client for a single power switch.
///
/// Holds the device base URL and the underlying HTTP client. Sessions
/// are not stored here -- `login` returns the cookie and `toggle` takes
/// it back, so the auth state is explicit at the call site.
pub struct PduClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PduClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL under the device root.
    ///
    /// The base URL's trailing slash is stripped before appending, so
    /// `http://10.0.0.5/` and `http://10.0.0.5` produce identical
    /// request lines.
    fn device_url(&self, suffix: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{suffix}"))?)
    }

    /// Fetch the login page body.
    ///
    /// The status code is deliberately not checked: some firmware
    /// revisions serve the challenge on non-200 pages, and a body
    /// without the marker fails challenge extraction anyway.
    async fn fetch_login_page(&self) -> Result<String, Error> {
        let url = self.base_url.clone();
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Ok(resp.text().await?)
    }

    /// Complete the challenge-response login and return the session cookie.
    ///
    /// Sequence: fetch the login page, extract the embedded challenge,
    /// hash `challenge + username + password + challenge`, POST the
    /// form to `/login.tgi`, and pull the `DLILPC` value out of the
    /// first `Set-Cookie` response header. Any stage failure aborts the
    /// whole login; there is no retry.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SessionCookie, Error> {
        let page = self.fetch_login_page().await?;
        let challenge = scrape::extract_challenge(&page).ok_or(Error::ChallengeNotFound)?;
        let hash = login_hash(username, password.expose_secret(), &challenge);

        let url = self.device_url("/login.tgi")?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .form(&[("Username", username), ("Password", hash.as_str())])
            .send()
            .await
            .map_err(Error::Transport)?;

        let cookie = resp
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .next()
            .ok_or(Error::SetCookieMissing)?
            .to_str()
            .ok()
            .and_then(scrape::extract_session_cookie)
            .ok_or(Error::SessionCookieNotFound)?;

        // Drain the body so the connection is released.
        let _ = resp.bytes().await;

        debug!("login successful");
        Ok(SessionCookie(cookie))
    }

    /// Switch one or all outlets to the requested state.
    ///
    /// Issues `GET /outlet?<target>=<code>` with the session cookie as
    /// a request cookie. The device reports success with status 200
    /// exactly; anything else is surfaced as [`Error::Device`] with the
    /// attempted outlet and action.
    pub async fn toggle(
        &self,
        outlet: OutletSelector,
        action: Action,
        session: &SessionCookie,
    ) -> Result<(), Error> {
        let target = outlet.target();
        let code = action.device_code();

        let url = self.device_url(&format!("/outlet?{target}={code}"))?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(header::COOKIE, session.header_value())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        // Drain the body on every path before evaluating the status.
        let _ = resp.bytes().await;

        if status != reqwest::StatusCode::OK {
            return Err(Error::Device {
                outlet: target,
                action: code,
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
