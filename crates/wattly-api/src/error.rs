use thiserror::Error;

/// Top-level error type for the `wattly-api` crate.
///
/// Covers every failure mode of the login and outlet-control flows.
/// The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction or parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Login page ──────────────────────────────────────────────────
    /// The login page did not contain a challenge token.
    #[error("challenge token not found in login page")]
    ChallengeNotFound,

    // ── Authentication ──────────────────────────────────────────────
    /// The login response carried no `Set-Cookie` header at all.
    #[error("login response carried no Set-Cookie header")]
    SetCookieMissing,

    /// A `Set-Cookie` header was present but held no `DLILPC` value.
    #[error("DLILPC session cookie not found in Set-Cookie header")]
    SessionCookieNotFound,

    // ── Validation ──────────────────────────────────────────────────
    /// The action string is not one of the supported outlet actions.
    #[error("unsupported action '{0}': must be one of \"on\", \"off\", or \"cycle\"")]
    UnsupportedAction(String),

    // ── Device ──────────────────────────────────────────────────────
    /// The device answered the toggle request with a non-200 status.
    #[error("device refused {action} for outlet '{outlet}': HTTP {status}")]
    Device {
        outlet: String,
        action: &'static str,
        status: u16,
    },
}

impl Error {
    /// Returns `true` if the failure happened while establishing the
    /// session (login accepted no cookie).
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::SetCookieMissing | Self::SessionCookieNotFound)
    }

    /// Returns `true` for transient transport failures worth retrying
    /// by hand.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
