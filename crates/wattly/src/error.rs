//! CLI error types with miette diagnostics.
//!
//! Maps `wattly_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use wattly_api::Error as ApiError;
use wattly_config::ConfigError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the switch at {url}")]
    #[diagnostic(
        code(wattly::connection_failed),
        help(
            "Check that the device is powered and reachable.\n\
             For self-signed HTTPS, pass --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(wattly::timeout),
        help("Increase the timeout with --timeout or check device responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Could not find a challenge token on the login page")]
    #[diagnostic(
        code(wattly::no_challenge),
        help(
            "Make sure URL points at the switch's web interface,\n\
             not a redirect or a proxy in front of it."
        )
    )]
    NoChallenge,

    #[error("Login was not accepted by the device")]
    #[diagnostic(
        code(wattly::auth_failed),
        help(
            "Verify USER and PASS in config.yaml\n\
             (or the matching environment variables)."
        )
    )]
    AuthFailed {
        #[source]
        source: ApiError,
    },

    // ── Device ───────────────────────────────────────────────────────
    #[error("Device refused {action} for outlet '{outlet}' (HTTP {status})")]
    #[diagnostic(
        code(wattly::device_rejected),
        help("Check the outlet number against the device's web UI.")
    )]
    DeviceRejected {
        outlet: String,
        action: String,
        status: u16,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wattly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(wattly::config),
        help(
            "Create a config.yaml with URL, USER, and PASS keys in the\n\
             config directory (--config-dir, default: current directory)."
        )
    )]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NoChallenge | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            Self::DeviceRejected { .. } | Self::Config(_) => exit_code::GENERAL,
        }
    }
}

// ── ApiError → CliError mapping ─────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else {
                    let url = e
                        .url()
                        .map_or_else(|| "(unknown)".into(), ToString::to_string);
                    Self::ConnectionFailed {
                        url,
                        source: ApiError::Transport(e),
                    }
                }
            }

            ApiError::ChallengeNotFound => Self::NoChallenge,

            err @ (ApiError::SetCookieMissing | ApiError::SessionCookieNotFound) => {
                Self::AuthFailed { source: err }
            }

            ApiError::UnsupportedAction(action) => Self::Validation {
                field: "action".into(),
                reason: format!("unsupported action '{action}'"),
            },

            ApiError::Device {
                outlet,
                action,
                status,
            } => Self::DeviceRejected {
                outlet,
                action: action.into(),
                status,
            },

            ApiError::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
        }
    }
}
