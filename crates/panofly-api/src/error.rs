use thiserror::Error;

/// Top-level error type for the `panofly-api` crate.
///
/// Covers every failure mode of the transport/session layer: HTTP,
/// authentication, the `<response status=..>` envelope, and version
/// negotiation. `panofly-core` passes these through verbatim.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Key generation or API key rejected by the device.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Device API ──────────────────────────────────────────────────
    /// The device answered with `@status="error"`.
    #[error("Device API error: {message}")]
    Api { code: Option<u16>, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body could not be decoded, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// An element could not be rendered as XML.
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// The device reported a software version we could not parse.
    #[error("Invalid version string {raw:?}: {reason}")]
    InvalidVersion { raw: String, reason: String },

    // ── Session ─────────────────────────────────────────────────────
    /// An operation needing a negotiated session ran before `connect()`.
    #[error("Not connected -- version negotiation has not run")]
    NotConnected,
}

impl Error {
    /// Returns `true` if this error indicates the API key is no longer valid.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// This crate never retries on its own; the flag is for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the device reported a missing object.
    ///
    /// PAN-OS uses code 7 ("Object doesn't exist") for reads and deletes
    /// against an absent node.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { code: Some(7), .. } => true,
            _ => false,
        }
    }

    /// Extract the device API error code, if available.
    pub fn api_error_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }
}
