use secrecy::SecretString;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-PAN-KEY";

/// Credentials for authenticating with a device.
///
/// Each variant carries the secret material needed for its auth flow.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Pre-generated API key, sent as the `X-PAN-KEY` header.
    ApiKey(SecretString),

    /// Administrator username and password, exchanged for an API key
    /// via `type=keygen` before the session starts.
    Password {
        username: String,
        password: SecretString,
    },
}

impl Credentials {
    /// Returns `true` when a keygen round-trip is needed before use.
    pub fn needs_keygen(&self) -> bool {
        matches!(self, Self::Password { .. })
    }
}
