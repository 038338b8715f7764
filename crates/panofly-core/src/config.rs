// ── Runtime connection configuration ──
//
// These types describe *how* to reach a device. They carry credential
// data and connection tuning, but never touch disk. The CLI builds a
// `DeviceConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use panofly_api::{Credentials, TlsMode, TransportConfig};

/// How to authenticate with a device.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Pre-generated API key (preferred).
    ApiKey(SecretString),
    /// Administrator login, exchanged for a key at connect time.
    Credentials {
        username: String,
        password: SecretString,
    },
}

impl From<&AuthCredentials> for Credentials {
    fn from(auth: &AuthCredentials) -> Self {
        match auth {
            AuthCredentials::ApiKey(key) => Credentials::ApiKey(key.clone()),
            AuthCredentials::Credentials { username, password } => Credentials::Password {
                username: username.clone(),
                password: password.clone(),
            },
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Default, since management interfaces usually
    /// ship self-signed certificates.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single device.
///
/// Built by the CLI and passed to [`Device`](crate::Device).
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Management URL (e.g., `https://panorama.example.com`).
    pub url: Url,
    pub auth: AuthCredentials,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl DeviceConfig {
    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Transport settings for the session client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
