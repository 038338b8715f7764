// ── Device facade ──
//
// One connected session per device. Namespaces vended here share the
// session client, so they can be driven from separate tasks without
// reconnecting.

use std::sync::Arc;

use tracing::{debug, info};

use panofly_api::{Credentials, HttpXapiClient, ProtocolVersion, XapiClient};

use crate::config::DeviceConfig;
use crate::error::CoreError;
use crate::netw::interface::eth::{self, Ethernet};
use crate::netw::interface::tunnel::{self, Tunnel};

/// The main entry point for consumers.
///
/// Cheaply cloneable; clones share one session.
#[derive(Clone)]
pub struct Device {
    client: Arc<dyn XapiClient>,
}

impl Device {
    /// Authenticate, negotiate the protocol version, and return a ready
    /// session.
    pub async fn connect(config: &DeviceConfig) -> Result<Self, CoreError> {
        if !matches!(config.url.scheme(), "http" | "https") {
            return Err(CoreError::Config {
                message: format!(
                    "device URL must use http or https, got {}://",
                    config.url.scheme()
                ),
            });
        }
        debug!(url = %config.url, "connecting to device");
        let credentials = Credentials::from(&config.auth);
        let client =
            HttpXapiClient::connect(config.url.clone(), &credentials, &config.transport()).await?;
        if let Some(info) = client.system_info() {
            info!(
                version = %info.sw_version,
                model = info.model.as_deref().unwrap_or("unknown"),
                "connected"
            );
        }
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Wrap an existing session.
    pub fn with_client(client: Arc<dyn XapiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<dyn XapiClient> {
        &self.client
    }

    /// The session's negotiated protocol version.
    pub fn version(&self) -> ProtocolVersion {
        self.client.version()
    }

    pub fn ethernet(&self) -> Ethernet {
        Ethernet::new(Arc::clone(&self.client), eth::labels())
    }

    pub fn tunnel(&self) -> Tunnel {
        Tunnel::new(Arc::clone(&self.client), tunnel::labels())
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("version", &self.client.version())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use url::Url;

    use crate::config::AuthCredentials;

    #[tokio::test]
    async fn non_http_url_is_rejected_before_connecting() {
        let config = DeviceConfig::new(
            Url::parse("ftp://fw.example.com").unwrap(),
            AuthCredentials::ApiKey(SecretString::from("k".to_owned())),
        );
        let err = Device::connect(&config).await.unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }), "got {err:?}");
        assert!(err.to_string().contains("ftp://"));
    }
}
