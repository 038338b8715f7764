// API key generation
//
// Exchanges administrator credentials for an API key via `type=keygen`.
// The key is then sent as a default header on every request.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::xapi::client::HttpXapiClient;
use crate::xapi::models::KeygenResult;

impl HttpXapiClient {
    /// Generate an API key for `username`.
    ///
    /// `GET /api/?type=keygen&user=...&password=...`
    pub async fn keygen(
        http: &reqwest::Client,
        base_url: &Url,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, Error> {
        let base = base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{base}/api/"))?;

        debug!(username, "generating API key");

        let resp = http
            .get(url)
            .query(&[
                ("type", "keygen"),
                ("user", username),
                ("password", password.expose_secret()),
            ])
            .send()
            .await
            .map_err(Error::Transport)?;

        let result = Self::parse_envelope(resp).await.map_err(|e| match e {
            Error::Api { message, .. } => Error::Authentication { message },
            other => other,
        })?;

        let keygen: KeygenResult =
            serde_json::from_value(result.clone()).map_err(|e| Error::Deserialization {
                message: format!("keygen result: {e}"),
                body: result.to_string(),
            })?;

        debug!("API key generated");
        Ok(SecretString::from(keygen.key))
    }
}
