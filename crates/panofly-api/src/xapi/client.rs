// Device API HTTP client
//
// Wraps `reqwest::Client` with query construction, XML envelope unwrapping,
// and the cached protocol version. Config operations, vsys imports and
// keygen are implemented as inherent methods in sibling files to keep this
// module focused on transport mechanics.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::{API_KEY_HEADER, Credentials};
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::version::ProtocolVersion;
use crate::xml;
use crate::xapi::models::{VersionInfo, XapiResponse};

/// HTTP session with a device's configuration API.
///
/// All requests go to `{base}/api/` with the operation encoded in the
/// query string (`type`, `action`, `xpath`, `element`). Every method
/// returns the unwrapped `result` payload; the envelope is stripped
/// before the caller sees it.
pub struct HttpXapiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Populated once by [`negotiate_version`](Self::negotiate_version).
    version: OnceLock<ProtocolVersion>,
    /// Version information reported at negotiation time.
    system: OnceLock<VersionInfo>,
}

impl HttpXapiClient {
    /// Build a client, exchanging a password for an API key if needed,
    /// then negotiate the protocol version.
    pub async fn connect(
        base_url: Url,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let key = match credentials {
            Credentials::ApiKey(key) => key.clone(),
            Credentials::Password { username, password } => {
                let http = transport.build_client()?;
                Self::keygen(&http, &base_url, username, password).await?
            }
        };

        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(key.expose_secret()).map_err(|_| {
            Error::Authentication {
                message: "API key contains characters not allowed in a header".into(),
            }
        })?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);

        let http = transport.build_client_with_headers(headers)?;
        let client = Self::with_client(http, base_url);
        client.negotiate_version().await?;
        Ok(client)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for auth headers. The version is unset
    /// until [`negotiate_version`](Self::negotiate_version) or
    /// [`with_version`](Self::with_version) runs.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            version: OnceLock::new(),
            system: OnceLock::new(),
        }
    }

    /// Pin the protocol version without asking the device.
    pub fn with_version(self, version: ProtocolVersion) -> Self {
        let _ = self.version.set(version);
        self
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Version details captured during negotiation, if it has run.
    pub fn system_info(&self) -> Option<&VersionInfo> {
        self.system.get()
    }

    /// The negotiated version, or `Error::NotConnected` before negotiation.
    pub fn negotiated_version(&self) -> Result<&ProtocolVersion, Error> {
        self.version.get().ok_or(Error::NotConnected)
    }

    /// Ask the device for its software version and cache it.
    ///
    /// `GET /api/?type=version`. Subsequent calls return the cached value.
    pub async fn negotiate_version(&self) -> Result<ProtocolVersion, Error> {
        if let Some(version) = self.version.get() {
            return Ok(version.clone());
        }

        debug!("negotiating protocol version");
        let result = self.request(reqwest::Method::GET, &[("type", "version")]).await?;
        let info: VersionInfo =
            serde_json::from_value(result.clone()).map_err(|e| Error::Deserialization {
                message: format!("version info: {e}"),
                body: result.to_string(),
            })?;
        let version: ProtocolVersion = info.sw_version.parse()?;
        debug!(%version, model = ?info.model, "negotiated protocol version");

        let _ = self.system.set(info);
        Ok(self.version.get_or_init(|| version).clone())
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/api/`
    pub(crate) fn api_url(&self) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one API request and unwrap the envelope.
    ///
    /// Returns the `result` payload, or `Value::Null` when the device
    /// answered success without one.
    pub(crate) async fn request(
        &self,
        method: reqwest::Method,
        params: &[(&str, &str)],
    ) -> Result<Value, Error> {
        let url = self.api_url()?;
        let action = params
            .iter()
            .find(|(k, _)| *k == "action" || *k == "type")
            .map_or("", |(_, v)| *v);
        debug!(%method, action, "xapi request");
        trace!(?params, "xapi request parameters");

        let resp = self
            .http
            .request(method, url)
            .query(params)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Parse the `<response>` envelope, returning `result` on success or
    /// an `Error::Api` if `status != "success"`.
    ///
    /// The XML body is read into its JSON rendition first, so `result`
    /// comes back as `{"@attr": .., "child": ..}` values.
    pub(crate) async fn parse_envelope(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: format!("API key rejected (HTTP {status})"),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                code: None,
                message: format!("HTTP {status}: {}", preview(&body)),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let document = xml::to_value(&body)?;
        let envelope: XapiResponse = serde_json::from_value(document).map_err(|e| {
            Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            }
        })?;

        let response = envelope.response;
        if response.is_success() {
            return Ok(response.result.unwrap_or(Value::Null));
        }

        let code = response.code();
        let message = response.message();
        warn!(?code, message, "device rejected request");
        // Code 403 inside the envelope is an invalid or expired key.
        if code == Some(403) {
            return Err(Error::Authentication { message });
        }
        Err(Error::Api { code, message })
    }
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
