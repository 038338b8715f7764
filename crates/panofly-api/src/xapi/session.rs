// `XapiClient` for the HTTP session
//
// Thin delegation onto the inherent config and vsys methods.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::client::{ImportKind, ReadMode, XapiClient};
use crate::error::Error;
use crate::version::ProtocolVersion;
use crate::xapi::client::HttpXapiClient;
use crate::xpath::Xpath;

#[async_trait]
impl XapiClient for HttpXapiClient {
    fn version(&self) -> ProtocolVersion {
        if let Ok(version) = self.negotiated_version() {
            return version.clone();
        }
        // Oldest schema is selected for an un-negotiated session.
        warn!("protocol version requested before negotiation");
        ProtocolVersion::default()
    }

    async fn read(&self, mode: ReadMode, xpath: &Xpath) -> Result<Value, Error> {
        self.config_read(mode, xpath).await
    }

    async fn set(&self, xpath: &Xpath, element: Value) -> Result<Value, Error> {
        self.config_set(xpath, &element).await
    }

    async fn edit(&self, xpath: &Xpath, element: Value) -> Result<Value, Error> {
        self.config_edit(xpath, &element).await
    }

    async fn delete(&self, xpath: &Xpath) -> Result<Value, Error> {
        self.config_delete(xpath).await
    }

    async fn vsys_unimport(
        &self,
        kind: ImportKind,
        tmpl: &str,
        ts: &str,
        names: &[String],
    ) -> Result<(), Error> {
        self.unimport(kind, tmpl, ts, names).await
    }

    async fn vsys_import(
        &self,
        kind: ImportKind,
        tmpl: &str,
        ts: &str,
        vsys: &str,
        names: &[String],
    ) -> Result<(), Error> {
        self.import(kind, tmpl, ts, vsys, names).await
    }
}
