// Configuration endpoints
//
// `type=config` reads and writes. Elements are rendered to XML text for
// the `element` parameter; xpaths are rendered from their segments at the
// last moment.

use serde_json::Value;
use tracing::debug;

use crate::client::ReadMode;
use crate::error::Error;
use crate::xapi::client::HttpXapiClient;
use crate::xml;
use crate::xpath::Xpath;

impl HttpXapiClient {
    /// Read configuration at `xpath`.
    ///
    /// `GET /api/?type=config&action={get|show}&xpath=...`
    pub async fn config_read(&self, mode: ReadMode, xpath: &Xpath) -> Result<Value, Error> {
        let xpath = xpath.to_string();
        debug!(%mode, xpath, "reading config");
        self.request(
            reqwest::Method::GET,
            &[("type", "config"), ("action", mode.as_ref()), ("xpath", xpath.as_str())],
        )
        .await
    }

    /// Merge `element` beneath `xpath`.
    ///
    /// `POST /api/?type=config&action=set&xpath=...&element=...`
    pub async fn config_set(&self, xpath: &Xpath, element: &Value) -> Result<Value, Error> {
        self.config_write("set", xpath, element).await
    }

    /// Replace the node at `xpath` with `element`.
    ///
    /// `POST /api/?type=config&action=edit&xpath=...&element=...`
    pub async fn config_edit(&self, xpath: &Xpath, element: &Value) -> Result<Value, Error> {
        self.config_write("edit", xpath, element).await
    }

    /// Delete the node(s) at `xpath`.
    ///
    /// `POST /api/?type=config&action=delete&xpath=...`
    pub async fn config_delete(&self, xpath: &Xpath) -> Result<Value, Error> {
        let xpath = xpath.to_string();
        debug!(xpath, "deleting config");
        self.request(
            reqwest::Method::POST,
            &[("type", "config"), ("action", "delete"), ("xpath", xpath.as_str())],
        )
        .await
    }

    async fn config_write(
        &self,
        action: &str,
        xpath: &Xpath,
        element: &Value,
    ) -> Result<Value, Error> {
        let xpath = xpath.to_string();
        let element = xml::to_xml(element)?;
        debug!(action, xpath, "writing config");
        self.request(
            reqwest::Method::POST,
            &[
                ("type", "config"),
                ("action", action),
                ("xpath", xpath.as_str()),
                ("element", element.as_str()),
            ],
        )
        .await
    }
}
