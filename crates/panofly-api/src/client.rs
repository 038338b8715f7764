// ── Session contract ──
//
// The narrow surface the synchronization layer consumes. `HttpXapiClient`
// is the production implementation; tests substitute recording fakes.
// Implementations must be safe to share between namespaces driven from
// different tasks, or be serialized by the caller.

use async_trait::async_trait;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};
use tracing::info;

use crate::error::Error;
use crate::version::ProtocolVersion;
use crate::xpath::Xpath;

/// Which copy of the configuration a read addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ReadMode {
    /// Candidate configuration (`action=get`).
    Get,
    /// Running (committed) configuration (`action=show`).
    Show,
}

/// Resource kinds that can be imported into a vsys.
///
/// The string form is the node below `vsys/entry/import/network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ImportKind {
    Interface,
    VirtualRouter,
    Vlan,
    VirtualWire,
}

/// Request/response session with a configuration-managed device.
///
/// Every method is a single remote exchange (or none) with no retries.
/// `version()` is the negotiated schema generation, cached for the
/// lifetime of the session.
#[async_trait]
pub trait XapiClient: Send + Sync {
    /// The negotiated protocol version.
    fn version(&self) -> ProtocolVersion;

    /// Read the node(s) at `xpath`. An absent node reads as `Value::Null`.
    async fn read(&self, mode: ReadMode, xpath: &Xpath) -> Result<Value, Error>;

    /// Create or merge `element` beneath `xpath`.
    async fn set(&self, xpath: &Xpath, element: Value) -> Result<Value, Error>;

    /// Replace the node at `xpath` with `element`.
    async fn edit(&self, xpath: &Xpath, element: Value) -> Result<Value, Error>;

    /// Remove the node(s) at `xpath`.
    async fn delete(&self, xpath: &Xpath) -> Result<Value, Error>;

    /// Remove `names` from whichever vsys currently imports them.
    ///
    /// Idempotent: names that are not imported anywhere are ignored.
    async fn vsys_unimport(
        &self,
        kind: ImportKind,
        tmpl: &str,
        ts: &str,
        names: &[String],
    ) -> Result<(), Error>;

    /// Import `names` into `vsys`.
    async fn vsys_import(
        &self,
        kind: ImportKind,
        tmpl: &str,
        ts: &str,
        vsys: &str,
        names: &[String],
    ) -> Result<(), Error>;

    /// Fire-and-forget audit record of a mutation about to happen.
    fn log_action(&self, message: &str) {
        info!(target: "panofly::audit", "{message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn read_mode_renders_action() {
        assert_eq!(ReadMode::Get.as_ref(), "get");
        assert_eq!(ReadMode::Show.to_string(), "show");
    }

    #[test]
    fn import_kind_renders_node_name() {
        assert_eq!(ImportKind::Interface.as_ref(), "interface");
        assert_eq!(ImportKind::VirtualRouter.as_ref(), "virtual-router");
        assert_eq!("virtual-wire".parse::<ImportKind>().unwrap(), ImportKind::VirtualWire);
    }
}
