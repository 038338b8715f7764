// Vsys import management
//
// Resources configured in a template are only usable by a vsys once they
// are listed under that vsys's `import/network/<kind>` node. Membership is
// exclusive, so unimport sweeps every vsys at once.

use serde_json::json;
use tracing::debug;

use crate::client::ImportKind;
use crate::error::Error;
use crate::xapi::client::HttpXapiClient;
use crate::xpath::{Xpath, as_entry_xpath, as_member_xpath, device_root, template_prefix};

/// Root of the scoped device config: the template / template-stack
/// subtree when either is given, the device itself otherwise.
fn scoped_root(tmpl: &str, ts: &str) -> Xpath {
    let base = if tmpl.is_empty() && ts.is_empty() {
        Xpath::new()
    } else {
        template_prefix(tmpl, ts)
    };
    base.join(device_root().segments().iter().cloned())
}

/// `.../vsys/entry[@name='<vsys>']/import/network/<kind>`, or every vsys
/// when `vsys` is `None`.
pub(crate) fn import_xpath(kind: ImportKind, tmpl: &str, ts: &str, vsys: Option<&str>) -> Xpath {
    let vsys_entry = match vsys {
        Some(name) => as_entry_xpath(&[name]),
        None => as_entry_xpath::<&str>(&[]),
    };
    scoped_root(tmpl, ts).join([
        "vsys".to_owned(),
        vsys_entry,
        "import".to_owned(),
        "network".to_owned(),
        kind.as_ref().to_owned(),
    ])
}

impl HttpXapiClient {
    /// Remove `names` from every vsys import list.
    ///
    /// A single delete of `.../vsys/entry/import/network/<kind>/member[...]`.
    /// "Object doesn't exist" is treated as success.
    pub async fn unimport(
        &self,
        kind: ImportKind,
        tmpl: &str,
        ts: &str,
        names: &[String],
    ) -> Result<(), Error> {
        if names.is_empty() {
            return Ok(());
        }
        debug!(%kind, ?names, "removing vsys imports");
        let mut xpath = import_xpath(kind, tmpl, ts, None);
        xpath.push(as_member_xpath(names));
        match self.config_delete(&xpath).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Add `names` to the import list of `vsys`.
    ///
    /// `set` of `{"member": [...]}` at the vsys import node.
    pub async fn import(
        &self,
        kind: ImportKind,
        tmpl: &str,
        ts: &str,
        vsys: &str,
        names: &[String],
    ) -> Result<(), Error> {
        if names.is_empty() {
            return Ok(());
        }
        debug!(%kind, vsys, ?names, "importing into vsys");
        let xpath = import_xpath(kind, tmpl, ts, Some(vsys));
        self.config_set(&xpath, &json!({ "member": names })).await?;
        Ok(())
    }
}
