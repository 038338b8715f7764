// ── Tunnel interfaces ──
//
// Logical `tunnel.N` units under `network / interface / tunnel / units`.
// One wire generation, and every unit is imported into the target vsys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use panofly_api::{ImportKind, ProtocolVersion};

use crate::codec::{Codec, Schema};
use crate::error::CoreError;
use crate::namespace::{DeleteTarget, Entity, Family, Labels, Namespace};
use crate::netw::interface::wire::{Ipv6, NamedList, from_entry, text_num, to_entry};

/// Tunnel interface namespace.
pub type Tunnel = Namespace<TunnelFamily>;

pub fn labels() -> Labels {
    Labels::new("tunnel interface", "tunnel interfaces")
}

/// One tunnel interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub name: String,
    pub comment: Option<String>,
    pub netflow_profile: Option<String>,
    pub static_ips: Vec<String>,
    pub management_profile: Option<String>,
    pub mtu: Option<u32>,
    pub ipv6_enabled: bool,
    pub ipv6_interface_id: Option<String>,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Entity for Entry {
    fn name(&self) -> &str {
        &self.name
    }
}

impl From<Entry> for DeleteTarget<Entry> {
    fn from(entry: Entry) -> Self {
        Self::ByEntity(entry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TunnelSchema {
    V1,
}

impl Schema for TunnelSchema {
    type Entry = Entry;

    const ALL: &'static [Self] = &[Self::V1];
    const OLDEST: Self = Self::V1;

    fn min_version(self) -> ProtocolVersion {
        ProtocolVersion::new(0, 0, 0)
    }

    fn codec(self) -> Codec<Entry> {
        Codec::new(decode, encode)
    }
}

/// Family marker for [`Tunnel`].
#[derive(Debug, Clone, Copy)]
pub enum TunnelFamily {}

impl Family for TunnelFamily {
    type Entry = Entry;
    type Schema = TunnelSchema;

    const SPINE: &'static [&'static str] = &["network", "interface", "tunnel", "units"];
    const BULK_TAG: &'static str = "units";
    const IMPORT_KIND: ImportKind = ImportKind::Interface;
}

// ── Wire ─────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct EntryWire {
    #[serde(rename = "@name")]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    netflow_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ip: Option<NamedList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interface_management_profile: Option<String>,
    #[serde(default, with = "text_num", skip_serializing_if = "Option::is_none")]
    mtu: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ipv6: Option<Ipv6>,
}

fn decode(entry: &Value) -> Result<Entry, CoreError> {
    let wire: EntryWire = from_entry(entry)?;
    let ipv6 = wire.ipv6.unwrap_or_default();
    Ok(Entry {
        name: wire.name,
        comment: wire.comment,
        netflow_profile: wire.netflow_profile,
        static_ips: NamedList::into_names(wire.ip),
        management_profile: wire.interface_management_profile,
        mtu: wire.mtu,
        ipv6_enabled: ipv6.enabled,
        ipv6_interface_id: ipv6.interface_id,
    })
}

fn encode(e: &Entry) -> Result<Value, CoreError> {
    to_entry(&EntryWire {
        name: e.name.clone(),
        comment: e.comment.clone(),
        netflow_profile: e.netflow_profile.clone(),
        ip: NamedList::from_names(&e.static_ips),
        interface_management_profile: e.management_profile.clone(),
        mtu: e.mtu,
        ipv6: Ipv6::from_parts(e.ipv6_enabled, e.ipv6_interface_id.as_ref()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::select;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn round_trip_keeps_every_field() {
        let entry = Entry {
            name: "tunnel.10".into(),
            comment: Some("to branch".into()),
            netflow_profile: Some("nf1".into()),
            static_ips: vec!["169.254.0.1/30".into()],
            management_profile: Some("allow-ping".into()),
            mtu: Some(1400),
            ipv6_enabled: true,
            ipv6_interface_id: Some("EUI-64".into()),
        };
        let codec = TunnelSchema::V1.codec();
        let wire = codec.encode(&entry).unwrap();
        assert_eq!(codec.decode(&json!({ "entry": wire })).unwrap(), vec![entry]);
    }

    #[test]
    fn minimal_wire_shape() {
        let wire = TunnelSchema::V1.codec().encode(&Entry::new("tunnel.1")).unwrap();
        assert_eq!(wire, json!({ "@name": "tunnel.1" }));
    }

    #[test]
    fn every_version_uses_the_single_variant() {
        for v in ["6.0.0", "8.1.0", "10.2.0"] {
            assert_eq!(select::<TunnelSchema>(&v.parse().unwrap()), TunnelSchema::V1);
        }
    }

    #[test]
    fn tunnels_always_import() {
        assert!(TunnelFamily::import_eligible(&Entry::new("tunnel.1")));
    }
}
