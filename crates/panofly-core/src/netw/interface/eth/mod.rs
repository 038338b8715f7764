// ── Ethernet interfaces ──
//
// Physical ports under `network / interface / ethernet`. The wire shape
// changed in 7.1, 8.1 and 9.0; every generation decodes into the same
// `Entry`, dropping the fields it cannot carry.

mod wire;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use panofly_api::{ImportKind, ProtocolVersion};

use crate::codec::{Codec, Schema};
use crate::namespace::{DeleteTarget, Entity, Family, Labels, Namespace};

/// Ethernet interface namespace.
pub type Ethernet = Namespace<EthernetFamily>;

pub fn labels() -> Labels {
    Labels::new("ethernet interface", "ethernet interfaces")
}

/// Operating mode, given on the wire by which mode element is present.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    #[serde(rename = "layer3")]
    #[strum(serialize = "layer3")]
    Layer3,
    #[serde(rename = "layer2")]
    #[strum(serialize = "layer2")]
    Layer2,
    VirtualWire,
    Tap,
    Ha,
    DecryptMirror,
    AggregateGroup,
}

impl Mode {
    /// Modes that belong to the device as a whole rather than a vsys.
    pub const IMPORT_EXEMPT: [Self; 2] = [Self::Ha, Self::AggregateGroup];

    pub fn is_import_exempt(self) -> bool {
        Self::IMPORT_EXEMPT.contains(&self)
    }
}

/// One ethernet interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub name: String,
    pub mode: Option<Mode>,
    pub static_ips: Vec<String>,
    pub enable_dhcp: bool,
    pub create_dhcp_default_route: bool,
    pub dhcp_default_route_metric: Option<u32>,
    pub ipv6_enabled: bool,
    pub ipv6_interface_id: Option<String>,
    pub management_profile: Option<String>,
    pub mtu: Option<u32>,
    pub adjust_tcp_mss: bool,
    pub netflow_profile: Option<String>,
    pub lldp_enabled: bool,
    pub lldp_profile: Option<String>,
    pub link_speed: Option<String>,
    pub link_duplex: Option<String>,
    pub link_state: Option<String>,
    /// Parent aggregate (`ae1`) when `mode` is aggregate-group.
    pub aggregate_group: Option<String>,
    pub comment: Option<String>,
    pub lacp_port_priority: Option<u32>,

    // 7.1+
    pub ipv4_mss_adjust: Option<u32>,
    pub ipv6_mss_adjust: Option<u32>,
    pub enable_untagged_subinterface: bool,

    // 8.1+
    pub decrypt_forward: bool,
    pub rx_policing_rate: Option<u32>,
    pub tx_policing_rate: Option<u32>,

    // 9.0+
    pub dhcp_send_hostname_enable: bool,
    pub dhcp_send_hostname_value: Option<String>,
}

impl Entry {
    pub fn new(name: impl Into<String>, mode: Mode) -> Self {
        Self {
            name: name.into(),
            mode: Some(mode),
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

/// Ethernet wire generations, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EthSchema {
    /// Before 7.1.
    V1,
    /// 7.1: TCP MSS adjustment values, untagged subinterface.
    V2,
    /// 8.1: decrypt forwarding, policing.
    V3,
    /// 9.0: DHCP send-hostname.
    V4,
}

impl Schema for EthSchema {
    type Entry = Entry;

    const ALL: &'static [Self] = &[Self::V1, Self::V2, Self::V3, Self::V4];
    const OLDEST: Self = Self::V1;

    fn min_version(self) -> ProtocolVersion {
        match self {
            Self::V1 => ProtocolVersion::new(0, 0, 0),
            Self::V2 => ProtocolVersion::new(7, 1, 0),
            Self::V3 => ProtocolVersion::new(8, 1, 0),
            Self::V4 => ProtocolVersion::new(9, 0, 0),
        }
    }

    fn codec(self) -> Codec<Entry> {
        match self {
            Self::V1 => Codec::new(wire::decode::<wire::Layer3V1>, wire::encode::<wire::Layer3V1>),
            Self::V2 => Codec::new(wire::decode::<wire::Layer3V2>, wire::encode::<wire::Layer3V2>),
            Self::V3 => Codec::new(wire::decode::<wire::Layer3V3>, wire::encode::<wire::Layer3V3>),
            Self::V4 => Codec::new(wire::decode::<wire::Layer3V4>, wire::encode::<wire::Layer3V4>),
        }
    }
}

/// Family marker for [`Ethernet`].
#[derive(Debug, Clone, Copy)]
pub enum EthernetFamily {}

impl Family for EthernetFamily {
    type Entry = Entry;
    type Schema = EthSchema;

    const SPINE: &'static [&'static str] = &["network", "interface", "ethernet"];
    const BULK_TAG: &'static str = "ethernet";
    const IMPORT_KIND: ImportKind = ImportKind::Interface;

    fn import_eligible(entry: &Entry) -> bool {
        !entry.mode.is_some_and(Mode::is_import_exempt)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::select;
    use strum::IntoEnumIterator;

    #[test]
    fn mode_names_match_wire_keys() {
        let rendered: Vec<String> = Mode::iter().map(|m| m.to_string()).collect();
        assert_eq!(
            rendered,
            [
                "layer3",
                "layer2",
                "virtual-wire",
                "tap",
                "ha",
                "decrypt-mirror",
                "aggregate-group"
            ]
        );
        assert_eq!("virtual-wire".parse::<Mode>().unwrap(), Mode::VirtualWire);
        assert_eq!(serde_json::to_value(Mode::Layer3).unwrap(), "layer3");
    }

    #[test]
    fn exemption_covers_ha_and_aggregate_members() {
        assert!(EthernetFamily::import_eligible(&Entry::new("ethernet1/1", Mode::Layer3)));
        assert!(EthernetFamily::import_eligible(&Entry::new("ethernet1/2", Mode::Tap)));
        assert!(!EthernetFamily::import_eligible(&Entry::new("ethernet1/3", Mode::Ha)));
        assert!(!EthernetFamily::import_eligible(&Entry::new(
            "ethernet1/4",
            Mode::AggregateGroup
        )));
        assert!(EthernetFamily::import_eligible(&Entry {
            name: "ethernet1/5".into(),
            ..Entry::default()
        }));
    }

    #[test]
    fn version_thresholds() {
        let pick = |v: &str| select::<EthSchema>(&v.parse().unwrap());
        assert_eq!(pick("6.1.0"), EthSchema::V1);
        assert_eq!(pick("7.0.9"), EthSchema::V1);
        assert_eq!(pick("7.1.0"), EthSchema::V2);
        assert_eq!(pick("8.0.12"), EthSchema::V2);
        assert_eq!(pick("8.1.0"), EthSchema::V3);
        assert_eq!(pick("9.0.0"), EthSchema::V4);
        assert_eq!(pick("11.1.2-h3"), EthSchema::V4);
    }

    #[test]
    fn entry_file_format_is_snake_case() {
        let entry: Entry = serde_json::from_value(serde_json::json!({
            "name": "ethernet1/1",
            "mode": "layer3",
            "static_ips": ["10.1.1.1/24"],
        }))
        .unwrap();
        assert_eq!(entry.mode, Some(Mode::Layer3));
        assert_eq!(entry.static_ips, vec!["10.1.1.1/24"]);
    }
}
