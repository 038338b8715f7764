// Ethernet wire generations.
//
// Everything outside the `layer3` block is identical across versions,
// so the entry shell is generic over the layer3 body and each
// generation only differs in which layer3 body it plugs in.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Entry, Mode};
use crate::error::CoreError;
use crate::netw::interface::wire::{
    Empty, Ipv6, NamedList, from_entry, is_false, text, text_num, to_entry, yes_no,
};

pub(super) fn decode<L: Layer3>(entry: &Value) -> Result<Entry, CoreError> {
    from_entry::<EntryWire<L>>(entry).map(EntryWire::into_entry)
}

pub(super) fn encode<L: Layer3>(entry: &Entry) -> Result<Value, CoreError> {
    // An empty group reads back as no group at all.
    if entry.mode == Some(Mode::AggregateGroup) && entry.aggregate_group.as_deref() == Some("") {
        return Err(CoreError::InvalidArgument {
            message: format!("{}: aggregate group name is empty", entry.name),
        });
    }
    to_entry(&EntryWire::<L>::from_entry(entry))
}

/// A generation's `layer3` body.
pub(super) trait Layer3: Serialize + DeserializeOwned {
    fn from_entry(entry: &Entry) -> Self;
    fn apply(self, entry: &mut Entry);
}

// ── Entry shell ──────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct EntryWire<L> {
    #[serde(rename = "@name")]
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    layer3: Option<L>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layer2: Option<Port>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    virtual_wire: Option<Port>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tap: Option<Empty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ha: Option<Empty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decrypt_mirror: Option<Empty>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    aggregate_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_duplex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lacp: Option<Lacp>,
}

impl<L: Layer3> EntryWire<L> {
    fn from_entry(e: &Entry) -> Self {
        let mut wire = Self {
            name: e.name.clone(),
            layer3: None,
            layer2: None,
            virtual_wire: None,
            tap: None,
            ha: None,
            decrypt_mirror: None,
            aggregate_group: None,
            link_speed: e.link_speed.clone(),
            link_duplex: e.link_duplex.clone(),
            link_state: e.link_state.clone(),
            comment: e.comment.clone(),
            lacp: e.lacp_port_priority.map(|p| Lacp {
                port_priority: Some(p),
            }),
        };
        match e.mode {
            Some(Mode::Layer3) => wire.layer3 = Some(L::from_entry(e)),
            Some(Mode::Layer2) => wire.layer2 = Some(Port::from_entry(e)),
            Some(Mode::VirtualWire) => wire.virtual_wire = Some(Port::from_entry(e)),
            Some(Mode::Tap) => wire.tap = Some(Empty {}),
            Some(Mode::Ha) => wire.ha = Some(Empty {}),
            Some(Mode::DecryptMirror) => wire.decrypt_mirror = Some(Empty {}),
            Some(Mode::AggregateGroup) => {
                wire.aggregate_group = Some(e.aggregate_group.clone().unwrap_or_default());
            }
            None => {}
        }
        wire
    }

    fn into_entry(self) -> Entry {
        let mut e = Entry {
            name: self.name,
            link_speed: self.link_speed,
            link_duplex: self.link_duplex,
            link_state: self.link_state,
            comment: self.comment,
            lacp_port_priority: self.lacp.and_then(|l| l.port_priority),
            ..Entry::default()
        };
        if let Some(body) = self.layer3 {
            e.mode = Some(Mode::Layer3);
            body.apply(&mut e);
        } else if let Some(port) = self.layer2 {
            e.mode = Some(Mode::Layer2);
            port.apply(&mut e);
        } else if let Some(port) = self.virtual_wire {
            e.mode = Some(Mode::VirtualWire);
            port.apply(&mut e);
        } else if self.tap.is_some() {
            e.mode = Some(Mode::Tap);
        } else if self.ha.is_some() {
            e.mode = Some(Mode::Ha);
        } else if self.decrypt_mirror.is_some() {
            e.mode = Some(Mode::DecryptMirror);
        } else if let Some(group) = self.aggregate_group {
            e.mode = Some(Mode::AggregateGroup);
            e.aggregate_group = Some(group).filter(|g| !g.is_empty());
        }
        e
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Lacp {
    #[serde(default, with = "text_num", skip_serializing_if = "Option::is_none")]
    port_priority: Option<u32>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Lldp {
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<String>,
}

impl Lldp {
    fn from_entry(e: &Entry) -> Option<Self> {
        (e.lldp_enabled || e.lldp_profile.is_some()).then(|| Self {
            enable: e.lldp_enabled,
            profile: e.lldp_profile.clone(),
        })
    }

    fn apply(lldp: Option<Self>, e: &mut Entry) {
        if let Some(lldp) = lldp {
            e.lldp_enabled = lldp.enable;
            e.lldp_profile = lldp.profile;
        }
    }
}

/// Body of `layer2` and `virtual-wire`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Port {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    netflow_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lldp: Option<Lldp>,
}

impl Port {
    fn from_entry(e: &Entry) -> Self {
        Self {
            netflow_profile: e.netflow_profile.clone(),
            lldp: Lldp::from_entry(e),
        }
    }

    fn apply(self, e: &mut Entry) {
        e.netflow_profile = self.netflow_profile;
        Lldp::apply(self.lldp, e);
    }
}

// ── layer3 building blocks ───────────────────────────────────────────

/// layer3 fields every generation carries.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Layer3Common {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ip: Option<NamedList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ipv6: Option<Ipv6>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interface_management_profile: Option<String>,
    #[serde(default, with = "text_num", skip_serializing_if = "Option::is_none")]
    mtu: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    netflow_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lldp: Option<Lldp>,
}

impl Layer3Common {
    fn from_entry(e: &Entry) -> Self {
        Self {
            ip: NamedList::from_names(&e.static_ips),
            ipv6: Ipv6::from_parts(e.ipv6_enabled, e.ipv6_interface_id.as_ref()),
            interface_management_profile: e.management_profile.clone(),
            mtu: e.mtu,
            netflow_profile: e.netflow_profile.clone(),
            lldp: Lldp::from_entry(e),
        }
    }

    fn apply(self, e: &mut Entry) {
        e.static_ips = NamedList::into_names(self.ip);
        if let Some(ipv6) = self.ipv6 {
            e.ipv6_enabled = ipv6.enabled;
            e.ipv6_interface_id = ipv6.interface_id;
        }
        e.management_profile = self.interface_management_profile;
        e.mtu = self.mtu;
        e.netflow_profile = self.netflow_profile;
        Lldp::apply(self.lldp, e);
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DhcpClient {
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    enable: bool,
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    create_default_route: bool,
    #[serde(default, with = "text_num", skip_serializing_if = "Option::is_none")]
    default_route_metric: Option<u32>,
}

impl DhcpClient {
    fn from_entry(e: &Entry) -> Option<Self> {
        (e.enable_dhcp || e.create_dhcp_default_route || e.dhcp_default_route_metric.is_some())
            .then_some(Self {
                enable: e.enable_dhcp,
                create_default_route: e.create_dhcp_default_route,
                default_route_metric: e.dhcp_default_route_metric,
            })
    }

    fn apply(dhcp: Option<Self>, e: &mut Entry) {
        if let Some(dhcp) = dhcp {
            e.enable_dhcp = dhcp.enable;
            e.create_dhcp_default_route = dhcp.create_default_route;
            e.dhcp_default_route_metric = dhcp.default_route_metric;
        }
    }
}

/// 9.0 DHCP client: adds `send-hostname`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DhcpClientV4 {
    #[serde(flatten)]
    base: DhcpClient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    send_hostname: Option<SendHostname>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SendHostname {
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hostname: Option<String>,
}

impl DhcpClientV4 {
    fn from_entry(e: &Entry) -> Option<Self> {
        let send_hostname = (e.dhcp_send_hostname_enable || e.dhcp_send_hostname_value.is_some())
            .then(|| SendHostname {
                enable: e.dhcp_send_hostname_enable,
                hostname: e.dhcp_send_hostname_value.clone(),
            });
        match (DhcpClient::from_entry(e), send_hostname) {
            (None, None) => None,
            (base, send_hostname) => Some(Self {
                base: base.unwrap_or(DhcpClient {
                    enable: false,
                    create_default_route: false,
                    default_route_metric: None,
                }),
                send_hostname,
            }),
        }
    }

    fn apply(dhcp: Option<Self>, e: &mut Entry) {
        if let Some(dhcp) = dhcp {
            DhcpClient::apply(Some(dhcp.base), e);
            if let Some(send) = dhcp.send_hostname {
                e.dhcp_send_hostname_enable = send.enable;
                e.dhcp_send_hostname_value = send.hostname;
            }
        }
    }
}

/// 7.1 additions: MSS adjustment values and untagged subinterfaces.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MssAdjust {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    adjust_tcp_mss: Option<AdjustTcpMss>,
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    untagged_sub_interface: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct AdjustTcpMss {
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    enable: bool,
    #[serde(default, with = "text_num", skip_serializing_if = "Option::is_none")]
    ipv4_mss_adjustment: Option<u32>,
    #[serde(default, with = "text_num", skip_serializing_if = "Option::is_none")]
    ipv6_mss_adjustment: Option<u32>,
}

impl MssAdjust {
    fn from_entry(e: &Entry) -> Self {
        let adjust = e.adjust_tcp_mss || e.ipv4_mss_adjust.is_some() || e.ipv6_mss_adjust.is_some();
        Self {
            adjust_tcp_mss: adjust.then_some(AdjustTcpMss {
                enable: e.adjust_tcp_mss,
                ipv4_mss_adjustment: e.ipv4_mss_adjust,
                ipv6_mss_adjustment: e.ipv6_mss_adjust,
            }),
            untagged_sub_interface: e.enable_untagged_subinterface,
        }
    }

    fn apply(self, e: &mut Entry) {
        if let Some(mss) = self.adjust_tcp_mss {
            e.adjust_tcp_mss = mss.enable;
            e.ipv4_mss_adjust = mss.ipv4_mss_adjustment;
            e.ipv6_mss_adjust = mss.ipv6_mss_adjustment;
        }
        e.enable_untagged_subinterface = self.untagged_sub_interface;
    }
}

/// 8.1 additions: decrypt forwarding and policing.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Forwarding {
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    decrypt_forward: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policing: Option<Policing>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Policing {
    #[serde(default, with = "text_num", skip_serializing_if = "Option::is_none")]
    rx_rate: Option<u32>,
    #[serde(default, with = "text_num", skip_serializing_if = "Option::is_none")]
    tx_rate: Option<u32>,
}

impl Forwarding {
    fn from_entry(e: &Entry) -> Self {
        let policed = e.rx_policing_rate.is_some() || e.tx_policing_rate.is_some();
        Self {
            decrypt_forward: e.decrypt_forward,
            policing: policed.then_some(Policing {
                rx_rate: e.rx_policing_rate,
                tx_rate: e.tx_policing_rate,
            }),
        }
    }

    fn apply(self, e: &mut Entry) {
        e.decrypt_forward = self.decrypt_forward;
        if let Some(policing) = self.policing {
            e.rx_policing_rate = policing.rx_rate;
            e.tx_policing_rate = policing.tx_rate;
        }
    }
}

// ── layer3 generations ───────────────────────────────────────────────

/// Before 7.1: `adjust-tcp-mss` is a bare flag.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(super) struct Layer3V1 {
    #[serde(flatten)]
    common: Layer3Common,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dhcp_client: Option<DhcpClient>,
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    adjust_tcp_mss: bool,
}

impl Layer3 for Layer3V1 {
    fn from_entry(e: &Entry) -> Self {
        Self {
            common: Layer3Common::from_entry(e),
            dhcp_client: DhcpClient::from_entry(e),
            adjust_tcp_mss: e.adjust_tcp_mss,
        }
    }

    fn apply(self, e: &mut Entry) {
        self.common.apply(e);
        DhcpClient::apply(self.dhcp_client, e);
        e.adjust_tcp_mss = self.adjust_tcp_mss;
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(super) struct Layer3V2 {
    #[serde(flatten)]
    common: Layer3Common,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dhcp_client: Option<DhcpClient>,
    #[serde(flatten)]
    mss: MssAdjust,
}

impl Layer3 for Layer3V2 {
    fn from_entry(e: &Entry) -> Self {
        Self {
            common: Layer3Common::from_entry(e),
            dhcp_client: DhcpClient::from_entry(e),
            mss: MssAdjust::from_entry(e),
        }
    }

    fn apply(self, e: &mut Entry) {
        self.common.apply(e);
        DhcpClient::apply(self.dhcp_client, e);
        self.mss.apply(e);
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(super) struct Layer3V3 {
    #[serde(flatten)]
    common: Layer3Common,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dhcp_client: Option<DhcpClient>,
    #[serde(flatten)]
    mss: MssAdjust,
    #[serde(flatten)]
    forwarding: Forwarding,
}

impl Layer3 for Layer3V3 {
    fn from_entry(e: &Entry) -> Self {
        Self {
            common: Layer3Common::from_entry(e),
            dhcp_client: DhcpClient::from_entry(e),
            mss: MssAdjust::from_entry(e),
            forwarding: Forwarding::from_entry(e),
        }
    }

    fn apply(self, e: &mut Entry) {
        self.common.apply(e);
        DhcpClient::apply(self.dhcp_client, e);
        self.mss.apply(e);
        self.forwarding.apply(e);
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(super) struct Layer3V4 {
    #[serde(flatten)]
    common: Layer3Common,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dhcp_client: Option<DhcpClientV4>,
    #[serde(flatten)]
    mss: MssAdjust,
    #[serde(flatten)]
    forwarding: Forwarding,
}

impl Layer3 for Layer3V4 {
    fn from_entry(e: &Entry) -> Self {
        Self {
            common: Layer3Common::from_entry(e),
            dhcp_client: DhcpClientV4::from_entry(e),
            mss: MssAdjust::from_entry(e),
            forwarding: Forwarding::from_entry(e),
        }
    }

    fn apply(self, e: &mut Entry) {
        self.common.apply(e);
        DhcpClientV4::apply(self.dhcp_client, e);
        self.mss.apply(e);
        self.forwarding.apply(e);
    }
}
