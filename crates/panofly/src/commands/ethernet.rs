//! Ethernet interface views.

use tabled::Tabled;

use panofly_core::eth::{Entry, EthernetFamily};

use super::InterfaceView;
use super::util::{flag, opt};
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct EthernetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Addresses")]
    addresses: String,
    #[tabled(rename = "DHCP")]
    dhcp: String,
    #[tabled(rename = "Group")]
    aggregate_group: String,
    #[tabled(rename = "Comment")]
    comment: String,
}

impl From<&Entry> for EthernetRow {
    fn from(e: &Entry) -> Self {
        Self {
            name: e.name.clone(),
            mode: opt(e.mode.as_ref()),
            addresses: e.static_ips.join(", "),
            dhcp: flag(e.enable_dhcp),
            aggregate_group: opt(e.aggregate_group.as_ref()),
            comment: opt(e.comment.as_ref()),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

fn detail(e: &Entry) -> String {
    output::detail(&[
        ("Name", e.name.clone()),
        ("Mode", opt(e.mode.as_ref())),
        ("Addresses", e.static_ips.join(", ")),
        ("DHCP client", flag(e.enable_dhcp)),
        ("DHCP default route", flag(e.create_dhcp_default_route)),
        ("DHCP route metric", opt(e.dhcp_default_route_metric.as_ref())),
        ("DHCP send hostname", flag(e.dhcp_send_hostname_enable)),
        ("DHCP hostname", opt(e.dhcp_send_hostname_value.as_ref())),
        ("IPv6", flag(e.ipv6_enabled)),
        ("IPv6 interface ID", opt(e.ipv6_interface_id.as_ref())),
        ("Management profile", opt(e.management_profile.as_ref())),
        ("MTU", opt(e.mtu.as_ref())),
        ("Adjust TCP MSS", flag(e.adjust_tcp_mss)),
        ("IPv4 MSS adjust", opt(e.ipv4_mss_adjust.as_ref())),
        ("IPv6 MSS adjust", opt(e.ipv6_mss_adjust.as_ref())),
        ("Untagged subinterface", flag(e.enable_untagged_subinterface)),
        ("Decrypt forward", flag(e.decrypt_forward)),
        ("RX policing rate", opt(e.rx_policing_rate.as_ref())),
        ("TX policing rate", opt(e.tx_policing_rate.as_ref())),
        ("NetFlow profile", opt(e.netflow_profile.as_ref())),
        ("LLDP", flag(e.lldp_enabled)),
        ("LLDP profile", opt(e.lldp_profile.as_ref())),
        ("Link speed", opt(e.link_speed.as_ref())),
        ("Link duplex", opt(e.link_duplex.as_ref())),
        ("Link state", opt(e.link_state.as_ref())),
        ("Aggregate group", opt(e.aggregate_group.as_ref())),
        ("LACP port priority", opt(e.lacp_port_priority.as_ref())),
        ("Comment", opt(e.comment.as_ref())),
    ])
}

impl InterfaceView for EthernetFamily {
    type Row = EthernetRow;

    const COMMAND: &'static str = "ethernet";

    fn row(entry: &Entry) -> EthernetRow {
        EthernetRow::from(entry)
    }

    fn detail(entry: &Entry) -> String {
        detail(entry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use panofly_core::eth::Mode;

    #[test]
    fn row_shows_mode_and_group() {
        let entry = Entry {
            aggregate_group: Some("ae1".into()),
            ..Entry::new("ethernet1/5", Mode::AggregateGroup)
        };
        let row = EthernetRow::from(&entry);
        assert_eq!(row.mode, "aggregate-group");
        assert_eq!(row.aggregate_group, "ae1");
        assert_eq!(row.dhcp, "");
    }

    #[test]
    fn detail_lists_only_set_fields() {
        let entry = Entry {
            static_ips: vec!["10.0.0.1/24".into()],
            mtu: Some(9000),
            ..Entry::new("ethernet1/1", Mode::Layer3)
        };
        let out = detail(&entry);
        assert!(out.contains("layer3"));
        assert!(out.contains("10.0.0.1/24"));
        assert!(out.contains("9000"));
        assert!(!out.contains("Comment"));
    }
}
