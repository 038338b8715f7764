//! Tunnel interface views.

use tabled::Tabled;

use panofly_core::tunnel::{Entry, TunnelFamily};

use super::InterfaceView;
use super::util::{flag, opt};
use crate::output;

#[derive(Tabled)]
pub struct TunnelRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Addresses")]
    addresses: String,
    #[tabled(rename = "MTU")]
    mtu: String,
    #[tabled(rename = "Profile")]
    management_profile: String,
    #[tabled(rename = "Comment")]
    comment: String,
}

impl From<&Entry> for TunnelRow {
    fn from(e: &Entry) -> Self {
        Self {
            name: e.name.clone(),
            addresses: e.static_ips.join(", "),
            mtu: opt(e.mtu.as_ref()),
            management_profile: opt(e.management_profile.as_ref()),
            comment: opt(e.comment.as_ref()),
        }
    }
}

impl InterfaceView for TunnelFamily {
    type Row = TunnelRow;

    const COMMAND: &'static str = "tunnel";

    fn row(entry: &Entry) -> TunnelRow {
        TunnelRow::from(entry)
    }

    fn detail(e: &Entry) -> String {
        output::detail(&[
            ("Name", e.name.clone()),
            ("Addresses", e.static_ips.join(", ")),
            ("IPv6", flag(e.ipv6_enabled)),
            ("IPv6 interface ID", opt(e.ipv6_interface_id.as_ref())),
            ("Management profile", opt(e.management_profile.as_ref())),
            ("MTU", opt(e.mtu.as_ref())),
            ("NetFlow profile", opt(e.netflow_profile.as_ref())),
            ("Comment", opt(e.comment.as_ref())),
        ])
    }
}
