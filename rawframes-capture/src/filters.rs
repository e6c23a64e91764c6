//! BPF filter expressions for the frames this workspace builds

use rawframes_core::{EtherType, MacAddress};

/// ARP filter
pub fn arp_filter() -> String {
    "arp".to_string()
}

/// IPv4 filter
pub fn ipv4_filter() -> String {
    "ip".to_string()
}

/// IPv4 filter restricted to one protocol number
pub fn ipv4_proto_filter(proto: u8) -> String {
    format!("ip proto {}", proto)
}

/// 802.3x PAUSE and other MAC control frames
pub fn pause_filter() -> String {
    ether_type_filter(EtherType::MacControl.to_u16())
}

/// Frames carrying an 802.1ad service tag
pub fn qinq_filter() -> String {
    ether_type_filter(EtherType::QinQ.to_u16())
}

/// Filter on the outer ethertype
pub fn ether_type_filter(ethertype: u16) -> String {
    format!("ether proto 0x{:04x}", ethertype)
}

/// Frames to or from a MAC address
pub fn ether_host_filter(mac: &MacAddress) -> String {
    format!("ether host {}", mac)
}

/// Frames from a MAC address
pub fn ether_src_filter(mac: &MacAddress) -> String {
    format!("ether src {}", mac)
}

/// Frames to a MAC address
pub fn ether_dst_filter(mac: &MacAddress) -> String {
    format!("ether dst {}", mac)
}

/// Broadcast frames
pub fn broadcast_filter() -> String {
    "ether broadcast".to_string()
}

/// Combine multiple filters with AND logic
pub fn combine_filters(filters: &[&str]) -> String {
    join_filters(filters, " and ")
}

/// Combine multiple filters with OR logic
pub fn combine_filters_or(filters: &[&str]) -> String {
    join_filters(filters, " or ")
}

fn join_filters(filters: &[&str], op: &str) -> String {
    filters
        .iter()
        .map(|f| format!("({})", f))
        .collect::<Vec<_>>()
        .join(op)
}

/// Negate a filter
pub fn not_filter(filter: &str) -> String {
    format!("not ({})", filter)
}
