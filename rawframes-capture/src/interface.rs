//! Network interface enumeration and information

use pnet_datalink::{self, NetworkInterface};
use rawframes_core::{Error, MacAddress, Result};
use std::net::IpAddr;

/// Information about a network interface
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Interface name (e.g., "eth0", "wlan0")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// OS interface index
    pub index: u32,
    /// MAC address if available
    pub mac: Option<MacAddress>,
    /// List of IP addresses assigned to this interface
    pub ips: Vec<IpAddr>,
    /// Whether the interface is up
    pub is_up: bool,
    /// Whether the interface is a loopback
    pub is_loopback: bool,
}

impl From<&NetworkInterface> for InterfaceInfo {
    fn from(iface: &NetworkInterface) -> Self {
        let mac = iface
            .mac
            .map(|mac| MacAddress::new([mac.0, mac.1, mac.2, mac.3, mac.4, mac.5]));

        InterfaceInfo {
            name: iface.name.clone(),
            description: iface.description.clone(),
            index: iface.index,
            mac,
            ips: iface.ips.iter().map(|network| network.ip()).collect(),
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

impl InterfaceInfo {
    /// Up, not loopback, and has a hardware address to put in SMAC
    pub fn can_inject(&self) -> bool {
        self.is_up && !self.is_loopback && self.mac.is_some()
    }

    /// Get the primary IPv4 address if available
    pub fn primary_ipv4(&self) -> Option<IpAddr> {
        self.ips
            .iter()
            .find(|ip| matches!(ip, IpAddr::V4(_)))
            .copied()
    }
}

/// List all available network interfaces
pub fn list_interfaces() -> Vec<InterfaceInfo> {
    pnet_datalink::interfaces()
        .iter()
        .map(InterfaceInfo::from)
        .collect()
}

/// Get information about a specific interface by name
pub fn get_interface(name: &str) -> Result<InterfaceInfo> {
    pnet_datalink::interfaces()
        .iter()
        .find(|iface| iface.name == name)
        .map(InterfaceInfo::from)
        .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))
}
