//! Protocol value types shared by every layer

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Width of a MAC address field
pub const MAC_LEN: usize = 6;

/// Width of an IPv4 address field
pub const IPV4_LEN: usize = 4;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; MAC_LEN]);

impl MacAddress {
    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const BROADCAST: MacAddress = MacAddress([0xff; MAC_LEN]);

    /// Zero MAC address, used for an unknown ARP target
    pub const ZERO: MacAddress = MacAddress([0x00; MAC_LEN]);

    /// MAC control PAUSE multicast address (01:80:c2:00:00:01)
    pub const PAUSE_MULTICAST: MacAddress = MacAddress([0x01, 0x80, 0xc2, 0x00, 0x00, 0x01]);

    /// Create a new MAC address
    pub const fn new(bytes: [u8; MAC_LEN]) -> Self {
        Self(bytes)
    }

    /// Get bytes as slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }
}

impl AsRef<[u8]> for MacAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; MAC_LEN]> for MacAddress {
    fn from(bytes: [u8; MAC_LEN]) -> Self {
        MacAddress(bytes)
    }
}

impl TryFrom<&[u8]> for MacAddress {
    type Error = Error;

    fn try_from(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; MAC_LEN] = slice
            .try_into()
            .map_err(|_| Error::invalid_width("MAC", MAC_LEN, slice.len()))?;
        Ok(MacAddress(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != MAC_LEN {
            return Err(Error::invalid_width("MAC", MAC_LEN, parts.len()));
        }

        let mut bytes = [0u8; MAC_LEN];
        for (byte, part) in bytes.iter_mut().zip(&parts) {
            *byte = u8::from_str_radix(part, 16).map_err(|_| Error::InvalidMacAddress {
                input: s.to_string(),
                octet: part.to_string(),
            })?;
        }

        Ok(MacAddress(bytes))
    }
}

/// EtherType values this crate knows how to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EtherType {
    /// IPv4 (0x0800)
    Ipv4 = 0x0800,
    /// ARP (0x0806)
    Arp = 0x0806,
    /// 802.1Q VLAN tag (0x8100)
    Vlan = 0x8100,
    /// MAC control / PAUSE flow control (0x8808)
    MacControl = 0x8808,
    /// 802.1ad Q-in-Q service tag (0x88A8)
    QinQ = 0x88A8,
    /// Reserved for local experiments (0xBEE5)
    Reserved = 0xBEE5,
}

impl EtherType {
    /// Numeric value
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Big-endian wire bytes
    pub const fn to_be_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

impl From<EtherType> for u16 {
    fn from(ethertype: EtherType) -> Self {
        ethertype as u16
    }
}

impl TryFrom<u16> for EtherType {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x0800 => Ok(EtherType::Ipv4),
            0x0806 => Ok(EtherType::Arp),
            0x8100 => Ok(EtherType::Vlan),
            0x8808 => Ok(EtherType::MacControl),
            0x88A8 => Ok(EtherType::QinQ),
            0xBEE5 => Ok(EtherType::Reserved),
            other => Err(Error::UnknownValue {
                kind: "EtherType",
                value: other as u32,
            }),
        }
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtherType::Ipv4 => write!(f, "IPv4"),
            EtherType::Arp => write!(f, "ARP"),
            EtherType::Vlan => write!(f, "VLAN"),
            EtherType::MacControl => write!(f, "MAC-Control"),
            EtherType::QinQ => write!(f, "Q-in-Q"),
            EtherType::Reserved => write!(f, "Reserved"),
        }
    }
}

/// ARP operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ArpOp {
    /// No operation selected
    Nil = 0,
    /// ARP Request
    Request = 1,
    /// ARP Reply
    Reply = 2,
}

impl TryFrom<u8> for ArpOp {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ArpOp::Nil),
            1 => Ok(ArpOp::Request),
            2 => Ok(ArpOp::Reply),
            other => Err(Error::UnknownValue {
                kind: "ArpOp",
                value: other as u32,
            }),
        }
    }
}

/// IPv4 protocol numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ipv4Proto {
    /// ICMP (1)
    Icmp = 1,
    /// TCP (6)
    Tcp = 6,
    /// UDP (17)
    Udp = 17,
}

impl TryFrom<u8> for Ipv4Proto {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Ipv4Proto::Icmp),
            6 => Ok(Ipv4Proto::Tcp),
            17 => Ok(Ipv4Proto::Udp),
            other => Err(Error::UnknownValue {
                kind: "Ipv4Proto",
                value: other as u32,
            }),
        }
    }
}
