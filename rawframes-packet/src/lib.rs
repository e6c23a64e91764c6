//! Layered link-layer frame construction for rawframes
//!
//! A frame is built top-down: configure a protocol layer field by field, then
//! call [`Layer::encapsulate`]. Each layer validates its own required fields,
//! serializes its header and hands the result to the [`EthernetLayer`] it
//! owns, which writes the final wire bytes into a [`FrameCore`].
//!
//! - [`ethernet`] - Ethernet II with an optional inserted tag
//! - [`ip`] - IPv4 with a self-verified header checksum
//! - [`arp`] - ARP request/reply over Ethernet
//! - [`pause`] - 802.3x PAUSE flow control
//! - [`qinq`] - 802.1ad service tag insertion
//! - [`checksum`] - Internet checksum
//! - [`frame`] - the frame buffer and its byte cursor
//!
//! # Building an IPv4 frame
//!
//! ```rust
//! use rawframes_core::Ipv4Proto;
//! use rawframes_packet::{Ipv4Layer, Layer};
//!
//! # fn main() -> rawframes_core::Result<()> {
//! let mut ip = Ipv4Layer::new();
//! ip.set_proto(Ipv4Proto::Udp);
//! ip.set_sip([192, 168, 1, 1])?;
//! ip.set_dip([192, 168, 1, 2])?;
//! ip.set_payload([0xde, 0xad, 0xbe, 0xef]);
//! ip.ethernet_mut().set_dmac([0x02, 0x00, 0x00, 0x00, 0x00, 0x02])?;
//! ip.ethernet_mut().set_smac([0x02, 0x00, 0x00, 0x00, 0x00, 0x01])?;
//!
//! ip.encapsulate()?;
//! let wire = ip.core_mut().take();
//! assert_eq!(wire.len(), 14 + 20 + 4);
//! # Ok(())
//! # }
//! ```
//!
//! # Walking a frame byte by byte
//!
//! ```rust
//! use rawframes_packet::FrameCore;
//!
//! let mut core = FrameCore::new();
//! core.give(vec![0x01, 0x02, 0x03]);
//!
//! let bytes: Vec<u8> = core.bytes().collect();
//! assert_eq!(bytes, vec![0x01, 0x02, 0x03]);
//! assert!(!core.is_valid());
//! ```

pub mod arp;
pub mod checksum;
pub mod ethernet;
pub mod frame;
pub mod ip;
pub mod layer;
pub mod pause;
pub mod qinq;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use arp::{ArpField, ArpLayer};
pub use ethernet::{EthField, EthernetLayer};
pub use frame::{FrameBytes, FrameCore};
pub use ip::{Ipv4Field, Ipv4Layer};
pub use layer::Layer;
pub use pause::PauseLayer;
pub use qinq::insert_qinq;
