//! 802.3x PAUSE (MAC control) layer
//!
//! The payload is the PAUSE opcode and the pause time in quanta, padded with
//! zeros to the minimum Ethernet payload. The destination MAC and ethertype
//! are fixed; only the source MAC is left to the caller.

use crate::ethernet::{EthField, EthernetLayer, PAYLOAD_MIN_BYTES};
use crate::layer::Layer;
use bytes::{BufMut, BytesMut};
use rawframes_core::{EtherType, MacAddress, Result};
use std::fmt;
use tracing::debug;

/// MAC control opcode for PAUSE
pub const OPCODE: u16 = 0x0001;

/// Opcode and quanta
pub const BODY_SIZE: usize = 4;

/// Zero padding after the body
pub const PAD_SIZE: usize = PAYLOAD_MIN_BYTES - BODY_SIZE;

/// Pause time used until `set_quanta` is called
pub const DEFAULT_QUANTA: u16 = 1;

/// PAUSE frame over Ethernet
#[derive(Debug, Clone)]
pub struct PauseLayer {
    quanta: u16,
    eth: EthernetLayer,
}

impl PauseLayer {
    pub fn new() -> Self {
        Self {
            quanta: DEFAULT_QUANTA,
            eth: EthernetLayer::new(),
        }
    }

    /// Set the pause time; only the low 16 bits are kept
    pub fn set_quanta(&mut self, quanta: u32) {
        self.quanta = (quanta & 0xFFFF) as u16;
        debug!("pause quanta 0x{:04x}", self.quanta);
    }

    pub fn quanta(&self) -> u16 {
        self.quanta
    }
}

impl Default for PauseLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for PauseLayer {
    fn encapsulate(&mut self) -> Result<()> {
        let mut buffer = BytesMut::with_capacity(PAYLOAD_MIN_BYTES);
        buffer.put_u16(OPCODE);
        buffer.put_u16(self.quanta);
        buffer.put_bytes(0x00, PAD_SIZE);

        self.eth.derive(
            EthField::Dmac,
            MacAddress::PAUSE_MULTICAST.as_bytes().to_vec(),
        );
        self.eth.derive(
            EthField::Ethertype,
            EtherType::MacControl.to_be_bytes().to_vec(),
        );
        self.eth.derive(EthField::Payload, buffer.to_vec());
        self.eth.encapsulate()
    }

    fn ethernet(&self) -> &EthernetLayer {
        &self.eth
    }

    fn ethernet_mut(&mut self) -> &mut EthernetLayer {
        &mut self.eth
    }
}

impl fmt::Display for PauseLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{quanta:0x{:04x},frame:{}}}", self.quanta, self.eth)
    }
}
