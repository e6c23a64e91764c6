//! IPv4 layer
//!
//! Builds a fixed 20-byte header (no options, don't-fragment set), fills in
//! and self-checks the header checksum, then sets header + payload as the
//! Ethernet payload with ethertype IPv4.

use crate::checksum;
use crate::ethernet::{EthField, EthernetLayer};
use crate::layer::{check_width, missing_fields, reject, write_fields, Layer};
use bytes::{BufMut, BytesMut};
use rawframes_core::{
    Error, EtherType, Field, FieldMap, FrameItem, Ipv4Proto, Result, Violation, IPV4_LEN,
};
use std::fmt;
use tracing::{debug, error};

/// Header size in bytes
pub const HEADER_SIZE: usize = 20;

/// Largest value the total length field can hold
pub const MAX_PACKET_SIZE: usize = 65535;

const VERSION: u8 = 4;
const IHL: u8 = (HEADER_SIZE / 4) as u8;
const TOS: u8 = 0x00;
/// Identification 0, flags don't-fragment, offset 0
const FRAGMENT: [u8; 4] = [0x00, 0x00, 0x40, 0x00];
const TTL: u8 = 0x20;

/// IPv4 fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4Field {
    Proto,
    Sip,
    Dip,
    Payload,
}

impl Field for Ipv4Field {
    const ALL: &'static [Self] = &[
        Ipv4Field::Proto,
        Ipv4Field::Sip,
        Ipv4Field::Dip,
        Ipv4Field::Payload,
    ];

    fn label(self) -> &'static str {
        match self {
            Ipv4Field::Proto => "PROTO",
            Ipv4Field::Sip => "SIP",
            Ipv4Field::Dip => "DIP",
            Ipv4Field::Payload => "PAYLOAD",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

const REQUIRED: &[Ipv4Field] = &[Ipv4Field::Proto, Ipv4Field::Sip, Ipv4Field::Dip];

/// IPv4 packet over Ethernet
#[derive(Debug, Clone, Default)]
pub struct Ipv4Layer {
    fields: FieldMap<Ipv4Field>,
    checksum: u16,
    eth: EthernetLayer,
}

impl Ipv4Layer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the protocol byte
    pub fn set_proto(&mut self, proto: Ipv4Proto) {
        self.fields.get_mut(Ipv4Field::Proto).push(proto as u8);
    }

    /// Append a 4-byte source address
    pub fn set_sip(&mut self, ip: impl AsRef<[u8]>) -> Result<()> {
        self.set_ip(Ipv4Field::Sip, ip.as_ref())
    }

    /// Append a 4-byte destination address
    pub fn set_dip(&mut self, ip: impl AsRef<[u8]>) -> Result<()> {
        self.set_ip(Ipv4Field::Dip, ip.as_ref())
    }

    fn set_ip(&mut self, field: Ipv4Field, ip: &[u8]) -> Result<()> {
        check_width(field.label(), ip, IPV4_LEN)?;
        self.fields.get_mut(field).append(ip);
        Ok(())
    }

    /// Append payload bytes
    pub fn set_payload(&mut self, bytes: impl AsRef<[u8]>) {
        self.fields
            .get_mut(Ipv4Field::Payload)
            .append(bytes.as_ref());
    }

    pub fn field(&self, field: Ipv4Field) -> &FrameItem {
        self.fields.get(field)
    }

    /// Checksum stored by the last successful `encapsulate`
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    fn total_length(&self) -> usize {
        HEADER_SIZE + self.fields.get(Ipv4Field::Payload).len()
    }

    fn header(&self, total_length: u16) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(HEADER_SIZE);

        buffer.put_u8((VERSION << 4) | IHL);
        buffer.put_u8(TOS);
        buffer.put_u16(total_length);
        buffer.put_slice(&FRAGMENT);
        buffer.put_u8(TTL);
        buffer.put_slice(&self.fields.bytes(Ipv4Field::Proto)[..1]);
        buffer.put_u16(0);
        buffer.put_slice(&self.fields.bytes(Ipv4Field::Sip)[..IPV4_LEN]);
        buffer.put_slice(&self.fields.bytes(Ipv4Field::Dip)[..IPV4_LEN]);

        buffer.to_vec()
    }
}

impl Layer for Ipv4Layer {
    fn encapsulate(&mut self) -> Result<()> {
        let total_length = self.total_length();

        let mut violations = missing_fields(&self.fields, REQUIRED);
        if total_length > MAX_PACKET_SIZE {
            violations.push(Violation::LengthExceeded {
                total: total_length,
                max: MAX_PACKET_SIZE,
            });
        }
        reject("ipv4", violations)?;

        let mut packet = self.header(total_length as u16);
        let checksum = checksum::generate(&mut packet)?;

        if !checksum::verify(&packet) {
            let folded = checksum::accumulate(&packet);
            error!(
                "header checksum 0x{:04x} failed verification, sum 0x{:x}",
                checksum, folded
            );
            return Err(Error::ChecksumMismatch { checksum, folded });
        }
        self.checksum = checksum;

        packet.extend_from_slice(self.fields.bytes(Ipv4Field::Payload));
        debug!(
            "ipv4 packet encapsulated, {} bytes, checksum 0x{:04x}",
            packet.len(),
            checksum
        );

        self.eth
            .derive(EthField::Ethertype, EtherType::Ipv4.to_be_bytes().to_vec());
        self.eth.derive(EthField::Payload, packet);
        self.eth.encapsulate()
    }

    fn ethernet(&self) -> &EthernetLayer {
        &self.eth
    }

    fn ethernet_mut(&mut self) -> &mut EthernetLayer {
        &mut self.eth
    }
}

impl fmt::Display for Ipv4Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{spec:")?;
        write_fields(f, &self.fields, &[])?;
        write!(f, ",frame:{}}}", self.eth)
    }
}
