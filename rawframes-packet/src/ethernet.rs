//! Ethernet II layer
//!
//! Serializes `dmac ++ smac ++ [inserted tag] ++ ethertype ++ payload` and
//! hands the result to the [`FrameCore`].

use crate::frame::FrameCore;
use crate::layer::{check_width, missing_fields, reject, write_fields, Layer};
use bytes::{BufMut, BytesMut};
use rawframes_core::{Field, FieldMap, FrameItem, Result, MAC_LEN};
use std::fmt;
use tracing::debug;

/// Minimum Ethernet payload size
pub const PAYLOAD_MIN_BYTES: usize = 46;

/// Maximum Ethernet payload size (MTU)
pub const PAYLOAD_MAX_BYTES: usize = 1500;

/// Ethernet header size (dst + src + type)
pub const HEADER_SIZE: usize = 14;

/// Minimum frame size without FCS
pub const FRAME_MIN_BYTES: usize = PAYLOAD_MIN_BYTES + HEADER_SIZE;

/// Width of the type half of an inserted tag
pub const TAG_TYPE_LEN: usize = 2;

/// Ethernet fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthField {
    Dmac,
    Smac,
    EthertypeInsert,
    Ethertype,
    Payload,
}

impl Field for EthField {
    const ALL: &'static [Self] = &[
        EthField::Dmac,
        EthField::Smac,
        EthField::EthertypeInsert,
        EthField::Ethertype,
        EthField::Payload,
    ];

    fn label(self) -> &'static str {
        match self {
            EthField::Dmac => "DMAC",
            EthField::Smac => "SMAC",
            EthField::EthertypeInsert => "ETHERTYPE_INSERT",
            EthField::Ethertype => "ETHERTYPE",
            EthField::Payload => "PAYLOAD",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

const REQUIRED: &[EthField] = &[
    EthField::Dmac,
    EthField::Smac,
    EthField::Ethertype,
    EthField::Payload,
];

/// Ethernet II frame under construction
#[derive(Debug, Clone, Default)]
pub struct EthernetLayer {
    fields: FieldMap<EthField>,
    core: FrameCore,
}

impl EthernetLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a 6-byte destination MAC
    pub fn set_dmac(&mut self, mac: impl AsRef<[u8]>) -> Result<()> {
        self.set_mac(EthField::Dmac, mac.as_ref())
    }

    /// Append a 6-byte source MAC
    pub fn set_smac(&mut self, mac: impl AsRef<[u8]>) -> Result<()> {
        self.set_mac(EthField::Smac, mac.as_ref())
    }

    fn set_mac(&mut self, field: EthField, mac: &[u8]) -> Result<()> {
        check_width(field.label(), mac, MAC_LEN)?;
        self.fields.get_mut(field).append(mac);
        Ok(())
    }

    /// Append a 16-bit ethertype, big-endian. Accepts raw values as well as `EtherType`.
    pub fn set_ethertype(&mut self, ethertype: impl Into<u16>) {
        let ethertype = ethertype.into();
        debug!("ethertype 0x{:04x}", ethertype);
        self.fields
            .get_mut(EthField::Ethertype)
            .append(&ethertype.to_be_bytes());
    }

    /// Append payload bytes
    pub fn set_payload(&mut self, bytes: impl AsRef<[u8]>) {
        self.fields.get_mut(EthField::Payload).append(bytes.as_ref());
    }

    /// Append a tag spliced between the source MAC and the ethertype.
    ///
    /// `tag_type` must be exactly 2 bytes; `bytes` follows it unchecked.
    pub fn insert(&mut self, tag_type: impl AsRef<[u8]>, bytes: impl AsRef<[u8]>) -> Result<()> {
        let tag_type = tag_type.as_ref();
        check_width(EthField::EthertypeInsert.label(), tag_type, TAG_TYPE_LEN)?;

        let item = self.fields.get_mut(EthField::EthertypeInsert);
        item.append(tag_type);
        item.append(bytes.as_ref());
        Ok(())
    }

    /// Current contents of one field
    pub fn field(&self, field: EthField) -> &FrameItem {
        self.fields.get(field)
    }

    /// Overwrite a field computed by the layer above
    pub(crate) fn derive(&mut self, field: EthField, bytes: Vec<u8>) {
        self.fields.get_mut(field).replace(bytes);
    }
}

impl Layer for EthernetLayer {
    fn encapsulate(&mut self) -> Result<()> {
        reject("ethernet", missing_fields(&self.fields, REQUIRED))?;

        let insert = self.fields.get(EthField::EthertypeInsert);
        let size = EthField::ALL
            .iter()
            .map(|field| self.fields.get(*field).len())
            .sum();
        let mut buffer = BytesMut::with_capacity(size);

        buffer.put_slice(self.fields.bytes(EthField::Dmac));
        buffer.put_slice(self.fields.bytes(EthField::Smac));
        if insert.is_valid() {
            buffer.put_slice(insert.bytes());
        }
        buffer.put_slice(self.fields.bytes(EthField::Ethertype));
        buffer.put_slice(self.fields.bytes(EthField::Payload));

        debug!("ethernet frame encapsulated, {} bytes", buffer.len());
        self.core.give(buffer.to_vec());
        Ok(())
    }

    fn ethernet(&self) -> &EthernetLayer {
        self
    }

    fn ethernet_mut(&mut self) -> &mut EthernetLayer {
        self
    }

    fn core(&self) -> &FrameCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FrameCore {
        &mut self.core
    }
}

impl fmt::Display for EthernetLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{spec:")?;
        write_fields(f, &self.fields, &[EthField::EthertypeInsert])?;
        write!(f, ",frame:{}}}", self.core)
    }
}
