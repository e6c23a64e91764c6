//! ARP layer (Ethernet/IPv4)
//!
//! ```text
//! 00 01 | 08 00 | 06 | 04 | 00 op | body (20 bytes) | 18 x 00
//! ```
//!
//! Request body: querier MAC, querier IP, six zero bytes, target IP; sent
//! from the querier to broadcast. Reply body: target MAC, target IP, querier
//! MAC, querier IP; sent from the target back to the querier.

use crate::ethernet::{EthField, EthernetLayer};
use crate::layer::{check_width, missing_fields, reject, write_fields, Layer};
use bytes::{BufMut, BytesMut};
use rawframes_core::{
    ArpOp, EtherType, Field, FieldMap, FrameItem, MacAddress, Result, IPV4_LEN, MAC_LEN,
};
use std::fmt;
use tracing::debug;

/// Hardware type: Ethernet
pub const HW_TYPE: u16 = 0x0001;

/// Hardware address size
pub const HW_SIZE: u8 = MAC_LEN as u8;

/// Protocol address size
pub const PROTO_SIZE: u8 = IPV4_LEN as u8;

/// Fixed header and addresses
pub const BODY_SIZE: usize = 28;

/// Zero padding after the body, bringing the payload to the Ethernet minimum
pub const PAD_SIZE: usize = 18;

/// ARP fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpField {
    Op,
    Qmac,
    Qip,
    Tmac,
    Tip,
}

impl Field for ArpField {
    const ALL: &'static [Self] = &[
        ArpField::Op,
        ArpField::Qmac,
        ArpField::Qip,
        ArpField::Tmac,
        ArpField::Tip,
    ];

    fn label(self) -> &'static str {
        match self {
            ArpField::Op => "OP",
            ArpField::Qmac => "QMAC",
            ArpField::Qip => "QIP",
            ArpField::Tmac => "TMAC",
            ArpField::Tip => "TIP",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// ARP frame over Ethernet.
///
/// The Ethernet ethertype defaults to IPv4 (0x0800), which is what frames
/// built by this layer have always carried on the wire. Standard ARP uses
/// 0x0806; select it with [`ArpLayer::with_link_ethertype`]. The default is
/// kept until receivers of the existing frames are confirmed to accept 0x0806.
#[derive(Debug, Clone)]
pub struct ArpLayer {
    fields: FieldMap<ArpField>,
    op: ArpOp,
    link_ethertype: EtherType,
    eth: EthernetLayer,
}

const REQUEST_REQUIRED: &[ArpField] = &[
    ArpField::Op,
    ArpField::Qmac,
    ArpField::Qip,
    ArpField::Tip,
];

impl ArpLayer {
    pub fn new() -> Self {
        Self {
            fields: FieldMap::new(),
            op: ArpOp::Nil,
            link_ethertype: EtherType::Ipv4,
            eth: EthernetLayer::new(),
        }
    }

    /// Use `ethertype` in the Ethernet header instead of the IPv4 default
    pub fn with_link_ethertype(mut self, ethertype: EtherType) -> Self {
        self.link_ethertype = ethertype;
        self
    }

    pub fn link_ethertype(&self) -> EtherType {
        self.link_ethertype
    }

    /// Append the operation byte and select the body layout
    pub fn set_op(&mut self, op: ArpOp) {
        self.fields.get_mut(ArpField::Op).push(op as u8);
        self.op = op;
    }

    /// Append the querier (requesting host) MAC
    pub fn set_qmac(&mut self, mac: impl AsRef<[u8]>) -> Result<()> {
        self.set_checked(ArpField::Qmac, mac.as_ref(), MAC_LEN)
    }

    /// Append the querier IP
    pub fn set_qip(&mut self, ip: impl AsRef<[u8]>) -> Result<()> {
        self.set_checked(ArpField::Qip, ip.as_ref(), IPV4_LEN)
    }

    /// Append the target MAC
    pub fn set_tmac(&mut self, mac: impl AsRef<[u8]>) -> Result<()> {
        self.set_checked(ArpField::Tmac, mac.as_ref(), MAC_LEN)
    }

    /// Append the target IP
    pub fn set_tip(&mut self, ip: impl AsRef<[u8]>) -> Result<()> {
        self.set_checked(ArpField::Tip, ip.as_ref(), IPV4_LEN)
    }

    fn set_checked(&mut self, field: ArpField, bytes: &[u8], width: usize) -> Result<()> {
        check_width(field.label(), bytes, width)?;
        self.fields.get_mut(field).append(bytes);
        Ok(())
    }

    pub fn field(&self, field: ArpField) -> &FrameItem {
        self.fields.get(field)
    }

    pub fn op(&self) -> ArpOp {
        self.op
    }

    /// A request carries zeros in place of the target MAC, so it is optional there
    fn required(&self) -> &'static [ArpField] {
        match self.op {
            ArpOp::Request => REQUEST_REQUIRED,
            ArpOp::Reply | ArpOp::Nil => ArpField::ALL,
        }
    }
}

impl Default for ArpLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for ArpLayer {
    fn encapsulate(&mut self) -> Result<()> {
        reject("arp", missing_fields(&self.fields, self.required()))?;

        let qmac = self.fields.bytes(ArpField::Qmac);
        let qip = self.fields.bytes(ArpField::Qip);
        let tmac = self.fields.bytes(ArpField::Tmac);
        let tip = self.fields.bytes(ArpField::Tip);

        let mut buffer = BytesMut::with_capacity(BODY_SIZE + PAD_SIZE);
        buffer.put_u16(HW_TYPE);
        buffer.put_u16(EtherType::Ipv4.to_u16());
        buffer.put_u8(HW_SIZE);
        buffer.put_u8(PROTO_SIZE);
        buffer.put_u8(0x00);
        buffer.put_slice(self.fields.bytes(ArpField::Op));

        let (dmac, smac) = match self.op {
            ArpOp::Request => {
                buffer.put_slice(qmac);
                buffer.put_slice(qip);
                buffer.put_slice(MacAddress::ZERO.as_bytes());
                buffer.put_slice(tip);
                (MacAddress::BROADCAST.as_bytes().to_vec(), qmac.to_vec())
            }
            ArpOp::Reply | ArpOp::Nil => {
                buffer.put_slice(tmac);
                buffer.put_slice(tip);
                buffer.put_slice(qmac);
                buffer.put_slice(qip);
                (qmac.to_vec(), tmac.to_vec())
            }
        };

        buffer.put_bytes(0x00, PAD_SIZE);
        debug!("arp {:?} encapsulated, {} bytes", self.op, buffer.len());

        self.eth.derive(EthField::Dmac, dmac);
        self.eth.derive(EthField::Smac, smac);
        self.eth.derive(
            EthField::Ethertype,
            self.link_ethertype.to_be_bytes().to_vec(),
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

impl fmt::Display for ArpLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{spec:")?;
        write_fields(f, &self.fields, &[])?;
        write!(f, ",frame:{}}}", self.eth)
    }
}
