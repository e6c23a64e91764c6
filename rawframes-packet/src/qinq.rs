//! 802.1ad Q-in-Q service tag insertion

use crate::layer::Layer;
use rawframes_core::{EtherType, Result};

/// Splice a `88 a8 <tci>` tag between the source MAC and the ethertype of
/// any layer's Ethernet frame. Takes effect at the next `encapsulate`.
pub fn insert_qinq<L: Layer + ?Sized>(frame: &mut L, tci: u16) -> Result<()> {
    frame
        .ethernet_mut()
        .insert(EtherType::QinQ.to_be_bytes(), tci.to_be_bytes())
}
