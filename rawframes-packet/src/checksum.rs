//! Internet checksum for the IPv4 header
//!
//! The header is summed as big-endian 16-bit words into a 32-bit
//! accumulator. The carry is folded back exactly once, so a sum whose fold
//! itself carries is not re-folded; the self-check in [`verify`] catches it.
//!
//! Worked example for `45 00 00 73 00 00 40 00 40 11 00 00 c0 a8 00 01 c0 a8 00 c7`:
//!
//! ```text
//! sum      = 0x4500 + 0x0073 + 0x0000 + 0x4000 + 0x4011
//!          + 0x0000 + 0xc0a8 + 0x0001 + 0xc0a8 + 0x00c7 = 0x2479c
//! folded   = 0x479c + 0x2                               = 0x479e
//! checksum = !0x479e                                    = 0xb861
//! ```

use rawframes_core::{Error, Result};

/// Offset of the checksum field inside an IPv4 header
pub const CHECKSUM_OFFSET: usize = 10;

/// Sum `data` as big-endian words and fold the carry once.
///
/// A trailing odd byte is treated as the high half of a final word.
pub fn accumulate(data: &[u8]) -> u32 {
    let mut sum: u32 = 0;

    let mut chunks = data.chunks_exact(2);
    for chunk in &mut chunks {
        let word = u16::from_be_bytes([chunk[0], chunk[1]]);
        sum = sum.wrapping_add(word as u32);
    }

    if let Some(&byte) = chunks.remainder().first() {
        sum = sum.wrapping_add((byte as u32) << 8);
    }

    (sum & 0xFFFF) + (sum >> 16)
}

/// Zero the checksum field, compute the checksum and store it.
///
/// Fails when `header` ends before the checksum field does.
pub fn generate(header: &mut [u8]) -> Result<u16> {
    if header.len() < CHECKSUM_OFFSET + 2 {
        let available = header.len().saturating_sub(CHECKSUM_OFFSET);
        return Err(Error::invalid_width("checksum", 2, available));
    }

    header[CHECKSUM_OFFSET] = 0;
    header[CHECKSUM_OFFSET + 1] = 0;

    let checksum = !accumulate(header) as u16;
    header[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&checksum.to_be_bytes());
    Ok(checksum)
}

/// True when the header, checksum included, sums to exactly `0xFFFF`
pub fn verify(header: &[u8]) -> bool {
    accumulate(header) == 0xFFFF
}
