//! Tagged byte sequences
//!
//! A [`FrameItem`] is the unit every layer stores its fields in: a validity
//! flag, an optional bit-mask and the bytes themselves. Setters append, so
//! writing the same item twice concatenates.

use std::fmt;

/// A tagged byte sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameItem {
    valid: bool,
    mask: Option<u8>,
    bytes: Vec<u8>,
}

impl FrameItem {
    /// Create an empty, invalid item with no mask
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, invalid item carrying a mask
    pub fn with_mask(mask: u8) -> Self {
        Self {
            mask: Some(mask),
            ..Self::default()
        }
    }

    /// Append bytes and mark the item valid
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
        self.valid = true;
    }

    /// Append one byte and mark the item valid
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
        self.valid = true;
    }

    /// Replace the contents and mark the item valid
    pub fn replace(&mut self, bytes: Vec<u8>) {
        self.bytes = bytes;
        self.valid = true;
    }

    /// Move the bytes out; the item becomes invalid and its mask is cleared
    pub fn take(&mut self) -> (Vec<u8>, Option<u8>) {
        self.valid = false;
        (std::mem::take(&mut self.bytes), self.mask.take())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the item invalid without touching its bytes
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn mask(&self) -> Option<u8> {
        self.mask
    }

    pub fn set_mask(&mut self, mask: Option<u8>) {
        self.mask = mask;
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Renders `bytes:{0x01,0x02}` or `bytes:{empty}`
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bytes:{")?;
        if self.0.is_empty() {
            f.write_str("empty")?;
        } else {
            for (i, byte) in self.0.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "0x{:02x}", byte)?;
            }
        }
        f.write_str("}")
    }
}

impl fmt::Display for FrameItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{valid:{}", self.valid)?;
        if let Some(mask) = self.mask {
            write!(f, ",mask:0x{:02x}", mask)?;
        }
        write!(f, ",{}}}", HexBytes(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_invalid() {
        let item = FrameItem::new();
        assert!(!item.is_valid());
        assert!(item.is_empty());
        assert_eq!(item.mask(), None);
        assert_eq!(item.to_string(), "{valid:false,bytes:{empty}}");
    }

    #[test]
    fn test_append_concatenates() {
        let mut item = FrameItem::new();
        item.append(&[0x01, 0x02]);
        item.append(&[0x03]);
        assert!(item.is_valid());
        assert_eq!(item.bytes(), &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_take_resets() {
        let mut item = FrameItem::with_mask(0xff);
        item.append(&[0xAB]);

        let (bytes, mask) = item.take();
        assert_eq!(bytes, vec![0xAB]);
        assert_eq!(mask, Some(0xff));
        assert!(!item.is_valid());
        assert!(item.is_empty());
        assert_eq!(item.mask(), None);
    }

    #[test]
    fn test_display_with_mask() {
        let mut item = FrameItem::with_mask(0xff);
        item.append(&[0x0a, 0xff]);
        assert_eq!(item.to_string(), "{valid:true,mask:0xff,bytes:{0x0a,0xff}}");
    }
}
