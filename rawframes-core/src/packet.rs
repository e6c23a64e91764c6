//! Frames handed back by a capture driver

/// A frame as reported by the driver, before truncation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Captured bytes
    pub data: Vec<u8>,
    /// Bytes actually captured
    pub caplen: u32,
    /// Length of the frame on the wire
    pub len: u32,
}

impl CapturedFrame {
    /// Create a frame whose captured and wire lengths both equal `data.len()`
    pub fn new(data: Vec<u8>) -> Self {
        let len = data.len() as u32;
        Self {
            data,
            caplen: len,
            len,
        }
    }

    /// The bytes that are both captured and on the wire
    pub fn into_truncated(mut self) -> Vec<u8> {
        let keep = self.caplen.min(self.len) as usize;
        self.data.truncate(keep);
        self.data
    }

    /// Get packet length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if packet is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
