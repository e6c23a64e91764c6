//! The frame buffer at the bottom of every layer stack
//!
//! [`FrameCore`] owns the fully encapsulated wire bytes. Bytes move in with
//! [`FrameCore::give`] and out with [`FrameCore::take`]; [`FrameCore::copy`]
//! leaves them in place. A forward-only cursor walks the buffer one byte at a
//! time and invalidates the frame once it runs off the end.

use rawframes_core::FrameItem;
use std::fmt;
use tracing::trace;

/// Iterator cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Idle,
    Iterating(usize),
}

/// Owns one encapsulated frame
#[derive(Debug, Clone)]
pub struct FrameCore {
    frame: FrameItem,
    cursor: Cursor,
}

impl FrameCore {
    /// Create an empty, invalid frame
    pub fn new() -> Self {
        Self {
            frame: FrameItem::new(),
            cursor: Cursor::Idle,
        }
    }

    /// Move `bytes` into the frame and mark it valid, replacing any previous contents
    pub fn give(&mut self, bytes: Vec<u8>) {
        trace!("frame given {} bytes", bytes.len());
        self.frame.replace(bytes);
        self.cursor = Cursor::Idle;
    }

    /// Duplicate the current bytes without consuming them
    pub fn copy(&self) -> Vec<u8> {
        self.frame.bytes().to_vec()
    }

    /// Duplicate the current bytes and mask without consuming them
    pub fn copy_with_mask(&self) -> (Vec<u8>, Option<u8>) {
        (self.copy(), self.frame.mask())
    }

    /// Move the bytes out, leaving the frame invalid and empty
    pub fn take(&mut self) -> Vec<u8> {
        self.take_with_mask().0
    }

    /// Move the bytes and mask out; the mask returns to its default
    pub fn take_with_mask(&mut self) -> (Vec<u8>, Option<u8>) {
        self.cursor = Cursor::Idle;
        self.frame.take()
    }

    /// Set the mask carried with the frame bytes
    pub fn set_mask(&mut self, mask: Option<u8>) {
        self.frame.set_mask(mask);
    }

    /// Advance the cursor and return the byte under it.
    ///
    /// The first call on a valid frame yields the first byte. Running past the
    /// end returns `None`, invalidates the frame and parks the cursor, so the
    /// next call only yields again once the frame has been refilled.
    pub fn next_byte(&mut self) -> Option<u8> {
        if !self.frame.is_valid() {
            self.cursor = Cursor::Idle;
            return None;
        }

        let position = match self.cursor {
            Cursor::Idle => 0,
            Cursor::Iterating(position) => position + 1,
        };

        match self.frame.bytes().get(position) {
            Some(&byte) => {
                self.cursor = Cursor::Iterating(position);
                Some(byte)
            }
            None => {
                self.frame.invalidate();
                self.cursor = Cursor::Idle;
                None
            }
        }
    }

    /// Iterate the remaining bytes through [`FrameCore::next_byte`]
    pub fn bytes(&mut self) -> FrameBytes<'_> {
        FrameBytes { core: self }
    }

    pub fn is_valid(&self) -> bool {
        self.frame.is_valid()
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    /// Borrow the frame bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.frame.bytes()
    }

    /// Render `{frame:<item>}`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl Default for FrameCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{frame:{}}}", self.frame)
    }
}

/// Byte stream over a [`FrameCore`]; exhausting it invalidates the frame
pub struct FrameBytes<'a> {
    core: &'a mut FrameCore,
}

impl Iterator for FrameBytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.core.next_byte()
    }
}
