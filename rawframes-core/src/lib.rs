//! rawframes core library
//!
//! This crate provides the error type, the tagged byte item every layer
//! stores its fields in, enum-keyed field maps and the protocol value types
//! shared by the packet and capture crates.

pub mod error;
pub mod field;
pub mod item;
pub mod packet;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result, Violation};
pub use field::{Field, FieldMap};
pub use item::{FrameItem, HexBytes};
pub use packet::CapturedFrame;
pub use types::*;
