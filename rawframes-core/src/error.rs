//! Error types for rawframes

use std::fmt;
use thiserror::Error;

/// Result type alias for rawframes operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single reason why a layer refused to encapsulate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A required field was never set
    Missing(&'static str),
    /// The serialized length would not fit its length field
    LengthExceeded { total: usize, max: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing(field) => write!(f, "missing {}", field),
            Violation::LengthExceeded { total, max } => {
                write!(f, "length {} exceeds {}", total, max)
            }
        }
    }
}

/// Joins violations for the `Encapsulation` message
struct Violations<'a>(&'a [Violation]);

impl fmt::Display for Violations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// Main error type for rawframes
#[derive(Error, Debug)]
pub enum Error {
    /// Fixed-width field given the wrong number of bytes
    #[error("Field '{field}' must be {expected} bytes, got {actual}")]
    InvalidFieldWidth {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// One or more required fields missing, or a length limit exceeded
    #[error("Cannot encapsulate {layer}: {}", Violations(.violations))]
    Encapsulation {
        layer: &'static str,
        violations: Vec<Violation>,
    },

    /// Generated header checksum failed its own verification
    #[error("Header checksum 0x{checksum:04x} failed verification (folded sum 0x{folded:x})")]
    ChecksumMismatch { checksum: u16, folded: u32 },

    /// Numeric value outside a closed enumeration
    #[error("Unknown {kind} value 0x{value:x}")]
    UnknownValue { kind: &'static str, value: u32 },

    /// Text that is not a colon-separated hex MAC address
    #[error("Invalid MAC address '{input}': bad octet '{octet}'")]
    InvalidMacAddress { input: String, octet: String },

    /// Interface not found
    #[error("Interface '{0}' not found")]
    InterfaceNotFound(String),

    /// Driver used before `open` or after `close`
    #[error("Capture device is not open")]
    NotOpen,

    /// Receive timed out without a frame
    #[error("Receive timed out")]
    Timeout,

    /// Savefile or stream exhausted
    #[error("End of capture stream")]
    EndOfStream,

    /// Transmit requested for a frame that holds no bytes
    #[error("No valid frame to transmit")]
    EmptyFrame,

    /// Capture/injection driver failure
    #[error("Packet capture error: {0}")]
    Capture(String),
}

impl Error {
    /// Create a capture error with a custom message
    pub fn capture<S: Into<String>>(msg: S) -> Self {
        Error::Capture(msg.into())
    }

    /// Create an invalid width error
    pub fn invalid_width(field: &'static str, expected: usize, actual: usize) -> Self {
        Error::InvalidFieldWidth {
            field,
            expected,
            actual,
        }
    }

    /// Violations carried by an `Encapsulation` error, empty otherwise
    pub fn violations(&self) -> &[Violation] {
        match self {
            Error::Encapsulation { violations, .. } => violations,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encapsulation_message_lists_every_violation() {
        let err = Error::Encapsulation {
            layer: "ipv4",
            violations: vec![
                Violation::Missing("SIP"),
                Violation::LengthExceeded {
                    total: 65536,
                    max: 65535,
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "Cannot encapsulate ipv4: missing SIP, length 65536 exceeds 65535"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_width_message() {
        let err = Error::invalid_width("DMAC", 6, 5);
        assert_eq!(err.to_string(), "Field 'DMAC' must be 6 bytes, got 5");
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_mac_parse_message() {
        let err = Error::InvalidMacAddress {
            input: "11:22:zz:44:55:66".to_string(),
            octet: "zz".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid MAC address '11:22:zz:44:55:66': bad octet 'zz'"
        );
    }
}
