//! The validate, serialize, delegate contract shared by every layer

use crate::ethernet::EthernetLayer;
use crate::frame::FrameCore;
use rawframes_core::{Error, Field, FieldMap, Result, Violation};
use std::fmt;
use tracing::error;

/// A protocol layer stacked on an [`EthernetLayer`].
///
/// `encapsulate` checks the layer's own required fields, serializes its
/// header, hands the result to the Ethernet layer beneath it and ends with
/// the wire bytes stored in the [`FrameCore`].
pub trait Layer: fmt::Display {
    /// Validate, serialize and delegate downward
    fn encapsulate(&mut self) -> Result<()>;

    /// The Ethernet layer this layer delegates to
    fn ethernet(&self) -> &EthernetLayer;

    fn ethernet_mut(&mut self) -> &mut EthernetLayer;

    /// The frame buffer at the bottom of the stack
    fn core(&self) -> &FrameCore {
        self.ethernet().core()
    }

    fn core_mut(&mut self) -> &mut FrameCore {
        self.ethernet_mut().core_mut()
    }

    /// Nested field dump, `{spec:<FIELD>:<item>,...,frame:<parent>}`
    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Reject `bytes` unless it is exactly `expected` long
pub(crate) fn check_width(field: &'static str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        error!(
            "{} must be {} bytes, got {}",
            field,
            expected,
            bytes.len()
        );
        return Err(Error::invalid_width(field, expected, bytes.len()));
    }
    Ok(())
}

/// One `Missing` violation per invalid required field
pub(crate) fn missing_fields<F: Field>(fields: &FieldMap<F>, required: &[F]) -> Vec<Violation> {
    fields
        .missing(required)
        .into_iter()
        .map(|field| Violation::Missing(field.label()))
        .collect()
}

/// Log every violation, then fail with all of them at once
pub(crate) fn reject(layer: &'static str, violations: Vec<Violation>) -> Result<()> {
    if violations.is_empty() {
        return Ok(());
    }

    for violation in &violations {
        error!("cannot encapsulate {}: {}", layer, violation);
    }

    Err(Error::Encapsulation { layer, violations })
}

/// Writes `LABEL:{..},LABEL:{..}` for every field in order, skipping invalid ones listed in `skip_invalid`
pub(crate) fn write_fields<F: Field>(
    f: &mut fmt::Formatter<'_>,
    fields: &FieldMap<F>,
    skip_invalid: &[F],
) -> fmt::Result {
    let mut first = true;
    for (field, item) in fields.iter() {
        if !item.is_valid() && skip_invalid.contains(&field) {
            continue;
        }
        if !first {
            f.write_str(",")?;
        }
        write!(f, "{}:{}", field.label(), item)?;
        first = false;
    }
    Ok(())
}
