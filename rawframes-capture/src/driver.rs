//! Capture/injection driver contract

use rawframes_core::{CapturedFrame, Result};

/// A synchronous capture and injection backend.
///
/// Every call is request/response: nothing is retried and a receive timeout
/// comes back as [`rawframes_core::Error::Timeout`].
pub trait CaptureDriver {
    /// Open the named interface (or source) for capture and injection
    fn open(&mut self, interface: &str) -> Result<()>;

    /// Release the handle; calling it on a closed driver does nothing
    fn close(&mut self);

    /// Compile and install a BPF filter expression
    fn install_filter(&mut self, expression: &str) -> Result<()>;

    /// Block until the next frame arrives, the read times out or the stream ends
    fn receive_next(&mut self) -> Result<CapturedFrame>;

    /// Inject one complete frame
    fn send(&mut self, frame: &[u8]) -> Result<()>;
}

impl<D: CaptureDriver + ?Sized> CaptureDriver for Box<D> {
    fn open(&mut self, interface: &str) -> Result<()> {
        (**self).open(interface)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn install_filter(&mut self, expression: &str) -> Result<()> {
        (**self).install_filter(expression)
    }

    fn receive_next(&mut self) -> Result<CapturedFrame> {
        (**self).receive_next()
    }

    fn send(&mut self, frame: &[u8]) -> Result<()> {
        (**self).send(frame)
    }
}
