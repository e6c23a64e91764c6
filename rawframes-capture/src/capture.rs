//! libpcap-backed drivers

use pcap::{Activated, Active, Capture, Offline};
use rawframes_core::{CapturedFrame, Error, Result};
use tracing::{debug, info};

use crate::driver::CaptureDriver;
use crate::interface::get_interface;

/// Default snapshot length (maximum bytes per packet)
pub const DEFAULT_SNAPLEN: i32 = 65536;

/// Default read timeout (milliseconds)
pub const DEFAULT_TIMEOUT_MS: i32 = 100;

/// Configuration for a live capture handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Maximum bytes to capture per packet
    pub snaplen: i32,
    /// Read timeout in milliseconds
    pub timeout_ms: i32,
    /// Enable promiscuous mode
    pub promiscuous: bool,
    /// Buffer size (0 = libpcap default)
    pub buffer_size: i32,
    /// Deliver packets as soon as they arrive
    pub immediate_mode: bool,
    /// Run the BPF optimizer when compiling filters
    pub optimize_filter: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: DEFAULT_SNAPLEN,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            promiscuous: false,
            buffer_size: 0,
            immediate_mode: false,
            optimize_filter: false,
        }
    }
}

impl CaptureConfig {
    pub fn with_snaplen(mut self, snaplen: i32) -> Self {
        self.snaplen = snaplen;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: i32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_promiscuous(mut self, promiscuous: bool) -> Self {
        self.promiscuous = promiscuous;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: i32) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_immediate_mode(mut self, immediate_mode: bool) -> Self {
        self.immediate_mode = immediate_mode;
        self
    }

    pub fn with_optimize_filter(mut self, optimize_filter: bool) -> Self {
        self.optimize_filter = optimize_filter;
        self
    }
}

/// Kernel-side counters reported by libpcap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Packets accepted by the filter
    pub received: u32,
    /// Packets dropped for lack of buffer space
    pub dropped: u32,
    /// Packets dropped by the interface
    pub if_dropped: u32,
}

impl From<pcap::Stat> for DriverStats {
    fn from(stat: pcap::Stat) -> Self {
        Self {
            received: stat.received,
            dropped: stat.dropped,
            if_dropped: stat.if_dropped,
        }
    }
}

fn pcap_error(context: &str, err: pcap::Error) -> Error {
    match err {
        pcap::Error::TimeoutExpired => Error::Timeout,
        pcap::Error::NoMorePackets => Error::EndOfStream,
        other => Error::capture(format!("{}: {}", context, other)),
    }
}

fn compile_filter<T: Activated + ?Sized>(
    capture: &mut Capture<T>,
    expression: &str,
    optimize: bool,
) -> Result<()> {
    capture
        .filter(expression, optimize)
        .map_err(|e| pcap_error("Invalid BPF filter", e))?;
    info!("BPF filter set: {}", expression);
    Ok(())
}

fn next_frame<T: Activated + ?Sized>(capture: &mut Capture<T>) -> Result<CapturedFrame> {
    let packet = capture
        .next_packet()
        .map_err(|e| pcap_error("Failed to receive", e))?;

    Ok(CapturedFrame {
        data: packet.data.to_vec(),
        caplen: packet.header.caplen,
        len: packet.header.len,
    })
}

/// Live capture and injection on a network interface
pub struct PcapDriver {
    config: CaptureConfig,
    handle: Option<Capture<Active>>,
}

impl PcapDriver {
    pub fn new() -> Self {
        Self::with_config(CaptureConfig::default())
    }

    pub fn with_config(config: CaptureConfig) -> Self {
        Self {
            config,
            handle: None,
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Counters from the open handle
    pub fn stats(&mut self) -> Result<DriverStats> {
        let capture = self.handle.as_mut().ok_or(Error::NotOpen)?;
        let stat = capture
            .stats()
            .map_err(|e| pcap_error("Failed to get stats", e))?;
        Ok(stat.into())
    }

    fn handle(&mut self) -> Result<&mut Capture<Active>> {
        self.handle.as_mut().ok_or(Error::NotOpen)
    }
}

impl Default for PcapDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureDriver for PcapDriver {
    fn open(&mut self, interface: &str) -> Result<()> {
        get_interface(interface)?;
        debug!("Opening {} with {:?}", interface, self.config);

        let mut capture = Capture::from_device(interface)
            .map_err(|e| pcap_error("Failed to create capture", e))?
            .promisc(self.config.promiscuous)
            .snaplen(self.config.snaplen)
            .timeout(self.config.timeout_ms)
            .immediate_mode(self.config.immediate_mode);

        if self.config.buffer_size > 0 {
            capture = capture.buffer_size(self.config.buffer_size);
        }

        let capture = capture
            .open()
            .map_err(|e| pcap_error("Failed to open capture", e))?;

        self.handle = Some(capture);
        info!("Capture opened on {}", interface);
        Ok(())
    }

    fn close(&mut self) {
        if self.handle.take().is_some() {
            info!("Capture closed");
        }
    }

    fn install_filter(&mut self, expression: &str) -> Result<()> {
        let optimize = self.config.optimize_filter;
        compile_filter(self.handle()?, expression, optimize)
    }

    fn receive_next(&mut self) -> Result<CapturedFrame> {
        next_frame(self.handle()?)
    }

    fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.handle()?
            .sendpacket(frame)
            .map_err(|e| pcap_error("Failed to send", e))
    }
}

/// Reads frames from a pcap savefile; `open` takes a file path.
///
/// Sending is refused. The end of the file is reported as
/// [`Error::EndOfStream`].
#[derive(Default)]
pub struct SavefileDriver {
    optimize_filter: bool,
    handle: Option<Capture<Offline>>,
}

impl SavefileDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_optimize_filter(mut self, optimize_filter: bool) -> Self {
        self.optimize_filter = optimize_filter;
        self
    }

    fn handle(&mut self) -> Result<&mut Capture<Offline>> {
        self.handle.as_mut().ok_or(Error::NotOpen)
    }
}

impl CaptureDriver for SavefileDriver {
    fn open(&mut self, path: &str) -> Result<()> {
        let capture =
            Capture::from_file(path).map_err(|e| pcap_error("Failed to open savefile", e))?;
        self.handle = Some(capture);
        info!("Savefile opened: {}", path);
        Ok(())
    }

    fn close(&mut self) {
        if self.handle.take().is_some() {
            info!("Savefile closed");
        }
    }

    fn install_filter(&mut self, expression: &str) -> Result<()> {
        let optimize = self.optimize_filter;
        compile_filter(self.handle()?, expression, optimize)
    }

    fn receive_next(&mut self) -> Result<CapturedFrame> {
        next_frame(self.handle()?)
    }

    fn send(&mut self, _frame: &[u8]) -> Result<()> {
        self.handle()?;
        Err(Error::capture("Savefile is read-only"))
    }
}
