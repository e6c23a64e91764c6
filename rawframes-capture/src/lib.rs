//! Frame capture and injection for rawframes
//!
//! This crate connects the frame buffers of `rawframes-packet` to a network
//! interface through a small synchronous driver contract.
//!
//! ## Features
//!
//! - **Driver contract**: [`CaptureDriver`] with open/close/filter/receive/send
//! - **libpcap drivers**: [`PcapDriver`] for live interfaces, [`SavefileDriver`] for pcap files
//! - **NIC binding**: [`Nic`] receives into and transmits from a `FrameCore`
//! - **BPF Filters**: expressions for ARP, IPv4, PAUSE and Q-in-Q frames
//! - **Statistics**: per-NIC frame, byte, timeout and error counters
//!
//! ## Example
//!
//! ```no_run
//! use rawframes_capture::{filters, Nic, PcapDriver};
//! use rawframes_packet::FrameCore;
//!
//! # fn main() -> rawframes_core::Result<()> {
//! let mut nic = Nic::new(PcapDriver::new());
//! nic.open("eth0")?;
//! nic.set_filter(&filters::arp_filter())?;
//!
//! let mut frame = FrameCore::new();
//! nic.rx_frame(&mut frame)?;
//! for byte in frame.bytes() {
//!     print!("{:02x} ", byte);
//! }
//!
//! nic.close();
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod driver;
pub mod filters;
pub mod interface;
pub mod nic;
pub mod stats;

// Re-export main types
pub use capture::{CaptureConfig, DriverStats, PcapDriver, SavefileDriver};
pub use driver::CaptureDriver;
pub use interface::{get_interface, list_interfaces, InterfaceInfo};
pub use nic::Nic;
pub use stats::{NicStats, StatsAccumulator};
