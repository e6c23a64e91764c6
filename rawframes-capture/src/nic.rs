//! Binding of a capture driver to frame buffers
//!
//! A [`Nic`] moves bytes between a [`CaptureDriver`] and a [`FrameCore`]:
//! `rx_frame` fills a frame from one receive, `tx_frame` injects a frame
//! and empties it.

use rawframes_core::{Error, Result};
use rawframes_packet::FrameCore;
use tracing::{debug, error, info, warn};

use crate::driver::CaptureDriver;
use crate::stats::{NicStats, StatsAccumulator};

/// A driver plus the name of the interface it has open
pub struct Nic<D: CaptureDriver> {
    driver: D,
    interface: Option<String>,
    stats: StatsAccumulator,
}

impl<D: CaptureDriver> Nic<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            interface: None,
            stats: StatsAccumulator::new(),
        }
    }

    /// Open `interface`, closing whatever was open before
    pub fn open(&mut self, interface: &str) -> Result<()> {
        if self.interface.is_some() {
            self.close();
        }

        self.driver.open(interface).map_err(|e| {
            error!("Failed to open {}: {}", interface, e);
            e
        })?;

        info!("NIC open on {}", interface);
        self.interface = Some(interface.to_string());
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(interface) = self.interface.take() {
            self.driver.close();
            info!("NIC closed on {}", interface);
        }
    }

    pub fn is_open(&self) -> bool {
        self.interface.is_some()
    }

    /// Name of the open interface
    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    /// Install a BPF filter expression on the open interface
    pub fn set_filter(&mut self, expression: &str) -> Result<()> {
        self.ensure_open()?;
        self.driver.install_filter(expression).map_err(|e| {
            error!("Failed to install filter '{}': {}", expression, e);
            e
        })
    }

    /// Receive one frame into `core`.
    ///
    /// The bytes kept are the smaller of the captured and wire lengths. On
    /// success the frame is valid and its cursor starts from the first byte.
    /// On failure `core` is left as it was.
    pub fn rx_frame(&mut self, core: &mut FrameCore) -> Result<()> {
        self.ensure_open()?;

        match self.driver.receive_next() {
            Ok(captured) => {
                let bytes = captured.into_truncated();
                debug!("Received {} bytes", bytes.len());
                self.stats.record_rx(bytes.len());
                core.give(bytes);
                Ok(())
            }
            Err(Error::Timeout) => {
                warn!("Receive timed out");
                self.stats.record_timeout();
                Err(Error::Timeout)
            }
            Err(Error::EndOfStream) => {
                info!("End of capture stream");
                Err(Error::EndOfStream)
            }
            Err(e) => {
                error!("Receive failed: {}", e);
                self.stats.record_error();
                Err(e)
            }
        }
    }

    /// Inject the bytes of `core`, then take them out of the frame.
    ///
    /// An invalid frame is refused with [`Error::EmptyFrame`]. On a send
    /// failure `core` keeps its bytes.
    pub fn tx_frame(&mut self, core: &mut FrameCore) -> Result<()> {
        self.ensure_open()?;

        if !core.is_valid() {
            error!("No valid frame to transmit");
            return Err(Error::EmptyFrame);
        }

        if let Err(e) = self.driver.send(core.as_bytes()) {
            error!("Transmit failed: {}", e);
            self.stats.record_error();
            return Err(e);
        }

        let sent = core.take();
        debug!("Sent {} bytes", sent.len());
        self.stats.record_tx(sent.len());
        Ok(())
    }

    pub fn stats(&self) -> NicStats {
        self.stats.snapshot()
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn ensure_open(&self) -> Result<()> {
        if self.interface.is_none() {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}

impl<D: CaptureDriver> Drop for Nic<D> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rawframes_core::{CapturedFrame, EtherType};
    use rawframes_packet::{EthernetLayer, Layer};
    use std::collections::VecDeque;

    /// Scripted driver: queued receive results, recorded sends
    #[derive(Default)]
    struct MockDriver {
        opened: Vec<String>,
        closes: usize,
        filters: Vec<String>,
        incoming: VecDeque<Result<CapturedFrame>>,
        sent: Vec<Vec<u8>>,
        fail_send: bool,
        fail_open: bool,
    }

    impl CaptureDriver for MockDriver {
        fn open(&mut self, interface: &str) -> Result<()> {
            if self.fail_open {
                return Err(Error::InterfaceNotFound(interface.to_string()));
            }
            self.opened.push(interface.to_string());
            Ok(())
        }

        fn close(&mut self) {
            self.closes += 1;
        }

        fn install_filter(&mut self, expression: &str) -> Result<()> {
            if expression.contains('!') {
                return Err(Error::capture("syntax error"));
            }
            self.filters.push(expression.to_string());
            Ok(())
        }

        fn receive_next(&mut self) -> Result<CapturedFrame> {
            self.incoming.pop_front().unwrap_or(Err(Error::EndOfStream))
        }

        fn send(&mut self, frame: &[u8]) -> Result<()> {
            if self.fail_send {
                return Err(Error::capture("inject failed"));
            }
            self.sent.push(frame.to_vec());
            Ok(())
        }
    }

    fn open_nic(driver: MockDriver) -> Nic<MockDriver> {
        let mut nic = Nic::new(driver);
        nic.open("mock0").unwrap();
        nic
    }

    #[test]
    fn test_calls_require_open() {
        let mut nic = Nic::new(MockDriver::default());
        let mut core = FrameCore::new();
        core.give(vec![0x01]);

        assert!(matches!(nic.rx_frame(&mut core), Err(Error::NotOpen)));
        assert!(matches!(nic.tx_frame(&mut core), Err(Error::NotOpen)));
        assert!(matches!(nic.set_filter("arp"), Err(Error::NotOpen)));
        assert!(core.is_valid());
    }

    #[test]
    fn test_open_close() {
        let mut nic = open_nic(MockDriver::default());
        assert!(nic.is_open());
        assert_eq!(nic.interface(), Some("mock0"));

        nic.open("mock1").unwrap();
        assert_eq!(nic.driver().opened, vec!["mock0", "mock1"]);
        assert_eq!(nic.driver().closes, 1);

        nic.close();
        nic.close();
        assert!(!nic.is_open());
        assert_eq!(nic.driver().closes, 2);
    }

    #[test]
    fn test_failed_open_stays_closed() {
        let mut nic = Nic::new(MockDriver {
            fail_open: true,
            ..MockDriver::default()
        });
        assert!(matches!(
            nic.open("missing0"),
            Err(Error::InterfaceNotFound(_))
        ));
        assert!(!nic.is_open());
    }

    #[test]
    fn test_set_filter() {
        let mut nic = open_nic(MockDriver::default());
        nic.set_filter("arp").unwrap();
        assert!(nic.set_filter("arp !!").is_err());
        assert_eq!(nic.driver().filters, vec!["arp"]);
    }

    #[test]
    fn test_rx_truncates_to_shorter_length() {
        let mut driver = MockDriver::default();
        driver.incoming.push_back(Ok(CapturedFrame {
            data: vec![1, 2, 3, 4, 5, 6],
            caplen: 6,
            len: 4,
        }));
        driver.incoming.push_back(Ok(CapturedFrame {
            data: vec![7, 8, 9],
            caplen: 3,
            len: 1500,
        }));
        let mut nic = open_nic(driver);

        let mut core = FrameCore::new();
        nic.rx_frame(&mut core).unwrap();
        assert_eq!(core.as_bytes(), &[1, 2, 3, 4]);

        nic.rx_frame(&mut core).unwrap();
        assert_eq!(core.copy(), vec![7, 8, 9]);

        let stats = nic.stats();
        assert_eq!(stats.frames_received, 2);
        assert_eq!(stats.bytes_received, 7);
    }

    #[test]
    fn test_rx_then_iterate() {
        let mut driver = MockDriver::default();
        driver
            .incoming
            .push_back(Ok(CapturedFrame::new(vec![0xde, 0xad])));
        let mut nic = open_nic(driver);

        let mut core = FrameCore::new();
        nic.rx_frame(&mut core).unwrap();
        assert_eq!(core.next_byte(), Some(0xde));
        assert_eq!(core.next_byte(), Some(0xad));
        assert_eq!(core.next_byte(), None);
        assert!(!core.is_valid());
    }

    #[test]
    fn test_rx_failures_leave_frame_alone() {
        let mut driver = MockDriver::default();
        driver.incoming.push_back(Err(Error::Timeout));
        driver
            .incoming
            .push_back(Err(Error::capture("interface went down")));
        let mut nic = open_nic(driver);

        let mut core = FrameCore::new();
        core.give(vec![0x42]);

        assert!(matches!(nic.rx_frame(&mut core), Err(Error::Timeout)));
        assert!(matches!(nic.rx_frame(&mut core), Err(Error::Capture(_))));
        assert!(matches!(nic.rx_frame(&mut core), Err(Error::EndOfStream)));
        assert_eq!(core.as_bytes(), &[0x42]);

        let stats = nic.stats();
        assert_eq!(stats.timeouts, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.frames_received, 0);
    }

    #[test]
    fn test_tx_encapsulated_layer() {
        let mut eth = EthernetLayer::new();
        eth.set_dmac([0xff; 6]).unwrap();
        eth.set_smac([0x02, 0, 0, 0, 0, 9]).unwrap();
        eth.set_ethertype(EtherType::Reserved);
        eth.set_payload([0x00; 46]);
        eth.encapsulate().unwrap();

        let mut nic = open_nic(MockDriver::default());
        nic.tx_frame(eth.core_mut()).unwrap();

        assert_eq!(nic.driver().sent.len(), 1);
        assert_eq!(nic.driver().sent[0].len(), 60);
        assert_eq!(&nic.driver().sent[0][12..14], &[0xbe, 0xe5]);
        assert!(!eth.core().is_valid());
        assert!(eth.core().is_empty());

        assert!(matches!(
            nic.tx_frame(eth.core_mut()),
            Err(Error::EmptyFrame)
        ));
        assert_eq!(nic.stats().frames_sent, 1);
        assert_eq!(nic.stats().bytes_sent, 60);
    }

    #[test]
    fn test_tx_failure_keeps_frame() {
        let mut nic = open_nic(MockDriver {
            fail_send: true,
            ..MockDriver::default()
        });

        let mut core = FrameCore::new();
        core.give(vec![0x01, 0x02]);
        assert!(nic.tx_frame(&mut core).is_err());
        assert!(core.is_valid());
        assert_eq!(core.as_bytes(), &[0x01, 0x02]);
        assert_eq!(nic.stats().errors, 1);
    }

    #[test]
    fn test_boxed_driver() {
        let driver: Box<dyn CaptureDriver> = Box::new(MockDriver::default());
        let mut nic = Nic::new(driver);
        nic.open("mock0").unwrap();
        nic.set_filter("ip").unwrap();

        let mut core = FrameCore::new();
        assert!(matches!(nic.rx_frame(&mut core), Err(Error::EndOfStream)));
    }
}
