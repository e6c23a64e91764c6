//! Receive/transmit counters kept by a [`crate::Nic`]

use std::time::{Duration, Instant};

/// Snapshot of the counters of one NIC binding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NicStats {
    /// Frames handed to a `FrameCore` by `rx_frame`
    pub frames_received: u64,
    /// Bytes handed to a `FrameCore` after truncation
    pub bytes_received: u64,
    /// Frames injected by `tx_frame`
    pub frames_sent: u64,
    /// Bytes injected
    pub bytes_sent: u64,
    /// Receives that timed out
    pub timeouts: u64,
    /// Driver failures other than timeouts and end of stream
    pub errors: u64,
    /// Time since the counters were started or reset
    pub duration: Duration,
}

impl NicStats {
    /// Received frames per second over `duration`
    pub fn rx_rate(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.frames_received as f64 / secs
        } else {
            0.0
        }
    }

    /// Sent frames per second over `duration`
    pub fn tx_rate(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.frames_sent as f64 / secs
        } else {
            0.0
        }
    }

    /// Format statistics as human-readable string
    pub fn format(&self) -> String {
        format!(
            "Received: {} frames ({} bytes)\n\
             Sent: {} frames ({} bytes)\n\
             Timeouts: {}, Errors: {}\n\
             Duration: {:.2}s",
            self.frames_received,
            self.bytes_received,
            self.frames_sent,
            self.bytes_sent,
            self.timeouts,
            self.errors,
            self.duration.as_secs_f64()
        )
    }
}

/// Running counters
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    stats: NicStats,
    start_time: Instant,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self {
            stats: NicStats::default(),
            start_time: Instant::now(),
        }
    }

    pub fn record_rx(&mut self, size: usize) {
        self.stats.frames_received += 1;
        self.stats.bytes_received += size as u64;
    }

    pub fn record_tx(&mut self, size: usize) {
        self.stats.frames_sent += 1;
        self.stats.bytes_sent += size as u64;
    }

    pub fn record_timeout(&mut self) {
        self.stats.timeouts += 1;
    }

    pub fn record_error(&mut self) {
        self.stats.errors += 1;
    }

    /// Current counters with the elapsed time filled in
    pub fn snapshot(&self) -> NicStats {
        NicStats {
            duration: self.start_time.elapsed(),
            ..self.stats.clone()
        }
    }

    /// Zero every counter and restart the clock
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
