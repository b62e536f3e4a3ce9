//! Process-wide DDP transmit byte counters (§4.5, §6.4).

use std::sync::atomic::{AtomicU64, Ordering};

/// Accumulates bytes actually written to the socket. The receive counter is
/// reserved but unused, matching the source's own dormant field.
#[derive(Default)]
pub struct DdpStats {
    tx_bytes: AtomicU64,
    rx_bytes: AtomicU64,
}

/// Snapshot returned to observability collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct DdpStatsSnapshot {
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

impl DdpStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `n` bytes successfully written to the socket.
    pub fn record_tx(&self, n: usize) {
        self.tx_bytes.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DdpStatsSnapshot {
        DdpStatsSnapshot {
            tx_bytes: self.tx_bytes.load(Ordering::Relaxed),
            rx_bytes: self.rx_bytes.load(Ordering::Relaxed),
        }
    }
}
