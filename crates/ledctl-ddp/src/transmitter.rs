//! DDP frame transmission: chunking, per-chunk send and failure isolation (§4.5).

use std::net::UdpSocket;

use crate::addr_cache::AddressCache;
use crate::error::DdpError;
use crate::stats::DdpStats;
use crate::wire::chunk_frame;

/// Sends a complete pixel frame to `host:port` as one or more chunked
/// datagrams, returning `Ok(())` only if every chunk's `sendto` succeeded.
/// A chunk send failure is logged, invalidates the cached address, and does
/// not abort subsequent chunks.
pub struct DdpTransmitter {
    addr_cache: AddressCache,
    stats: DdpStats,
}

impl Default for DdpTransmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DdpTransmitter {
    pub fn new() -> Self {
        Self { addr_cache: AddressCache::new(), stats: DdpStats::new() }
    }

    pub fn stats(&self) -> &DdpStats {
        &self.stats
    }

    /// Sends one complete frame. `sequence` seeds the chunk-group's starting
    /// sequence number.
    pub fn send_frame(
        &self,
        host: &str,
        port: u16,
        channel: u32,
        frame: &[u8],
        sequence: u8,
    ) -> Result<(), DdpError> {
        let addr = self.addr_cache.resolve(host, port).map_err(|source| DdpError::Resolve {
            host: host.to_string(),
            source,
        })?;

        let socket = UdpSocket::bind("0.0.0.0:0").map_err(|source| DdpError::Send { addr, source })?;

        let chunks = chunk_frame(frame, channel, sequence);
        let mut all_ok = true;
        let mut last_err = None;

        for chunk in &chunks {
            let datagram = chunk.to_datagram();
            match socket.send_to(&datagram, addr) {
                Ok(n) => self.stats.record_tx(n),
                Err(err) => {
                    tracing::warn!(host, ?addr, error = %err, "ddp chunk send failed");
                    self.addr_cache.invalidate(host);
                    all_ok = false;
                    last_err = Some(err);
                }
            }
        }

        if all_ok {
            Ok(())
        } else {
            Err(DdpError::Send { addr, source: last_err.unwrap() })
        }
    }
}
