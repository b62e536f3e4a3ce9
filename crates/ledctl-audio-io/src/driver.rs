//! Bridges socket chunks to published [`AudioMetrics`] snapshots (§4.6), and
//! the long-lived analyzer task that reconnects with backoff and falls back
//! to the internal oscillator when no source is reachable (§7).

use std::time::{Duration, Instant};

use ledctl_audio_analysis::AudioMetricsStore;
use ledctl_config::PcmSourceConfig;
use tracing::{debug, warn};

use crate::jitter::JitterBuffer;
use crate::oscillator::fallback_metrics;
use crate::source::{PcmSocketSource, RECONNECT_BACKOFF};

/// Feeds one buffer's worth of socket chunks into the jitter buffer and
/// publishes every analysis frame that becomes available as a result.
pub struct AnalyzerDriver {
    jitter: JitterBuffer,
    fft_size: usize,
}

impl AnalyzerDriver {
    pub fn new(sample_rate: u32, stereo: bool, latency_ms: u32, fft_size: usize) -> Self {
        Self { jitter: JitterBuffer::new(sample_rate, stereo, latency_ms), fft_size }
    }

    /// Appends one raw socket chunk and publishes every analysis window that
    /// the jitter buffer can now produce. `timestamp_us` is the wall-clock
    /// instant the chunk is expected to be heard; see §4.6 step 9.
    pub fn ingest_chunk(
        &mut self,
        store: &AudioMetricsStore,
        chunk: &[i16],
        now_us: u64,
        timestamp_us: u64,
    ) {
        self.jitter.on_samples_received(chunk, now_us);
        while let Some(frame) = self.jitter.try_drain_frame(self.fft_size) {
            let buffered_us = (self.jitter.buffered_ms() * 1000.0) as u64;
            store.analyze_frame(
                frame.mono,
                frame.energy_left,
                frame.energy_right,
                timestamp_us + buffered_us,
                now_us,
            );
        }
    }
}

/// Runs the analyzer task until `should_stop` returns `true`: connects to the
/// PCM source, reconnecting with [`RECONNECT_BACKOFF`] on failure, and falls
/// back to the oscillator (§7) whenever no source is configured or reachable.
///
/// This is the blocking entry point `ledctl-cli` spawns on its audio task
/// (§5); it is not itself unit-tested since it owns a real socket.
pub fn run_blocking(
    store: &AudioMetricsStore,
    config: &PcmSourceConfig,
    sample_rate: u32,
    stereo: bool,
    fft_size: usize,
    should_stop: impl Fn() -> bool,
) {
    let start = Instant::now();
    let mut driver = AnalyzerDriver::new(sample_rate, stereo, config.latency_ms, fft_size);
    store.set_running(config.enabled);

    if !config.enabled {
        while !should_stop() {
            let t = start.elapsed().as_secs_f32();
            let now_us = start.elapsed().as_micros() as u64;
            store.set_metrics(fallback_metrics(t, now_us, now_us));
            std::thread::sleep(Duration::from_millis(20));
        }
        return;
    }

    while !should_stop() {
        let mut source = match PcmSocketSource::connect(config) {
            Ok(source) => source,
            Err(err) => {
                warn!(%err, "PCM source connect failed, retrying after backoff");
                let t = start.elapsed().as_secs_f32();
                let now_us = start.elapsed().as_micros() as u64;
                store.set_metrics(fallback_metrics(t, now_us, now_us));
                std::thread::sleep(RECONNECT_BACKOFF);
                continue;
            }
        };

        while !should_stop() {
            match source.read_chunk() {
                Ok(chunk) => {
                    let now_us = start.elapsed().as_micros() as u64;
                    driver.ingest_chunk(store, &chunk, now_us, now_us);
                }
                Err(err) => {
                    debug!(%err, "PCM socket read failed, reconnecting");
                    break;
                }
            }
        }
        std::thread::sleep(RECONNECT_BACKOFF);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_publishes_a_snapshot_once_enough_is_buffered() {
        let store = AudioMetricsStore::new(48000, 256);
        let mut driver = AnalyzerDriver::new(48000, true, 20, 256);
        let chunk = vec![2000i16; 2 * 4096];
        driver.ingest_chunk(&store, &chunk, 0, 1_000_000);
        assert!(store.get_metrics().processed_us == 0 || store.get_metrics().timestamp_us >= 1_000_000);
    }
}
