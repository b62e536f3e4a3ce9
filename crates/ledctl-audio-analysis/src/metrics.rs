//! The shared, mutex-guarded snapshot of the most recent audio analysis.

use std::sync::{Mutex, RwLock};

use crate::bands::{self, CompositeBands};
use crate::beat::{BeatDetector, TempoEstimator};
use crate::fft::Analyzer;

/// A point-in-time snapshot of the audio analyzer's output, as published to
/// every effect binding that asked for audio reactivity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioMetrics {
    pub energy: f32,
    /// Left-channel RMS energy; equals `energy` for a mono source.
    pub energy_left: f32,
    /// Right-channel RMS energy; equals `energy` for a mono source.
    pub energy_right: f32,
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub beat: bool,
    pub beat_envelope: f32,
    pub tempo_bpm: f32,
    pub timestamp_us: u64,
    pub processed_us: u64,
}

fn clamp01f(v: f32) -> f32 {
    v.clamp(0.0, 1.5)
}

impl AudioMetrics {
    /// Clamps every amplitude-like field to `[0, 1.5]`, leaving timestamps untouched.
    pub fn clamped(mut self) -> Self {
        self.energy = clamp01f(self.energy);
        self.energy_left = clamp01f(self.energy_left);
        self.energy_right = clamp01f(self.energy_right);
        self.bass = clamp01f(self.bass);
        self.mid = clamp01f(self.mid);
        self.treble = clamp01f(self.treble);
        self.beat_envelope = clamp01f(self.beat_envelope);
        self
    }
}

/// Diagnostics describing the analyzer's own health, independent of the
/// musical content of the signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioDiagnostics {
    pub running: bool,
    pub frames_processed: u64,
    pub last_frame_age_us: u64,
}

/// Owns the FFT analyzer, beat/tempo state machines and the latest published
/// metrics snapshot. One instance per audio source.
pub struct AudioMetricsStore {
    sample_rate: u32,
    analyzer: Mutex<Analyzer>,
    beat: Mutex<BeatDetector>,
    tempo: Mutex<TempoEstimator>,
    latest: RwLock<AudioMetrics>,
    last_spectrum: RwLock<Vec<f32>>,
    running: RwLock<bool>,
    frames_processed: Mutex<u64>,
}

impl AudioMetricsStore {
    pub fn new(sample_rate: u32, fft_size: usize) -> Self {
        Self {
            sample_rate,
            analyzer: Mutex::new(Analyzer::new(crate::fft::clamp_fft_size(fft_size))),
            beat: Mutex::new(BeatDetector::new()),
            tempo: Mutex::new(TempoEstimator::new()),
            latest: RwLock::new(AudioMetrics::default()),
            last_spectrum: RwLock::new(Vec::new()),
            running: RwLock::new(false),
            frames_processed: Mutex::new(0),
        }
    }

    /// Runs one frame of windowed samples through the FFT, composite bands and
    /// beat/tempo state machines, publishing the resulting snapshot.
    ///
    /// `samples` must be exactly the analyzer's configured FFT size; callers
    /// own resampling/padding the raw PCM frame to that length.
    pub fn analyze_frame(
        &self,
        mut samples: Vec<f32>,
        energy_left: f32,
        energy_right: f32,
        timestamp_us: u64,
        now_us: u64,
    ) -> AudioMetrics {
        let spectrum = {
            let analyzer = self.analyzer.lock().expect("analyzer mutex poisoned");
            analyzer.apply_window(&mut samples);
            analyzer.magnitude_spectrum(&samples)
        };

        let CompositeBands { bass, mid, treble } = bands::composite_bands(&spectrum, self.sample_rate);
        let energy = (bass + mid + treble) / 3.0;

        let beat_frame = {
            let mut beat = self.beat.lock().expect("beat mutex poisoned");
            beat.process(energy, bass, now_us)
        };
        {
            let mut tempo = self.tempo.lock().expect("tempo mutex poisoned");
            tempo.record(beat_frame.trigger, now_us);
        }
        let tempo_bpm = self.tempo.lock().expect("tempo mutex poisoned").tempo_bpm().unwrap_or(0.0);

        let snapshot = AudioMetrics {
            energy,
            energy_left,
            energy_right,
            bass,
            mid,
            treble,
            beat: beat_frame.beat,
            beat_envelope: beat_frame.envelope,
            tempo_bpm,
            timestamp_us,
            processed_us: now_us,
        }
        .clamped();

        *self.latest.write().expect("metrics lock poisoned") = snapshot;
        *self.last_spectrum.write().expect("spectrum lock poisoned") = spectrum;
        *self.frames_processed.lock().expect("frame counter poisoned") += 1;

        snapshot
    }

    /// The most recently published snapshot.
    pub fn get_metrics(&self) -> AudioMetrics {
        *self.latest.read().expect("metrics lock poisoned")
    }

    /// Overwrites the published snapshot directly, bypassing analysis. Used
    /// by the oscillator fallback when no PCM source is connected.
    pub fn set_metrics(&self, metrics: AudioMetrics) {
        *self.latest.write().expect("metrics lock poisoned") = metrics.clamped();
    }

    /// Average magnitude over an arbitrary frequency range from the most
    /// recent spectrum, clamped to `1.5`.
    pub fn custom_energy(&self, f_lo: f32, f_hi: f32) -> f32 {
        let spectrum = self.last_spectrum.read().expect("spectrum lock poisoned");
        bands::custom_energy(&spectrum, self.sample_rate, f_lo, f_hi)
    }

    /// Weighted value of one named fine band (`"sub_bass"`, `"mid_high"`, ...)
    /// from the most recent spectrum, or `0.0` for an unknown name.
    pub fn band_value(&self, name: &str) -> f32 {
        let Some(band) = bands::find_fine_band(name) else {
            return 0.0;
        };
        let spectrum = self.last_spectrum.read().expect("spectrum lock poisoned");
        (bands::band_energy(&spectrum, self.sample_rate, band.f_lo, band.f_hi) * band.weight).min(1.5)
    }

    /// Marks the analyzer as running or stopped for diagnostics purposes.
    pub fn set_running(&self, running: bool) {
        *self.running.write().expect("running lock poisoned") = running;
    }

    pub fn get_diagnostics(&self, now_us: u64) -> AudioDiagnostics {
        let metrics = self.get_metrics();
        AudioDiagnostics {
            running: *self.running.read().expect("running lock poisoned"),
            frames_processed: *self.frames_processed.lock().expect("frame counter poisoned"),
            last_frame_age_us: now_us.saturating_sub(metrics.processed_us),
        }
    }

    /// Resizes the underlying FFT analyzer; a no-op if `fft_size` is unchanged.
    pub fn resize_fft(&self, fft_size: usize) {
        self.analyzer
            .lock()
            .expect("analyzer mutex poisoned")
            .resize(crate::fft::clamp_fft_size(fft_size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_reports_zeroed_metrics() {
        let store = AudioMetricsStore::new(48000, 1024);
        let m = store.get_metrics();
        assert_eq!(m.energy, 0.0);
        assert!(!m.beat);
    }

    #[test]
    fn analyze_frame_publishes_a_snapshot() {
        let store = AudioMetricsStore::new(48000, 256);
        let samples: Vec<f32> = (0..256).map(|i| (i as f32 * 0.1).sin()).collect();
        let m = store.analyze_frame(samples, 0.2, 0.3, 1000, 1000);
        assert_eq!(m.timestamp_us, 1000);
        assert_eq!(m.energy_left, 0.2);
        assert_eq!(m.energy_right, 0.3);
        assert_eq!(store.get_metrics().timestamp_us, 1000);
    }

    #[test]
    fn set_metrics_clamps_fields() {
        let store = AudioMetricsStore::new(48000, 256);
        store.set_metrics(AudioMetrics { energy: 9.0, bass: -1.0, ..Default::default() });
        let m = store.get_metrics();
        assert_eq!(m.energy, 1.5);
        assert_eq!(m.bass, 0.0);
    }

    #[test]
    fn band_value_unknown_name_is_zero() {
        let store = AudioMetricsStore::new(48000, 256);
        assert_eq!(store.band_value("nonexistent"), 0.0);
    }
}
