//! ledctl-audio-analysis - windowed FFT, frequency-band energies, beat/tempo
//! estimation and the shared audio metrics store.
//!
//! - [`fft`] - Hann-windowed FFT with a cached plan and window table
//! - [`bands`] - composite bass/mid/treble and named fine-slice band energies
//! - [`beat`] - delta-threshold beat trigger and circular-buffer tempo estimation
//! - [`metrics`] - [`metrics::AudioMetricsStore`], the mutex-guarded snapshot
//!   every audio-reactive effect binding reads from
//!
//! # Design
//!
//! One [`metrics::AudioMetricsStore`] exists per configured audio source. The
//! scheduler (or the PCM ingest loop in `ledctl-audio-io`) drives
//! [`metrics::AudioMetricsStore::analyze_frame`] at the source's natural frame
//! rate; effect bindings only ever read [`metrics::AudioMetricsStore::get_metrics`]
//! or the named band accessors, never the analyzer internals directly.

pub mod bands;
pub mod beat;
pub mod fft;
pub mod metrics;

pub use bands::{CompositeBands, FineBand, band_energy, composite_bands, custom_energy, find_fine_band, FINE_BANDS};
pub use beat::{BeatDetector, BeatFrame, TempoEstimator};
pub use fft::{Analyzer, clamp_fft_size};
pub use metrics::{AudioDiagnostics, AudioMetrics, AudioMetricsStore};
