//! ledctl-audio-io - PCM socket ingest, jitter buffer and the analyzer driver
//! loop (§4.6).
//!
//! - [`source`] - blocking chunked socket reads with reconnect backoff
//! - [`jitter`] - bounded FIFO with PLL-style drift nudging
//! - [`oscillator`] - internal fallback metrics when no source is reachable (§7)
//! - [`driver`] - [`driver::AnalyzerDriver`] and the long-lived [`driver::run_blocking`] task
//! - [`error`] - typed, always-transient I/O failures

pub mod driver;
pub mod error;
pub mod jitter;
pub mod oscillator;
pub mod source;

pub use driver::{AnalyzerDriver, run_blocking};
pub use error::{AudioIoError, AudioIoResult};
pub use jitter::{DrainedFrame, JitterBuffer};
pub use source::{CHUNK_SAMPLES, PcmSocketSource, RECONNECT_BACKOFF};
