//! ledctl-scheduler - the fixed-rate output scheduler: bucketing, the frame
//! cache, per-sink dispatch and DDP session housekeeping (§4.9, §4.10).
//!
//! - [`bucket`] - groups bindings sharing an effect/length/audio-reactivity signature
//! - [`cache`] - the bounded, fingerprint-checked frame cache
//! - [`dispatch`] - fan-out of one rendered buffer to a local, remote or virtual sink
//! - [`scheduler`] - [`scheduler::Scheduler`] and the [`scheduler::run`] loop

pub mod bucket;
pub mod cache;
pub mod dispatch;
pub mod scheduler;

pub use bucket::{BucketKey, bucket_key_for};
pub use cache::FrameCache;
pub use scheduler::{Scheduler, run};
