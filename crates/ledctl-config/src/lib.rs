//! ledctl-config - the configuration snapshot data model, validation and
//! TOML persistence consumed by the scheduler.
//!
//! - [`sink`] - local strip / remote node / virtual composite
//! - [`effect`] - per-sink effect assignment (§3)
//! - [`binding`] - scheduler-level sink↔assignment pairing
//! - [`audio_settings`] - PCM source and analyzer tuning
//! - [`snapshot`] - the top-level [`snapshot::ConfigSnapshot`]
//! - [`validation`] - configuration-drift checks (dangling sink references)
//! - [`persist`] - TOML load/save helpers
//!
//! # Design
//!
//! The core never owns persistence (§6.5); this crate is the decoded form an
//! external collaborator hands the scheduler. `ConfigSnapshot` is always
//! replaced atomically rather than mutated in place, so sinks are addressed
//! by id everywhere instead of by pointer.

pub mod audio_settings;
pub mod binding;
pub mod effect;
pub mod error;
pub mod persist;
pub mod sink;
pub mod snapshot;
pub mod validation;

pub use audio_settings::{AudioSettings, AudioSourceKind, PcmSourceConfig};
pub use binding::EffectBinding;
pub use effect::{AudioChannel, Direction, EffectAssignment, HexColor, ReactiveMode};
pub use error::{ConfigError, ConfigResult};
pub use sink::{LocalSink, RemoteSink, Sink, SinkAudioParams, VirtualComposite, VirtualSegmentMember};
pub use snapshot::{ConfigSnapshot, DriverKind, HardwareConfig};
