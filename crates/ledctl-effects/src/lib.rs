//! ledctl-effects - the effect registry, audio modulation path and envelope
//! smoother (§4.8, §4.11, §4.12).
//!
//! - [`selector`] - effect name → `(engine, audio_reactive, category)` metadata table
//! - [`context`] - [`context::RenderContext`], the per-tick argument bundle render functions take
//! - [`wled`] - counter-driven WLED-style effects
//! - [`ledfx`] - time/audio-driven LEDFx-style effects
//! - [`audio_mod`] - turns an [`ledctl_audio_analysis::AudioMetrics`] snapshot into the `[0, 1]` modulation scalar
//! - [`envelope`] - per-binding attack/release smoother
//! - [`state`] - per-effect persistent state buckets
//! - [`registry`] - name dispatch tying the above together
//!
//! # Design
//!
//! [`registry::render`] is the crate's single entry point: given a binding and
//! frame-level inputs it resolves the engine, pulls or creates the effect's
//! state bucket, runs the audio modulation path when applicable, and returns
//! the raw `3 * led_count` RGB buffer. Color-order and gamma post-processing
//! stay out of this crate (§4.1, `ledctl-core`) since they're sink-specific
//! and the scheduler must not cache them.

pub mod audio_mod;
pub mod context;
pub mod envelope;
pub mod ledfx;
pub mod registry;
pub mod selector;
pub mod state;
pub mod wled;

pub use context::RenderContext;
pub use envelope::EnvelopeStore;
pub use registry::render;
pub use selector::{Engine, EffectMetadata, effect_metadata, select_engine, EFFECT_TABLE};
pub use state::EffectStateStore;
