//! Groups enabled bindings into render buckets (§4.9 step 2).
//!
//! Bucketing by `(effect_name, led_count, audio_flag)` is a scheduling hint,
//! not a content guarantee: a bucket only actually shares one rendered
//! buffer when every member's [`crate::cache::fingerprint`] also matches,
//! which the frame cache checks on lookup.

use ledctl_config::EffectBinding;

/// One binding's resolved bucket coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub effect_name: String,
    pub led_count: u32,
    /// Whether this binding reacts to audio at all. Audio-linked LEDFx
    /// bindings are time-driven and never reused across ticks, so they are
    /// partitioned away from the cacheable WLED-style buckets.
    pub audio_flag: bool,
}

impl BucketKey {
    pub fn is_cacheable(&self) -> bool {
        !self.audio_flag
    }
}

/// Computes the bucket key for one binding against its sink's LED count.
pub fn bucket_key_for(binding: &EffectBinding, led_count: u32) -> BucketKey {
    BucketKey {
        effect_name: binding.assignment.effect.clone(),
        led_count,
        audio_flag: binding.assignment.audio_link,
    }
}
