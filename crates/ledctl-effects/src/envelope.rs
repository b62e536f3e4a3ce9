//! Per-binding audio-envelope smoother: attack/release first-order low-pass (§4.11).

use std::collections::HashMap;
use std::sync::Mutex;

struct EnvelopeState {
    level: f32,
}

/// Smooths the raw audio-modulation scalar per binding key
/// (`device_id:segment_index:effect_name`), applied only to LEDFx-style
/// bindings with audio modulation.
#[derive(Default)]
pub struct EnvelopeStore {
    states: Mutex<HashMap<String, EnvelopeState>>,
}

impl EnvelopeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the envelope for `key` one tick at `fps` toward input `x`,
    /// returning the smoothed, clamped `[0, 1]` output.
    pub fn smooth(&self, key: &str, x: f32, fps: u16, attack_ms: f32, release_ms: f32) -> f32 {
        let mut states = self.states.lock().expect("envelope store mutex poisoned");
        let state = states.entry(key.to_string()).or_insert(EnvelopeState { level: 0.0 });

        let dt_ms = 1000.0 / f32::from(fps.max(1));
        let alpha_attack = (dt_ms / attack_ms.max(1.0)).min(1.0);
        let alpha_release = (dt_ms / release_ms.max(1.0)).min(1.0);
        let alpha = if x > state.level { alpha_attack } else { alpha_release };

        state.level += (x - state.level) * alpha;
        state.level = state.level.clamp(0.0, 1.0);
        state.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rises_faster_than_it_falls_with_short_attack() {
        let store = EnvelopeStore::new();
        let after_rise = store.smooth("k", 1.0, 60, 10.0, 500.0);
        assert!(after_rise > 0.5);
        let after_fall = store.smooth("k", 0.0, 60, 10.0, 500.0);
        assert!(after_fall > 0.0 && after_fall < after_rise);
    }

    #[test]
    fn output_is_always_within_unit_range() {
        let store = EnvelopeStore::new();
        for _ in 0..50 {
            let v = store.smooth("k2", 5.0, 60, 1.0, 1.0);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
