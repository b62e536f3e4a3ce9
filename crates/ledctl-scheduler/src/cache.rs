//! Bounded frame cache: memoizes a rendered buffer so bindings sharing an
//! identical bucket don't re-render it (§4.9 step 3).
//!
//! Reuse additionally requires the assignment's render-affecting fields to
//! match (the `fingerprint`), not just `(effect_name, led_count,
//! frame_index)` — two sinks can share an effect name and length while
//! differing in color or speed.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use ledctl_config::{EffectAssignment, HexColor};

/// Maximum number of distinct frames held at once before the whole cache is
/// dropped and started fresh.
const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    effect_name: String,
    led_count: u32,
    frame_index: u64,
    fingerprint: u64,
}

/// Hashes the parts of an assignment that change rendered pixels, excluding
/// `audio_link`/`audio_profile` and the other audio-path fields: audio-linked
/// LEDFx bindings are never cached (see [`crate::bucket`]).
pub fn fingerprint(assignment: &EffectAssignment) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    assignment.effect.hash(&mut hasher);
    assignment.speed.hash(&mut hasher);
    assignment.intensity.hash(&mut hasher);
    assignment.effective_brightness().hash(&mut hasher);
    (assignment.direction as u8).hash(&mut hasher);
    let HexColor(r1, g1, b1) = assignment.color1;
    let HexColor(r2, g2, b2) = assignment.color2;
    let HexColor(r3, g3, b3) = assignment.color3;
    (r1, g1, b1, r2, g2, b2, r3, g3, b3).hash(&mut hasher);
    hasher.finish()
}

/// A bounded cache of rendered frames for the current tick window.
#[derive(Default)]
pub struct FrameCache {
    entries: HashMap<CacheKey, Vec<u8>>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, effect_name: &str, led_count: u32, frame_index: u64, fingerprint: u64) -> Option<&[u8]> {
        let key = CacheKey { effect_name: effect_name.to_string(), led_count, frame_index, fingerprint };
        self.entries.get(&key).map(Vec::as_slice)
    }

    pub fn insert(&mut self, effect_name: &str, led_count: u32, frame_index: u64, fingerprint: u64, frame: Vec<u8>) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.clear();
        }
        let key = CacheKey { effect_name: effect_name.to_string(), led_count, frame_index, fingerprint };
        self.entries.insert(key, frame);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_cached_frame_is_returned_on_matching_key() {
        let mut cache = FrameCache::new();
        cache.insert("Rainbow", 10, 0, 42, vec![1, 2, 3]);
        assert_eq!(cache.get("Rainbow", 10, 0, 42), Some(&[1u8, 2, 3][..]));
        assert!(cache.get("Rainbow", 10, 0, 99).is_none());
    }

    #[test]
    fn cache_clears_itself_once_full() {
        let mut cache = FrameCache::new();
        for i in 0..10u64 {
            cache.insert("Solid", 5, i, 0, vec![i as u8]);
        }
        assert_eq!(cache.len(), 10);
        cache.insert("Solid", 5, 10, 0, vec![10]);
        assert_eq!(cache.len(), 1);
    }
}
