//! Per-effect state buckets: `(effect_name, sink_id, length) -> Vec<f32>` (§3).

use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct BucketKey {
    effect_name: String,
    sink_id: String,
    length: u32,
}

/// Owns every stateful effect's history buffer (fire heat, meteor trail,
/// twinkle envelopes, ripple radii, rain positions, matrix drops, comet
/// decay). A bucket is sized on first use and recreated on length change;
/// it otherwise lives for the process lifetime.
#[derive(Default)]
pub struct EffectStateStore {
    buckets: Mutex<HashMap<BucketKey, Vec<f32>>>,
}

impl EffectStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with mutable access to the bucket for `(effect_name, sink_id, length)`,
    /// creating or resizing it to `length` zeroed slots first if needed.
    pub fn with_bucket<R>(
        &self,
        effect_name: &str,
        sink_id: &str,
        length: u32,
        f: impl FnOnce(&mut Vec<f32>) -> R,
    ) -> R {
        let key = BucketKey { effect_name: effect_name.to_string(), sink_id: sink_id.to_string(), length };
        let mut buckets = self.buckets.lock().expect("effect state store mutex poisoned");
        let bucket = buckets.entry(key).or_insert_with(|| vec![0.0; length as usize]);
        if bucket.len() != length as usize {
            bucket.resize(length as usize, 0.0);
        }
        f(bucket)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.lock().expect("effect state store mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_is_created_sized_and_reused() {
        let store = EffectStateStore::new();
        store.with_bucket("Fire 2012", "strip-1", 10, |bucket| {
            assert_eq!(bucket.len(), 10);
            bucket[0] = 5.0;
        });
        store.with_bucket("Fire 2012", "strip-1", 10, |bucket| {
            assert_eq!(bucket[0], 5.0);
        });
        assert_eq!(store.bucket_count(), 1);
    }

    #[test]
    fn length_change_recreates_the_bucket() {
        let store = EffectStateStore::new();
        store.with_bucket("Meteor", "strip-1", 10, |bucket| bucket[0] = 9.0);
        store.with_bucket("Meteor", "strip-1", 20, |bucket| {
            assert_eq!(bucket.len(), 20);
            assert_eq!(bucket[0], 0.0);
        });
    }
}
