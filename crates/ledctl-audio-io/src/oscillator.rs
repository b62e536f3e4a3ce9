//! Internal fallback used when no PCM source is configured or reachable (§7):
//! synthetic, smoothly-varying metrics so audio-reactive effects keep moving
//! instead of going flat.

use ledctl_audio_analysis::AudioMetrics;

/// Produces a fallback snapshot for elapsed time `t` in seconds since startup.
pub fn fallback_metrics(t: f32, timestamp_us: u64, processed_us: u64) -> AudioMetrics {
    let energy = 0.35 + 0.35 * (0.15 * t).sin();
    let beat_envelope = 0.5 + 0.5 * (0.12 * t).sin();
    AudioMetrics {
        energy,
        energy_left: energy,
        energy_right: energy,
        bass: energy,
        mid: energy * 0.8,
        treble: energy * 0.6,
        beat: false,
        beat_envelope,
        tempo_bpm: 0.0,
        timestamp_us,
        processed_us,
    }
    .clamped()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_stays_within_documented_bounds() {
        for i in 0..1000 {
            let t = i as f32 * 0.05;
            let m = fallback_metrics(t, 0, 0);
            assert!((0.0..=0.7).contains(&m.energy));
            assert!((0.0..=1.0).contains(&m.beat_envelope));
            assert!(!m.beat);
        }
    }
}
