//! The LEDFx-style audio modulation path (§4.8 steps 1-7): turns the current
//! [`AudioMetrics`] snapshot plus an [`EffectAssignment`]'s audio fields into a
//! single `[0, 1]` scalar, smoothed through a per-binding [`EnvelopeStore`].

use ledctl_audio_analysis::{AudioMetrics, AudioMetricsStore};
use ledctl_config::{AudioChannel, EffectAssignment, ReactiveMode};

use crate::envelope::EnvelopeStore;

fn channel_energy(metrics: &AudioMetrics, channel: AudioChannel) -> f32 {
    match channel {
        AudioChannel::Mix => metrics.energy,
        AudioChannel::Left => metrics.energy_left,
        AudioChannel::Right => metrics.energy_right,
    }
}

/// Averages the named fine bands in `selected_bands`, or `0.0` if none resolve.
fn selected_bands_energy(store: &AudioMetricsStore, selected_bands: &[String]) -> f32 {
    if selected_bands.is_empty() {
        return 0.0;
    }
    let sum: f32 = selected_bands.iter().map(|name| store.band_value(name)).sum();
    sum / selected_bands.len() as f32
}

fn reactive_feature(
    store: &AudioMetricsStore,
    metrics: &AudioMetrics,
    assignment: &EffectAssignment,
    channel: f32,
) -> f32 {
    if !assignment.selected_bands.is_empty() {
        return selected_bands_energy(store, &assignment.selected_bands);
    }
    if let Some((f_min, f_max)) = assignment.custom_band {
        if f_min != 0.0 || f_max != 0.0 {
            return store.custom_energy(f_min, f_max);
        }
    }
    match assignment.reactive_mode {
        ReactiveMode::Kick => metrics.bass * 1.2 * 0.7 + metrics.beat_envelope * 0.3,
        ReactiveMode::Bass => metrics.bass * assignment.band_gain_low,
        ReactiveMode::Mids => metrics.mid * assignment.band_gain_mid,
        ReactiveMode::Treble => metrics.treble * assignment.band_gain_high,
        ReactiveMode::Full => channel * 0.4 + metrics.mid * 0.25 + metrics.bass * 0.2 + metrics.treble * 0.15,
    }
}

fn profile_gain(audio_profile: Option<&str>) -> f32 {
    match audio_profile {
        Some("ledfx_energy") => 1.1,
        Some("ledfx_tempo") => 1.05,
        _ => 1.0,
    }
}

/// Computes the smoothed audio-modulation scalar for one binding at one tick.
///
/// `envelope_key` is typically `EffectBinding::envelope_key(segment_index)`.
/// `channel_override` lets a caller force mix/left/right independent of the
/// assignment's own `audio_channel` field; pass `assignment.audio_channel`
/// for the ordinary case.
#[allow(clippy::too_many_arguments)]
pub fn modulate(
    store: &AudioMetricsStore,
    metrics: &AudioMetrics,
    assignment: &EffectAssignment,
    envelope_key: &str,
    envelopes: &EnvelopeStore,
    fps: u16,
) -> f32 {
    let beat = if metrics.beat { 1.0 } else { 0.0 };

    let channel = channel_energy(metrics, assignment.audio_channel);
    let feature = reactive_feature(store, metrics, assignment, channel);

    let weighted = feature * (0.6 + beat * 0.4);

    let gain = profile_gain(assignment.audio_profile.as_deref());
    let mut audio_mod = (0.4 + weighted * 0.8 * gain).clamp(0.0, 1.0);

    audio_mod *= assignment.amplitude_scale;
    if assignment.brightness_compress > 0.0 {
        audio_mod = audio_mod.powf(1.0 / (1.0 + assignment.brightness_compress));
    }

    if assignment.beat_response {
        audio_mod *= 0.6 + beat * 0.4;
    }

    envelopes.smooth(envelope_key, audio_mod, fps, assignment.attack_ms, assignment.release_ms)
}
