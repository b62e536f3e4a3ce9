//! Name-dispatch: resolves a binding's effect name and engine to the concrete
//! render function, wiring up state buckets, audio modulation and the
//! envelope smoother (§4.8).

use ledctl_audio_analysis::AudioMetricsStore;
use ledctl_config::EffectBinding;

use crate::audio_mod;
use crate::context::RenderContext;
use crate::envelope::EnvelopeStore;
use crate::ledfx;
use crate::selector::{self, Engine, names_match};
use crate::state::EffectStateStore;
use crate::wled;

fn hex_to_rgb(c: ledctl_config::HexColor) -> (u8, u8, u8) {
    (c.0, c.1, c.2)
}

/// Renders one frame for `binding` against `led_count` pixels at `frame_index`.
///
/// `time_s` is seconds since the scheduler started (used by LEDFx-style
/// effects); `segment_index` distinguishes multiple segments sharing one
/// sink for the envelope key (§4.11). `global_brightness` is the hardware-wide
/// brightness (§6.3); it is combined with the binding's own effective
/// brightness and applied to the rendered buffer before it is returned.
#[allow(clippy::too_many_arguments)]
pub fn render(
    states: &EffectStateStore,
    envelopes: &EnvelopeStore,
    audio: &AudioMetricsStore,
    binding: &EffectBinding,
    led_count: usize,
    frame_index: u64,
    fps: u16,
    time_s: f32,
    segment_index: usize,
    global_brightness: u8,
) -> Vec<u8> {
    let assignment = &binding.assignment;
    let engine = selector::select_engine(&assignment.effect, assignment.audio_link);
    let metrics = audio.get_metrics();

    let audio_mod_value = if engine == Engine::Ledfx && assignment.audio_link {
        let key = binding.envelope_key(segment_index);
        audio_mod::modulate(audio, &metrics, assignment, &key, envelopes, fps)
    } else {
        0.0
    };

    let ctx = RenderContext {
        led_count,
        frame_index,
        global_brightness,
        fps,
        color1: hex_to_rgb(assignment.color1),
        color2: hex_to_rgb(assignment.color2),
        color3: hex_to_rgb(assignment.color3),
        brightness: assignment.effective_brightness(),
        audio_mod: audio_mod_value,
        speed: assignment.speed,
        intensity: assignment.intensity,
        direction: assignment.direction,
    };

    let name = assignment.effect.as_str();

    let mut frame = match engine {
        Engine::Wled => render_wled(states, &binding.sink_id, led_count, name, &ctx),
        Engine::Ledfx => render_ledfx(states, &binding.sink_id, led_count, name, &ctx, time_s, metrics.beat),
    };
    ledctl_core::scale_rgb_buffer(&mut frame, ctx.global_brightness, ctx.brightness);
    frame
}

fn render_wled(states: &EffectStateStore, sink_id: &str, led_count: usize, name: &str, ctx: &RenderContext) -> Vec<u8> {
    if names_match(name, "fire 2012") || names_match(name, "fire2012") {
        return states.with_bucket("Fire 2012", sink_id, led_count as u32, |bucket| wled::fire2012(ctx, bucket));
    }
    if names_match(name, "twinkle") {
        return states.with_bucket("Twinkle", sink_id, led_count as u32, |bucket| wled::twinkle(ctx, bucket));
    }
    if names_match(name, "meteor") {
        return states.with_bucket("Meteor", sink_id, led_count as u32, |bucket| wled::meteor(ctx, bucket));
    }
    if names_match(name, "comet") {
        return states.with_bucket("Comet", sink_id, led_count as u32, |bucket| wled::comet(ctx, bucket));
    }
    if names_match(name, "blink") {
        return wled::blink(ctx);
    }
    if names_match(name, "breathe") {
        return wled::breathe(ctx);
    }
    if names_match(name, "colorloop") {
        return wled::colorloop(ctx);
    }
    if names_match(name, "rainbow") {
        return wled::rainbow(ctx);
    }
    if names_match(name, "color wipe") {
        return wled::color_wipe(ctx);
    }
    if names_match(name, "theater") || names_match(name, "chase") {
        return wled::theater(ctx);
    }
    if names_match(name, "running") || names_match(name, "sine") {
        return wled::running(ctx);
    }
    if names_match(name, "sparkle") {
        return wled::sparkle(ctx);
    }
    if names_match(name, "strobe") {
        return wled::strobe(ctx);
    }
    if names_match(name, "gradient") {
        return wled::gradient(ctx);
    }
    if names_match(name, "scanner") || names_match(name, "larson") {
        return wled::scanner(ctx);
    }
    if names_match(name, "plasma") {
        return wled::plasma(ctx);
    }
    if names_match(name, "pride") {
        return wled::pride(ctx);
    }
    if names_match(name, "beat pulse") {
        return wled::beat_pulse(ctx);
    }
    wled::solid(ctx)
}

fn render_ledfx(
    states: &EffectStateStore,
    sink_id: &str,
    led_count: usize,
    name: &str,
    ctx: &RenderContext,
    time_s: f32,
    beat: bool,
) -> Vec<u8> {
    if names_match(name, "matrix") {
        return states.with_bucket("Matrix", sink_id, led_count as u32, |bucket| ledfx::matrix(ctx, bucket));
    }
    if names_match(name, "ripple flow") {
        return states.with_bucket("Ripple Flow", sink_id, 1, |bucket| ledfx::ripple_flow(ctx, beat, bucket));
    }
    if names_match(name, "rain") {
        return states.with_bucket("Rain", sink_id, led_count as u32, |bucket| ledfx::rain(ctx, bucket));
    }
    if names_match(name, "fire") {
        return states.with_bucket("Fire", sink_id, led_count as u32, |bucket| ledfx::fire(ctx, time_s, bucket));
    }
    if names_match(name, "waves") {
        return ledfx::waves(ctx, time_s);
    }
    if names_match(name, "plasma") {
        return ledfx::plasma(ctx, time_s);
    }
    if names_match(name, "aura") {
        return ledfx::aura(ctx, time_s);
    }
    if names_match(name, "hyperspace") {
        return ledfx::hyperspace(ctx, time_s);
    }
    ledfx::waves(ctx, time_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledctl_config::{AudioChannel, Direction, EffectAssignment, HexColor, ReactiveMode};

    fn binding(effect: &str, audio_link: bool) -> EffectBinding {
        EffectBinding {
            sink_id: "strip-1".into(),
            assignment: EffectAssignment {
                effect: effect.into(),
                speed: 128,
                intensity: 128,
                brightness: 255,
                brightness_override: None,
                direction: Direction::Forward,
                color1: HexColor(255, 0, 0),
                color2: HexColor(0, 255, 0),
                color3: HexColor(0, 0, 255),
                palette: None,
                gradient: None,
                blend_mode: None,
                audio_link,
                audio_profile: None,
                audio_channel: AudioChannel::Mix,
                reactive_mode: ReactiveMode::Full,
                custom_band: None,
                selected_bands: vec![],
                band_gain_low: 1.0,
                band_gain_mid: 1.0,
                band_gain_high: 1.0,
                amplitude_scale: 1.0,
                brightness_compress: 0.0,
                beat_response: false,
                attack_ms: 50.0,
                release_ms: 250.0,
                gamma_color: 2.2,
                gamma_brightness: 2.2,
            },
            direct_stream: true,
            fps_override: None,
            enabled: true,
        }
    }

    #[test]
    fn renders_correct_buffer_length_for_wled_effect() {
        let states = EffectStateStore::new();
        let envelopes = EnvelopeStore::new();
        let audio = AudioMetricsStore::new(48000, 256);
        let b = binding("Rainbow", false);
        let buf = render(&states, &envelopes, &audio, &b, 10, 0, 60, 0.0, 0, 255);
        assert_eq!(buf.len(), 30);
    }

    #[test]
    fn renders_correct_buffer_length_for_ledfx_effect() {
        let states = EffectStateStore::new();
        let envelopes = EnvelopeStore::new();
        let audio = AudioMetricsStore::new(48000, 256);
        let b = binding("Rain", true);
        let buf = render(&states, &envelopes, &audio, &b, 12, 0, 60, 1.5, 0, 255);
        assert_eq!(buf.len(), 36);
    }

    #[test]
    fn global_and_effective_brightness_both_scale_the_output() {
        let states = EffectStateStore::new();
        let envelopes = EnvelopeStore::new();
        let audio = AudioMetricsStore::new(48000, 256);
        let mut b = binding("Solid", false);
        b.assignment.brightness = 128;
        let buf = render(&states, &envelopes, &audio, &b, 1, 0, 60, 0.0, 0, 255);
        assert!(buf[0] < 255, "per-binding brightness should dim the pixel: {buf:?}");

        let mut full = binding("Solid", false);
        full.assignment.brightness = 255;
        let dim = render(&states, &envelopes, &audio, &full, 1, 0, 60, 0.0, 0, 64);
        assert!(dim[0] < 64 + 4, "a low global brightness should dim the pixel: {dim:?}");
    }

    #[test]
    fn unknown_effect_falls_back_to_solid() {
        let states = EffectStateStore::new();
        let envelopes = EnvelopeStore::new();
        let audio = AudioMetricsStore::new(48000, 256);
        let b = binding("Totally Unknown", false);
        let buf = render(&states, &envelopes, &audio, &b, 3, 0, 60, 0.0, 0, 255);
        assert_eq!(&buf[0..3], &[255, 0, 0]);
    }
}
