//! LEDFx-style time-driven, audio-reactive effects (§4.8). Time is measured in
//! seconds since the scheduler started; each shares the per-effect state
//! bucket for persistent animation (heat, drop positions, ring radii).

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::context::RenderContext;

fn new_frame(led_count: usize) -> Vec<u8> {
    vec![0u8; led_count * 3]
}

fn set_pixel(buf: &mut [u8], idx: usize, rgb: (u8, u8, u8)) {
    let o = idx * 3;
    buf[o] = rgb.0;
    buf[o + 1] = rgb.1;
    buf[o + 2] = rgb.2;
}

fn scale(c: (u8, u8, u8), level: f32) -> (u8, u8, u8) {
    let level = level.clamp(0.0, 1.0);
    ((f32::from(c.0) * level) as u8, (f32::from(c.1) * level) as u8, (f32::from(c.2) * level) as u8)
}

/// Rolling sines modulated by `audio_mod` (standing in for bass+mid envelope).
pub fn fire(ctx: &RenderContext, time_s: f32, state: &mut [f32]) -> Vec<u8> {
    let n = ctx.led_count.min(state.len());
    let drive = 0.3 + ctx.audio_mod * 0.7;
    for (i, heat) in state.iter_mut().take(n).enumerate() {
        let wobble = (time_s * 3.0 + i as f32 * 0.5).sin() * 0.5 + 0.5;
        let target = wobble * drive;
        *heat += (target - *heat) * 0.3;
    }
    let mut buf = new_frame(ctx.led_count);
    for i in 0..n {
        let h = state[i].clamp(0.0, 1.0);
        let color = ledctl_core::hsv_to_rgb(15.0 + h * 40.0, 1.0, h);
        set_pixel(&mut buf, i, color);
    }
    buf
}

/// Randomly spawned falling heads with decay, state is per-pixel brightness.
pub fn matrix(ctx: &RenderContext, state: &mut [f32]) -> Vec<u8> {
    let mut rng = Xoshiro256PlusPlus::from_entropy();
    let n = ctx.led_count.min(state.len());
    let spawn_chance = 0.02 + ctx.audio_mod * 0.1;

    if n > 0 && rng.gen::<f32>() < spawn_chance {
        state[0] = 1.0;
    }
    for i in (1..n).rev() {
        state[i] = state[i].max(state[i - 1] * 0.6);
    }
    for v in state.iter_mut().take(n) {
        *v *= 0.9;
    }

    let mut buf = new_frame(ctx.led_count);
    for i in 0..n {
        set_pixel(&mut buf, i, scale(ctx.color1, state[i]));
    }
    buf
}

/// Two-frequency rolling sines.
pub fn waves(ctx: &RenderContext, time_s: f32) -> Vec<u8> {
    let mut buf = new_frame(ctx.led_count);
    let n = ctx.led_count.max(1) as f32;
    for i in 0..ctx.led_count {
        let x = i as f32 / n;
        let wave = (x * 6.0 + time_s * 1.5).sin() * 0.5 + (x * 11.0 - time_s * 0.8).sin() * 0.5;
        let level = (wave * 0.5 + 0.5) * (0.4 + ctx.audio_mod * 0.6);
        set_pixel(&mut buf, i, scale(ctx.color1, level));
    }
    buf
}

/// Scrolling gradient between color1 and color2.
pub fn plasma(ctx: &RenderContext, time_s: f32) -> Vec<u8> {
    let mut buf = new_frame(ctx.led_count);
    let n = ctx.led_count.max(1) as f32;
    for i in 0..ctx.led_count {
        let x = i as f32 / n;
        let hue = ((x * 360.0 + time_s * 40.0) % 360.0 + 360.0) % 360.0;
        let color = ledctl_core::hsv_to_rgb(hue, 1.0, 0.4 + ctx.audio_mod * 0.6);
        set_pixel(&mut buf, i, color);
    }
    buf
}

/// Centers spawned on beat; concentric rings propagate outward. `state`
/// stores one active ring radius (`-1.0` = no ring).
pub fn ripple_flow(ctx: &RenderContext, beat: bool, state: &mut [f32]) -> Vec<u8> {
    let n = ctx.led_count.max(1);
    if state.is_empty() {
        return new_frame(ctx.led_count);
    }
    if beat && state[0] < 0.0 {
        state[0] = 0.0;
    }
    let mut buf = new_frame(ctx.led_count);
    if state[0] >= 0.0 {
        let center = n / 2;
        let radius = state[0];
        for i in 0..ctx.led_count {
            let dist = (i as f32 - center as f32).abs();
            let level = (1.0 - (dist - radius).abs() / 3.0).max(0.0) * ctx.audio_mod.max(0.3);
            set_pixel(&mut buf, i, scale(ctx.color1, level));
        }
        state[0] += 1.5;
        if state[0] > n as f32 {
            state[0] = -1.0;
        }
    }
    buf
}

/// Per-LED probabilistic drops, falling and fading. `state` holds drop
/// brightness per pixel.
pub fn rain(ctx: &RenderContext, state: &mut [f32]) -> Vec<u8> {
    let mut rng = Xoshiro256PlusPlus::from_entropy();
    let n = ctx.led_count.min(state.len());
    let drop_chance = 0.01 + ctx.audio_mod * 0.05;
    for v in state.iter_mut().take(n) {
        if rng.gen::<f32>() < drop_chance {
            *v = 1.0;
        } else {
            *v *= 0.85;
        }
    }
    let mut buf = new_frame(ctx.led_count);
    for i in 0..n {
        set_pixel(&mut buf, i, scale(ctx.color2, state[i]));
    }
    buf
}

/// Double-sine x slow pulse halo.
pub fn aura(ctx: &RenderContext, time_s: f32) -> Vec<u8> {
    let mut buf = new_frame(ctx.led_count);
    let n = ctx.led_count.max(1) as f32;
    let pulse = (time_s * 0.5).sin() * 0.5 + 0.5;
    for i in 0..ctx.led_count {
        let x = i as f32 / n;
        let wave = (x * 4.0 + time_s).sin() * (x * 7.0 - time_s * 0.6).sin();
        let level = (wave * 0.5 + 0.5) * pulse * (0.5 + ctx.audio_mod * 0.5);
        set_pixel(&mut buf, i, scale(ctx.color1, level));
    }
    buf
}

/// Streaking motion at a fixed 1.2x speed multiplier, audio-scaled brightness.
pub fn hyperspace(ctx: &RenderContext, time_s: f32) -> Vec<u8> {
    let mut buf = new_frame(ctx.led_count);
    let n = ctx.led_count.max(1) as f32;
    let speed_mult = 1.2;
    for i in 0..ctx.led_count {
        let x = i as f32 / n;
        let streak = ((x * 20.0 - time_s * speed_mult * 10.0) % 1.0 + 1.0) % 1.0;
        let level = (1.0 - streak).powf(3.0) * (0.3 + ctx.audio_mod * 0.7);
        set_pixel(&mut buf, i, scale(ctx.color1, level));
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledctl_config::Direction;

    fn ctx(led_count: usize, audio_mod: f32) -> RenderContext {
        RenderContext {
            led_count,
            frame_index: 0,
            global_brightness: 255,
            fps: 60,
            color1: (255, 0, 0),
            color2: (0, 0, 255),
            color3: (0, 255, 0),
            brightness: 255,
            audio_mod,
            speed: 128,
            intensity: 128,
            direction: Direction::Forward,
        }
    }

    #[test]
    fn fire_state_stays_within_unit_range() {
        let mut state = vec![0.0f32; 16];
        for i in 0..100 {
            fire(&ctx(16, 0.8), i as f32 * 0.016, &mut state);
        }
        assert!(state.iter().all(|h| (0.0..=1.0).contains(h)));
    }

    #[test]
    fn ripple_flow_arms_on_beat_and_eventually_resets() {
        let mut state = vec![-1.0f32];
        ripple_flow(&ctx(20, 1.0), true, &mut state);
        assert!(state[0] >= 0.0);
        for _ in 0..30 {
            ripple_flow(&ctx(20, 1.0), false, &mut state);
        }
        assert_eq!(state[0], -1.0);
    }

    #[test]
    fn rain_produces_correct_buffer_length() {
        let mut state = vec![0.0f32; 10];
        let buf = rain(&ctx(10, 0.5), &mut state);
        assert_eq!(buf.len(), 30);
    }
}
