//! WLED-style counter-driven effects (§4.8). Each function renders one frame
//! of `3 * led_count` RGB bytes from a shared `counter = frame_index * (1 + speed/16)`.

use ledctl_config::Direction;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::context::RenderContext;

fn counter(ctx: &RenderContext) -> u64 {
    let speed_factor = 1.0 + f32::from(ctx.speed) / 16.0;
    (ctx.frame_index as f32 * speed_factor) as u64
}

fn out_index(i: usize, led_count: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => i,
        Direction::Reverse => led_count - 1 - i,
    }
}

fn scale(c: (u8, u8, u8), level: f32) -> (u8, u8, u8) {
    let level = level.clamp(0.0, 1.0);
    (
        (f32::from(c.0) * level) as u8,
        (f32::from(c.1) * level) as u8,
        (f32::from(c.2) * level) as u8,
    )
}

fn set_pixel(buf: &mut [u8], idx: usize, rgb: (u8, u8, u8)) {
    let o = idx * 3;
    buf[o] = rgb.0;
    buf[o + 1] = rgb.1;
    buf[o + 2] = rgb.2;
}

fn new_frame(led_count: usize) -> Vec<u8> {
    vec![0u8; led_count * 3]
}

pub fn solid(ctx: &RenderContext) -> Vec<u8> {
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        set_pixel(&mut buf, i, ctx.color1);
    }
    buf
}

pub fn blink(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let period = (c >> 8).max(1);
    let on = (c / period) % 2 == 0;
    let color = if on { ctx.color1 } else { (0, 0, 0) };
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        set_pixel(&mut buf, i, color);
    }
    buf
}

pub fn breathe(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let phase = (c as f32 * std::f32::consts::PI / 128.0).sin().abs();
    let color = scale(ctx.color1, phase);
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        set_pixel(&mut buf, i, color);
    }
    buf
}

pub fn colorloop(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let hue = (c & 0xFF) as f32 / 255.0 * 360.0;
    let color = ledctl_core::hsv_to_rgb(hue, 1.0, 1.0);
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        set_pixel(&mut buf, i, color);
    }
    buf
}

pub fn rainbow(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let hue_offset = ((c >> 2) & 0xFF) as u16;
    let n = ctx.led_count.max(1) as u16;
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        let hue_byte = (hue_offset + (i as u16 * 256 / n)) & 0xFF;
        let hue = f32::from(hue_byte) / 256.0 * 360.0;
        let color = ledctl_core::hsv_to_rgb(hue, 1.0, 1.0);
        set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), color);
    }
    buf
}

pub fn color_wipe(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let n = ctx.led_count.max(1);
    let lit = (c as usize) % n;
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        let color = if i <= lit { ctx.color1 } else { ctx.color2 };
        set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), color);
    }
    buf
}

pub fn theater(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let phase = (c % 3) as usize;
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        let color = if i % 3 == phase { ctx.color1 } else { ctx.color2 };
        set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), color);
    }
    buf
}

pub fn running(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let n = ctx.led_count.max(1) as f32;
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        let phase = (i as f32 / n) * std::f32::consts::TAU + (c as f32 * 0.1);
        let level = (phase.sin() * 0.5 + 0.5).clamp(0.0, 1.0);
        set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), scale(ctx.color1, level));
    }
    buf
}

pub fn twinkle(ctx: &RenderContext, state: &mut [f32]) -> Vec<u8> {
    let mut rng = Xoshiro256PlusPlus::from_entropy();
    let spawn_chance = f32::from(ctx.intensity) / 4.0 / 255.0;
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count.min(state.len()) {
        if state[i] <= 0.0 && rng.gen::<f32>() < spawn_chance {
            state[i] = 1.0;
        }
        if state[i] > 0.0 {
            set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), scale(ctx.color1, state[i]));
            state[i] *= 0.92;
            if state[i] < 0.02 {
                state[i] = 0.0;
            }
        }
    }
    buf
}

pub fn sparkle(ctx: &RenderContext) -> Vec<u8> {
    let mut rng = Xoshiro256PlusPlus::from_entropy();
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        set_pixel(&mut buf, i, ctx.color2);
    }
    if ctx.led_count > 0 {
        let i = rng.gen_range(0..ctx.led_count);
        set_pixel(&mut buf, i, ctx.color1);
    }
    buf
}

pub fn strobe(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let cycle_frames = (256u64.saturating_sub(u64::from(ctx.speed))).max(2);
    let on_frames = (u64::from(ctx.intensity) / 32).max(1);
    let on = (c % cycle_frames) < on_frames;
    let color = if on { ctx.color1 } else { (0, 0, 0) };
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        set_pixel(&mut buf, i, color);
    }
    buf
}

pub fn gradient(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let n = ctx.led_count.max(1) as f32;
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        let t = (((i as f32 + c as f32) % n) / n).clamp(0.0, 1.0);
        let color = (
            lerp_u8(ctx.color1.0, ctx.color2.0, t),
            lerp_u8(ctx.color1.1, ctx.color2.1, t),
            lerp_u8(ctx.color1.2, ctx.color2.2, t),
        );
        set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), color);
    }
    buf
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8
}

pub fn scanner(ctx: &RenderContext) -> Vec<u8> {
    let c = counter(ctx);
    let n = ctx.led_count.max(1);
    let width = 1.0 + f32::from(ctx.intensity) / 32.0;
    let span = (n.saturating_sub(1)).max(1) as u64 * 2;
    let pos_cycle = c % span.max(1);
    let pos = if pos_cycle < span / 2 { pos_cycle } else { span - pos_cycle };
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        let dist = (i as f32 - pos as f32).abs();
        let level = (1.0 - dist / width).max(0.0);
        set_pixel(&mut buf, i, scale(ctx.color1, level));
    }
    buf
}

pub fn meteor(ctx: &RenderContext, state: &mut [f32]) -> Vec<u8> {
    let mut rng = Xoshiro256PlusPlus::from_entropy();
    let c = counter(ctx);
    let n = ctx.led_count.max(1);
    let head = (c as usize) % n;
    let head_size = 1 + (usize::from(ctx.intensity) / 32);

    for v in state.iter_mut() {
        let jitter = 0.85 + rng.gen::<f32>() * 0.1;
        *v *= jitter;
        if *v < 0.02 {
            *v = 0.0;
        }
    }
    for offset in 0..head_size {
        if let Some(v) = state.get_mut((head + offset) % n) {
            *v = 1.0;
        }
    }

    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count.min(state.len()) {
        set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), scale(ctx.color1, state[i]));
    }
    buf
}

pub fn comet(ctx: &RenderContext, state: &mut [f32]) -> Vec<u8> {
    let c = counter(ctx);
    let n = ctx.led_count.max(1);
    let head = (c as usize) % n;

    for v in state.iter_mut() {
        *v = (*v - 20.0 / 255.0).max(0.0);
    }
    if let Some(v) = state.get_mut(head) {
        *v = 1.0;
    }

    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count.min(state.len()) {
        set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), scale(ctx.color1, state[i]));
    }
    buf
}

pub fn plasma(ctx: &RenderContext) -> Vec<u8> {
    let t = ctx.frame_index as f32 * (0.02 + f32::from(ctx.speed) / 4000.0);
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        let x = i as f32;
        let v = (x * 0.12 + t).sin() + (x * 0.08 - t * 1.3).sin() + (t * 0.7).sin();
        let hue = ((v + 3.0) / 6.0) * 360.0;
        let color = ledctl_core::hsv_to_rgb(hue, 1.0, 1.0);
        set_pixel(&mut buf, i, color);
    }
    buf
}

pub fn pride(ctx: &RenderContext) -> Vec<u8> {
    let t = ctx.frame_index as f32 * 0.01;
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        let x = i as f32;
        let hue = ((x * 2.0 + t * 50.0).sin() * 0.5 + 0.5) * 360.0;
        let bri = (x * 0.3 + t * 20.0).sin() * 0.3 + 0.7;
        let color = ledctl_core::hsv_to_rgb(hue, 1.0, bri);
        set_pixel(&mut buf, i, color);
    }
    buf
}

pub fn beat_pulse(ctx: &RenderContext) -> Vec<u8> {
    let color = scale(ctx.color1, ctx.audio_mod);
    let mut buf = new_frame(ctx.led_count);
    for i in 0..ctx.led_count {
        set_pixel(&mut buf, i, color);
    }
    buf
}

/// Fire2012: a cooling/sparking cellular automaton. `state` is a per-pixel
/// heat buffer in `[0, 255]`, persisted across frames.
pub fn fire2012(ctx: &RenderContext, state: &mut [f32]) -> Vec<u8> {
    let mut rng = Xoshiro256PlusPlus::from_entropy();
    let n = ctx.led_count.min(state.len());
    let cooling = 20.0 + f32::from(ctx.speed) / 3.0;
    let sparking = 50.0 + f32::from(ctx.intensity) * 2.0 / 3.0;

    for heat in state.iter_mut().take(n) {
        let cooldown = rng.gen::<f32>() * cooling * 10.0 / n.max(1) as f32;
        *heat = (*heat - cooldown).max(0.0);
    }
    for i in (2..n).rev() {
        state[i] = (state[i - 1] + state[i - 2] + state[i - 2]) / 3.0;
    }
    if n > 0 && rng.gen::<f32>() * 255.0 < sparking {
        let spark_pos = rng.gen_range(0..n.min(7).max(1));
        state[spark_pos] = (state[spark_pos] + 160.0 + rng.gen::<f32>() * 95.0).min(255.0);
    }

    let mut buf = new_frame(ctx.led_count);
    for i in 0..n {
        let heat = state[i].clamp(0.0, 255.0) / 255.0;
        let (h, s, v) = (20.0 + heat * 30.0, 1.0, heat.min(1.0));
        let color = ledctl_core::hsv_to_rgb(h, s, v);
        set_pixel(&mut buf, out_index(i, ctx.led_count, ctx.direction), color);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledctl_config::Direction;

    fn ctx(led_count: usize, frame_index: u64, speed: u8, direction: Direction) -> RenderContext {
        RenderContext {
            led_count,
            frame_index,
            global_brightness: 255,
            fps: 60,
            color1: (255, 0, 0),
            color2: (0, 255, 0),
            color3: (0, 0, 255),
            brightness: 255,
            audio_mod: 0.5,
            speed,
            intensity: 128,
            direction,
        }
    }

    #[test]
    fn solid_fills_every_pixel_with_color1() {
        let c = ctx(4, 0, 0, Direction::Forward);
        let buf = solid(&c);
        assert_eq!(buf.len(), 12);
        for chunk in buf.chunks(3) {
            assert_eq!(chunk, &[255, 0, 0]);
        }
    }

    #[test]
    fn rainbow_respects_direction_reversal() {
        let forward = rainbow(&ctx(8, 10, 64, Direction::Forward));
        let reverse = rainbow(&ctx(8, 10, 64, Direction::Reverse));
        assert_eq!(&forward[0..3], &reverse[21..24]);
    }

    #[test]
    fn color_wipe_produces_correct_length() {
        let buf = color_wipe(&ctx(16, 5, 32, Direction::Forward));
        assert_eq!(buf.len(), 48);
    }

    #[test]
    fn fire2012_stays_in_bounds_over_many_frames() {
        let mut heat = vec![0.0f32; 30];
        for i in 0..200 {
            let buf = fire2012(&ctx(30, i, 80, Direction::Forward), &mut heat);
            assert_eq!(buf.len(), 90);
        }
        assert!(heat.iter().all(|h| (0.0..=255.0).contains(h)));
    }

    #[test]
    fn twinkle_decays_spawned_pixels_toward_zero() {
        let mut state = vec![1.0f32; 4];
        for _ in 0..100 {
            twinkle(&ctx(4, 0, 0, Direction::Forward), &mut state);
        }
        assert!(state.iter().all(|v| *v < 0.5));
    }
}
