//! The render function's argument bundle (§4.8): a binding's resolved effect
//! parameters plus the frame-level values the scheduler supplies every tick.

use ledctl_config::Direction;

#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub led_count: usize,
    pub frame_index: u64,
    pub global_brightness: u8,
    pub fps: u16,
    pub color1: (u8, u8, u8),
    pub color2: (u8, u8, u8),
    pub color3: (u8, u8, u8),
    /// Effective per-binding brightness (`EffectAssignment::effective_brightness`).
    pub brightness: u8,
    /// The smoothed `[0, 1]` scalar from the audio modulation path; `0.0` when
    /// the binding isn't audio-linked.
    pub audio_mod: f32,
    pub speed: u8,
    pub intensity: u8,
    pub direction: Direction,
}
