//! Effect assignment: the per-sink record binding an effect name to its parameters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioChannel {
    Mix,
    Left,
    Right,
}

impl Default for AudioChannel {
    fn default() -> Self {
        AudioChannel::Mix
    }
}

/// Which reactive feature drives audio modulation when no explicit band list
/// or custom frequency range is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactiveMode {
    Full,
    Kick,
    Bass,
    Mids,
    Treble,
}

impl Default for ReactiveMode {
    fn default() -> Self {
        ReactiveMode::Full
    }
}

/// A hex RGB color, stored as `#rrggbb` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexColor(pub u8, pub u8, pub u8);

impl Default for HexColor {
    fn default() -> Self {
        HexColor(255, 255, 255)
    }
}

/// Per-sink binding of an effect name to its full parameter set (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectAssignment {
    pub effect: String,
    #[serde(default)]
    pub speed: u8,
    #[serde(default)]
    pub intensity: u8,
    #[serde(default = "default_full_u8")]
    pub brightness: u8,
    #[serde(default)]
    pub brightness_override: Option<u8>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub color1: HexColor,
    #[serde(default)]
    pub color2: HexColor,
    #[serde(default)]
    pub color3: HexColor,
    #[serde(default)]
    pub palette: Option<String>,
    #[serde(default)]
    pub gradient: Option<String>,
    #[serde(default)]
    pub blend_mode: Option<String>,
    #[serde(default)]
    pub audio_link: bool,
    #[serde(default)]
    pub audio_profile: Option<String>,
    #[serde(default)]
    pub audio_channel: AudioChannel,
    #[serde(default)]
    pub reactive_mode: ReactiveMode,
    #[serde(default)]
    pub custom_band: Option<(f32, f32)>,
    #[serde(default)]
    pub selected_bands: Vec<String>,
    #[serde(default = "default_one")]
    pub band_gain_low: f32,
    #[serde(default = "default_one")]
    pub band_gain_mid: f32,
    #[serde(default = "default_one")]
    pub band_gain_high: f32,
    #[serde(default = "default_one")]
    pub amplitude_scale: f32,
    #[serde(default)]
    pub brightness_compress: f32,
    #[serde(default)]
    pub beat_response: bool,
    #[serde(default = "default_attack_ms")]
    pub attack_ms: f32,
    #[serde(default = "default_release_ms")]
    pub release_ms: f32,
    #[serde(default = "default_gamma")]
    pub gamma_color: f32,
    #[serde(default = "default_gamma")]
    pub gamma_brightness: f32,
}

fn default_full_u8() -> u8 {
    255
}

fn default_one() -> f32 {
    1.0
}

fn default_attack_ms() -> f32 {
    50.0
}

fn default_release_ms() -> f32 {
    250.0
}

fn default_gamma() -> f32 {
    2.2
}

impl EffectAssignment {
    /// Effective brightness after the optional override.
    pub fn effective_brightness(&self) -> u8 {
        self.brightness_override.unwrap_or(self.brightness)
    }
}
