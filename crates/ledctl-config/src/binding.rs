//! Scheduler-level binding of a sink to an effect assignment.

use serde::{Deserialize, Serialize};

use crate::effect::EffectAssignment;

/// Pairs a sink (by id) with an effect assignment plus transport flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectBinding {
    pub sink_id: String,
    pub assignment: EffectAssignment,
    #[serde(default = "default_true")]
    pub direct_stream: bool,
    #[serde(default)]
    pub fps_override: Option<u16>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl EffectBinding {
    /// Stable key for the per-binding audio envelope smoother.
    pub fn envelope_key(&self, segment_index: usize) -> String {
        format!("{}:{}:{}", self.sink_id, segment_index, self.assignment.effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{AudioChannel, Direction, HexColor, ReactiveMode};

    fn sample_assignment() -> EffectAssignment {
        EffectAssignment {
            effect: "Rainbow".into(),
            speed: 128,
            intensity: 0,
            brightness: 255,
            brightness_override: None,
            direction: Direction::Forward,
            color1: HexColor::default(),
            color2: HexColor::default(),
            color3: HexColor::default(),
            palette: None,
            gradient: None,
            blend_mode: None,
            audio_link: false,
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
        }
    }

    #[test]
    fn envelope_key_combines_sink_segment_and_effect() {
        let binding = EffectBinding {
            sink_id: "remote-1".into(),
            assignment: sample_assignment(),
            direct_stream: true,
            fps_override: None,
            enabled: true,
        };
        assert_eq!(binding.envelope_key(0), "remote-1:0:Rainbow");
    }
}
