//! The full configuration snapshot consumed by the scheduler (§6.3).

use serde::{Deserialize, Serialize};

use crate::audio_settings::AudioSettings;
use crate::binding::EffectBinding;
use crate::sink::Sink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverKind {
    Ws281x,
    Spi,
    Mixed,
}

impl Default for DriverKind {
    fn default() -> Self {
        DriverKind::Ws281x
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareConfig {
    #[serde(default)]
    pub driver: DriverKind,
    #[serde(default = "default_fps")]
    pub target_fps: u16,
    #[serde(default)]
    pub global_current_limit_ma: u32,
    #[serde(default = "default_full_u8")]
    pub global_brightness: u8,
    #[serde(default)]
    pub psu_voltage: f32,
    #[serde(default)]
    pub psu_watts: f32,
    #[serde(default)]
    pub auto_power_limit: bool,
    #[serde(default = "default_one_u8")]
    pub parallel_output_count: u8,
    #[serde(default)]
    pub dma_enabled: bool,
    #[serde(default = "default_ddp_port")]
    pub ddp_port: u16,
}

fn default_fps() -> u16 {
    60
}

fn default_full_u8() -> u8 {
    255
}

fn default_one_u8() -> u8 {
    1
}

fn default_ddp_port() -> u16 {
    4048
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::default(),
            target_fps: default_fps(),
            global_current_limit_ma: 0,
            global_brightness: default_full_u8(),
            psu_voltage: 5.0,
            psu_watts: 0.0,
            auto_power_limit: false,
            parallel_output_count: default_one_u8(),
            dma_enabled: true,
            ddp_port: default_ddp_port(),
        }
    }
}

impl HardwareConfig {
    /// Target FPS, clamped to the `[1, 240]` range the scheduler supports.
    pub fn effective_fps(&self) -> u16 {
        self.target_fps.clamp(1, 240)
    }
}

/// A decoded configuration snapshot: the scheduler's read-only input per tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(default)]
    pub hardware: HardwareConfig,
    #[serde(default)]
    pub sinks: Vec<Sink>,
    #[serde(default)]
    pub bindings: Vec<EffectBinding>,
    #[serde(default)]
    pub audio: AudioSettings,
}

impl ConfigSnapshot {
    pub fn sink(&self, id: &str) -> Option<&Sink> {
        self.sinks.iter().find(|s| s.id() == id)
    }

    pub fn enabled_bindings(&self) -> impl Iterator<Item = &EffectBinding> {
        self.bindings.iter().filter(|b| b.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_clamped() {
        let mut hw = HardwareConfig::default();
        hw.target_fps = 1000;
        assert_eq!(hw.effective_fps(), 240);
        hw.target_fps = 0;
        assert_eq!(hw.effective_fps(), 1);
    }

    #[test]
    fn sink_lookup_by_id() {
        let mut snapshot = ConfigSnapshot::default();
        snapshot.sinks.push(Sink::Remote(crate::sink::RemoteSink {
            id: "r1".into(),
            name: "Porch".into(),
            address: "10.0.0.2".into(),
            port: 4048,
            led_count: 240,
            segment_count: 1,
            active: true,
            auto_discovered: false,
            matrix: None,
            last_seen_unix_ms: 0,
        }));
        assert!(snapshot.sink("r1").is_some());
        assert!(snapshot.sink("missing").is_none());
    }
}
