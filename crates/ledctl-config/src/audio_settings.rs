//! Audio source configuration consumed by the analyzer.

use serde::{Deserialize, Serialize};

use ledctl_audio_analysis::clamp_fft_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioSourceKind {
    None,
    DirectPcmStream,
    LineInput,
}

impl Default for AudioSourceKind {
    fn default() -> Self {
        AudioSourceKind::None
    }
}

/// PCM network source block: host/port for the analyzer's socket ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcmSourceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_pcm_port")]
    pub port: u16,
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u32,
    #[serde(default = "default_true")]
    pub prefer_udp: bool,
}

impl Default for PcmSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_pcm_port(),
            latency_ms: default_latency_ms(),
            prefer_udp: true,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_pcm_port() -> u16 {
    5000
}

fn default_latency_ms() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    #[serde(default)]
    pub source: AudioSourceKind,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_frame_ms")]
    pub frame_duration_ms: u32,
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    #[serde(default = "default_true")]
    pub stereo: bool,
    #[serde(default = "default_one")]
    pub sensitivity: f32,
    #[serde(default)]
    pub pcm: PcmSourceConfig,
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_frame_ms() -> u32 {
    20
}

fn default_fft_size() -> usize {
    1024
}

fn default_one() -> f32 {
    1.0
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            source: AudioSourceKind::None,
            sample_rate: default_sample_rate(),
            frame_duration_ms: default_frame_ms(),
            fft_size: default_fft_size(),
            stereo: true,
            sensitivity: 1.0,
            pcm: PcmSourceConfig::default(),
        }
    }
}

impl AudioSettings {
    /// The FFT size actually used, clamped to a power of two in `[64, 4096]`.
    pub fn effective_fft_size(&self) -> usize {
        clamp_fft_size(self.fft_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_fft_size_clamps_to_power_of_two() {
        let mut settings = AudioSettings::default();
        settings.fft_size = 900;
        assert_eq!(settings.effective_fft_size(), 1024);
    }
}
