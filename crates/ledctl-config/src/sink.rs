//! Sink data model: local strips, remote DDP nodes, and virtual composites.

use ledctl_core::{ColorOrder, MatrixGeometry};
use serde::{Deserialize, Serialize};

/// Per-sink audio reaction tuning, independent of which effect is assigned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SinkAudioParams {
    #[serde(default = "default_one")]
    pub sensitivity: f32,
    #[serde(default)]
    pub power_cap_ma: u32,
}

impl Default for SinkAudioParams {
    fn default() -> Self {
        Self { sensitivity: 1.0, power_cap_ma: 0 }
    }
}

fn default_one() -> f32 {
    1.0
}

/// A local strip driven directly by a hardware output channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSink {
    pub id: String,
    pub name: String,
    pub start_index: u32,
    pub length: u32,
    #[serde(default)]
    pub render_order: i32,
    pub pin: u32,
    pub channel: u8,
    pub chipset: String,
    pub color_order: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub mirror: bool,
    #[serde(default)]
    pub matrix: Option<MatrixGeometry>,
    #[serde(default)]
    pub audio: SinkAudioParams,
    #[serde(default = "default_gamma")]
    pub gamma_color: f32,
    #[serde(default = "default_gamma")]
    pub gamma_brightness: f32,
    #[serde(default = "default_true")]
    pub apply_gamma: bool,
}

impl LocalSink {
    pub fn color_order(&self) -> ColorOrder {
        ColorOrder::parse_or_default(&self.color_order, 3)
    }
}

/// A remote LED node reachable over DDP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSink {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default = "default_ddp_port")]
    pub port: u16,
    pub led_count: u32,
    #[serde(default = "default_one_u32")]
    pub segment_count: u32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub auto_discovered: bool,
    #[serde(default)]
    pub matrix: Option<MatrixGeometry>,
    #[serde(default)]
    pub last_seen_unix_ms: u64,
}

fn default_ddp_port() -> u16 {
    4048
}

fn default_one_u32() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_gamma() -> f32 {
    2.2
}

/// One member of a virtual composite: a slice into another sink's pixel ribbon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualSegmentMember {
    pub sink_id: String,
    pub start_offset: u32,
    pub length: u32,
}

/// An ordered stitch of local/remote sinks addressed as one contiguous ribbon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualComposite {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub members: Vec<VirtualSegmentMember>,
}

impl VirtualComposite {
    pub fn total_length(&self) -> u32 {
        self.members.iter().map(|m| m.length).sum()
    }
}

/// A logical LED target: local strip, remote node, or virtual composite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sink {
    Local(LocalSink),
    Remote(RemoteSink),
    Virtual(VirtualComposite),
}

impl Sink {
    pub fn id(&self) -> &str {
        match self {
            Sink::Local(s) => &s.id,
            Sink::Remote(s) => &s.id,
            Sink::Virtual(s) => &s.id,
        }
    }

    pub fn led_count(&self) -> u32 {
        match self {
            Sink::Local(s) => s.length,
            Sink::Remote(s) => s.led_count,
            Sink::Virtual(s) => s.total_length(),
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            Sink::Local(s) => s.enabled,
            Sink::Remote(s) => s.active,
            Sink::Virtual(s) => s.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_composite_total_length_sums_members() {
        let vc = VirtualComposite {
            id: "vc1".into(),
            name: "Wall".into(),
            enabled: true,
            members: vec![
                VirtualSegmentMember { sink_id: "a".into(), start_offset: 0, length: 100 },
                VirtualSegmentMember { sink_id: "b".into(), start_offset: 0, length: 50 },
            ],
        };
        assert_eq!(vc.total_length(), 150);
    }

    #[test]
    fn local_sink_color_order_defaults_on_unknown_name() {
        let sink = LocalSink {
            id: "s1".into(),
            name: "Strip".into(),
            start_index: 0,
            length: 60,
            render_order: 0,
            pin: 2,
            channel: 0,
            chipset: "WS2812B".into(),
            color_order: "nonsense".into(),
            enabled: true,
            reverse: false,
            mirror: false,
            matrix: None,
            audio: SinkAudioParams::default(),
            gamma_color: 2.2,
            gamma_brightness: 2.2,
            apply_gamma: true,
        };
        assert_eq!(sink.color_order(), ColorOrder::Grb);
    }
}
