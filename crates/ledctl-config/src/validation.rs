//! Configuration-drift validation (§7): missing sink references are skipped,
//! not fatal — the scheduler logs and moves on.

use crate::error::ConfigError;
use crate::sink::Sink;
use crate::snapshot::ConfigSnapshot;

/// Checks every binding and virtual-composite member against the sink list,
/// returning one [`ConfigError`] per dangling reference. An empty result
/// means the snapshot is internally consistent.
pub fn validate(snapshot: &ConfigSnapshot) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    for binding in &snapshot.bindings {
        if snapshot.sink(&binding.sink_id).is_none() {
            errors.push(ConfigError::UnknownSink {
                binding_id: binding.envelope_key(0),
                sink_id: binding.sink_id.clone(),
            });
        }
    }

    for sink in &snapshot.sinks {
        if let Sink::Virtual(composite) = sink {
            for member in &composite.members {
                if snapshot.sink(&member.sink_id).is_none() {
                    errors.push(ConfigError::UnknownMember {
                        composite_id: composite.id.clone(),
                        member_id: member.sink_id.clone(),
                    });
                }
            }
        }
    }

    errors
}

/// Bindings whose sink reference resolved successfully, in declaration order.
/// Skips (and does not panic on) dangling references per the configuration-drift policy.
pub fn resolvable_bindings<'a>(snapshot: &'a ConfigSnapshot) -> Vec<&'a crate::binding::EffectBinding> {
    snapshot
        .enabled_bindings()
        .filter(|b| snapshot.sink(&b.sink_id).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::EffectBinding;
    use crate::effect::{AudioChannel, Direction, EffectAssignment, HexColor, ReactiveMode};
    use crate::sink::{LocalSink, SinkAudioParams};

    fn assignment() -> EffectAssignment {
        EffectAssignment {
            effect: "Solid".into(),
            speed: 0,
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
    fn dangling_binding_is_flagged_but_not_fatal() {
        let mut snapshot = ConfigSnapshot::default();
        snapshot.bindings.push(EffectBinding {
            sink_id: "ghost".into(),
            assignment: assignment(),
            direct_stream: true,
            fps_override: None,
            enabled: true,
        });
        let errors = validate(&snapshot);
        assert_eq!(errors.len(), 1);
        assert!(resolvable_bindings(&snapshot).is_empty());
    }

    #[test]
    fn valid_binding_resolves() {
        let mut snapshot = ConfigSnapshot::default();
        snapshot.sinks.push(Sink::Local(LocalSink {
            id: "s1".into(),
            name: "Strip".into(),
            start_index: 0,
            length: 60,
            render_order: 0,
            pin: 2,
            channel: 0,
            chipset: "WS2812B".into(),
            color_order: "GRB".into(),
            enabled: true,
            reverse: false,
            mirror: false,
            matrix: None,
            audio: SinkAudioParams::default(),
            gamma_color: 2.2,
            gamma_brightness: 2.2,
            apply_gamma: true,
        }));
        snapshot.bindings.push(EffectBinding {
            sink_id: "s1".into(),
            assignment: assignment(),
            direct_stream: true,
            fps_override: None,
            enabled: true,
        });
        assert!(validate(&snapshot).is_empty());
        assert_eq!(resolvable_bindings(&snapshot).len(), 1);
    }
}
