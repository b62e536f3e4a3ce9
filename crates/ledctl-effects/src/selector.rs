//! Effect-engine selector: a read-only metadata table mapping effect name to
//! default engine and audio capability (§4.8, §4.12).

/// Which rendering family an effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Wled,
    Ledfx,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Wled => "wled",
            Engine::Ledfx => "ledfx",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EffectMetadata {
    pub name: &'static str,
    pub audio_reactive: bool,
    pub supports_audio_toggle: bool,
    pub default_engine: Engine,
    pub category: &'static str,
}

/// The closed set of known effects. Names are matched case-insensitively
/// with partial-substring fallback both ways.
pub const EFFECT_TABLE: &[EffectMetadata] = &[
    EffectMetadata { name: "Solid", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Basic" },
    EffectMetadata { name: "Blink", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Basic" },
    EffectMetadata { name: "Breathe", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Basic" },
    EffectMetadata { name: "Colorloop", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Basic" },
    EffectMetadata { name: "Rainbow", audio_reactive: false, supports_audio_toggle: true, default_engine: Engine::Wled, category: "Rhythm" },
    EffectMetadata { name: "Color Wipe", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Basic" },
    EffectMetadata { name: "Theater", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Basic" },
    EffectMetadata { name: "Running", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Basic" },
    EffectMetadata { name: "Twinkle", audio_reactive: false, supports_audio_toggle: true, default_engine: Engine::Wled, category: "Sparkle" },
    EffectMetadata { name: "Sparkle", audio_reactive: false, supports_audio_toggle: true, default_engine: Engine::Wled, category: "Sparkle" },
    EffectMetadata { name: "Strobe", audio_reactive: false, supports_audio_toggle: true, default_engine: Engine::Wled, category: "Sparkle" },
    EffectMetadata { name: "Gradient", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Basic" },
    EffectMetadata { name: "Scanner", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Motion" },
    EffectMetadata { name: "Meteor", audio_reactive: false, supports_audio_toggle: true, default_engine: Engine::Wled, category: "Motion" },
    EffectMetadata { name: "Comet", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Motion" },
    EffectMetadata { name: "Plasma", audio_reactive: false, supports_audio_toggle: true, default_engine: Engine::Wled, category: "Noise" },
    EffectMetadata { name: "Pride", audio_reactive: false, supports_audio_toggle: false, default_engine: Engine::Wled, category: "Noise" },
    EffectMetadata { name: "Beat Pulse", audio_reactive: true, supports_audio_toggle: true, default_engine: Engine::Wled, category: "Rhythm" },
    EffectMetadata { name: "Fire 2012", audio_reactive: false, supports_audio_toggle: true, default_engine: Engine::Wled, category: "Fire" },
    EffectMetadata { name: "Fire", audio_reactive: true, supports_audio_toggle: true, default_engine: Engine::Ledfx, category: "Fire" },
    EffectMetadata { name: "Matrix", audio_reactive: true, supports_audio_toggle: true, default_engine: Engine::Ledfx, category: "Motion" },
    EffectMetadata { name: "Waves", audio_reactive: true, supports_audio_toggle: true, default_engine: Engine::Ledfx, category: "Noise" },
    EffectMetadata { name: "Ripple Flow", audio_reactive: true, supports_audio_toggle: true, default_engine: Engine::Ledfx, category: "Rhythm" },
    EffectMetadata { name: "Rain", audio_reactive: true, supports_audio_toggle: true, default_engine: Engine::Ledfx, category: "Motion" },
    EffectMetadata { name: "Aura", audio_reactive: true, supports_audio_toggle: true, default_engine: Engine::Ledfx, category: "Noise" },
    EffectMetadata { name: "Hyperspace", audio_reactive: true, supports_audio_toggle: true, default_engine: Engine::Ledfx, category: "Motion" },
];

pub(crate) fn names_match(query: &str, candidate: &str) -> bool {
    let q = query.to_lowercase();
    let c = candidate.to_lowercase();
    q == c || c.contains(&q) || q.contains(&c)
}

/// Looks up metadata for `name`: exact match first, then case-insensitive,
/// then partial-substring both ways.
pub fn effect_metadata(name: &str) -> Option<&'static EffectMetadata> {
    EFFECT_TABLE
        .iter()
        .find(|m| m.name == name)
        .or_else(|| EFFECT_TABLE.iter().find(|m| m.name.eq_ignore_ascii_case(name)))
        .or_else(|| EFFECT_TABLE.iter().find(|m| names_match(name, m.name)))
}

/// Resolves which engine renders `name` given the binding's `audio_link`
/// flag (§4.8). Unknown names default to WLED-style.
pub fn select_engine(name: &str, audio_link: bool) -> Engine {
    let Some(meta) = effect_metadata(name) else {
        return Engine::Wled;
    };

    if !audio_link {
        return meta.default_engine;
    }

    match meta.default_engine {
        Engine::Wled => Engine::Wled,
        Engine::Ledfx => Engine::Ledfx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s6_engine_selection() {
        assert_eq!(select_engine("Rain", true), Engine::Ledfx);
        assert_eq!(select_engine("Rain", false), Engine::Ledfx);
        assert_eq!(select_engine("Rainbow", true), Engine::Wled);
        assert_eq!(select_engine("Zzz", true), Engine::Wled);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(effect_metadata("rAiNbOw").is_some());
    }

    #[test]
    fn partial_substring_fallback_resolves() {
        assert!(effect_metadata("Fire 2012 Classic").is_some());
    }
}
