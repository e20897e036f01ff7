//! Light effects and effect name resolution.

/// Persistent light effect.
///
/// Only these values are ever stored. The numeric ids are part of the
/// persistent record layout; id `3` is taken by [`EffectId::Flash`], which is
/// never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Effect {
    #[default]
    Instant,
    CrossFadeSlow,
    CrossFadeFast,
    Christmas,
}

impl Effect {
    pub const fn as_u8(self) -> u8 {
        match self {
            Effect::Instant => 0,
            Effect::CrossFadeSlow => 1,
            Effect::CrossFadeFast => 2,
            Effect::Christmas => 4,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Effect::Instant),
            1 => Some(Effect::CrossFadeSlow),
            2 => Some(Effect::CrossFadeFast),
            4 => Some(Effect::Christmas),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Effect::Instant => "instant",
            Effect::CrossFadeSlow => "colorfade_slow",
            Effect::CrossFadeFast => "colorfade_fast",
            Effect::Christmas => "christmas",
        }
    }
}

/// Effect requested by a command.
///
/// Either a persistent [`Effect`] or the transient flash request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectId {
    Effect(Effect),
    Flash,
}

impl EffectId {
    pub const FLASH_NAME: &'static str = "flash";

    /// Resolve an effect name.
    ///
    /// Matching is exact and case-sensitive. Unknown names, including the
    /// empty string, fall back to [`Effect::Instant`].
    pub fn resolve(name: &str) -> Self {
        match name {
            "instant" => EffectId::Effect(Effect::Instant),
            "colorfade_slow" => EffectId::Effect(Effect::CrossFadeSlow),
            "colorfade_fast" => EffectId::Effect(Effect::CrossFadeFast),
            "christmas" => EffectId::Effect(Effect::Christmas),
            Self::FLASH_NAME => EffectId::Flash,
            _ => EffectId::Effect(Effect::default()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EffectId::Effect(effect) => effect.as_str(),
            EffectId::Flash => Self::FLASH_NAME,
        }
    }
}

impl From<Effect> for EffectId {
    fn from(effect: Effect) -> Self {
        EffectId::Effect(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!(EffectId::resolve("instant"), Effect::Instant.into());
        assert_eq!(EffectId::resolve("colorfade_slow"), Effect::CrossFadeSlow.into());
        assert_eq!(EffectId::resolve("colorfade_fast"), Effect::CrossFadeFast.into());
        assert_eq!(EffectId::resolve("christmas"), Effect::Christmas.into());
        assert_eq!(EffectId::resolve("flash"), EffectId::Flash);
    }

    #[test]
    fn unknown_names_fall_back_to_instant() {
        assert_eq!(EffectId::resolve("sparkle"), Effect::Instant.into());
        assert_eq!(EffectId::resolve(""), Effect::Instant.into());
    }

    #[test]
    fn resolution_is_case_sensitive() {
        assert_eq!(EffectId::resolve("Flash"), Effect::Instant.into());
        assert_eq!(EffectId::resolve("CHRISTMAS"), Effect::Instant.into());
        assert_eq!(EffectId::resolve(" instant"), Effect::Instant.into());
    }

    #[test]
    fn names_map_back_to_ids() {
        for id in [
            EffectId::Effect(Effect::Instant),
            EffectId::Effect(Effect::CrossFadeSlow),
            EffectId::Effect(Effect::CrossFadeFast),
            EffectId::Effect(Effect::Christmas),
            EffectId::Flash,
        ] {
            assert_eq!(EffectId::resolve(id.as_str()), id);
        }
    }

    #[test]
    fn raw_ids_skip_flash_slot() {
        assert_eq!(Effect::from_u8(3), None);
        assert_eq!(Effect::from_u8(4), Some(Effect::Christmas));
        assert_eq!(Effect::from_u8(0xFF), None);
        assert_eq!(Effect::Christmas.as_u8(), 4);
    }
}
