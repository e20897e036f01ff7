//! Partial command merge.
//!
//! Fields are applied independently. The only coupling is between `effect`
//! and `flashing`: a flash request sets the flag on top of the current
//! persistent effect, any other effect replaces the effect and clears it.

use crate::domain::dto::LightCommand;
use crate::domain::effect::EffectId;
use crate::domain::entity::DeviceState;

impl DeviceState {
    /// Apply `command` and return the resulting state.
    ///
    /// The current state is not modified; callers commit the returned value
    /// once it has been persisted.
    #[must_use]
    pub fn merge(&self, command: &LightCommand) -> DeviceState {
        let mut next = *self;

        if let Some(power) = command.power {
            next.power = power;
        }
        if let Some(color) = command.color {
            next.color = color;
        }
        if let Some(brightness) = command.brightness {
            next.brightness = brightness;
        }
        if let Some(white) = command.white {
            next.white = white;
        }
        match command.effect {
            Some(EffectId::Flash) => next.flashing = true,
            Some(EffectId::Effect(effect)) => {
                next.effect = effect;
                next.flashing = false;
            }
            None => {}
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::effect::Effect;
    use crate::domain::entity::{Power, RgbColor};

    fn lit_state() -> DeviceState {
        DeviceState {
            power: Power::On,
            color: RgbColor::new(12, 34, 56),
            white: 78,
            brightness: 90,
            effect: Effect::CrossFadeFast,
            flashing: true,
        }
    }

    #[test]
    fn empty_command_is_identity() {
        for state in [DeviceState::new(), lit_state()] {
            assert_eq!(state.merge(&LightCommand::new()), state);
        }
    }

    #[test]
    fn power_is_applied() {
        let on = DeviceState::new().merge(&LightCommand::new().with_power(Power::On));
        assert_eq!(on.power, Power::On);

        let off = lit_state().merge(&LightCommand::new().with_power(Power::Off));
        assert_eq!(off.power, Power::Off);
        assert_eq!(off.color, lit_state().color);
    }

    #[test]
    fn color_replaces_all_three_channels() {
        let next = lit_state().merge(&LightCommand::new().with_color(1, 2, 3));

        assert_eq!(next.color, RgbColor::new(1, 2, 3));
        assert_eq!(next.white, 78);
        assert_eq!(next.brightness, 90);
        assert_eq!(next.power, Power::On);
    }

    #[test]
    fn white_is_independent_of_color() {
        let next = lit_state().merge(&LightCommand::new().with_white(200));

        assert_eq!(next.white, 200);
        assert_eq!(next.color, RgbColor::new(12, 34, 56));
    }

    #[test]
    fn brightness_is_stored_verbatim() {
        let next = lit_state().merge(&LightCommand::new().with_brightness(0));

        assert_eq!(next.brightness, 0);
        assert_eq!(next.color, lit_state().color);
    }

    #[test]
    fn flash_keeps_persistent_effect() {
        let state = DeviceState {
            effect: Effect::CrossFadeSlow,
            ..DeviceState::new()
        };
        let next = state.merge(&LightCommand::new().with_effect(EffectId::Flash));

        assert!(next.flashing);
        assert_eq!(next.effect, Effect::CrossFadeSlow);
    }

    #[test]
    fn other_effect_clears_flash() {
        let next = lit_state().merge(&LightCommand::new().with_effect(Effect::Instant.into()));

        assert!(!next.flashing);
        assert_eq!(next.effect, Effect::Instant);
    }

    #[test]
    fn unknown_effect_name_resolves_to_instant() {
        let command = LightCommand::new().with_effect(EffectId::resolve("sparkle"));
        let next = lit_state().merge(&command);

        assert_eq!(next.effect, Effect::Instant);
        assert!(!next.flashing);
    }

    #[test]
    fn commands_without_effect_keep_flash_flag() {
        let next = lit_state().merge(&LightCommand::new().with_power(Power::Off));
        assert!(next.flashing);
    }

    #[test]
    fn full_command_applies_every_field() {
        let command = LightCommand::new()
            .with_power(Power::On)
            .with_color(255, 128, 0)
            .with_brightness(200)
            .with_white(17)
            .with_effect(Effect::Christmas.into());
        let next = DeviceState::new().merge(&command);

        assert_eq!(
            next,
            DeviceState {
                power: Power::On,
                color: RgbColor::new(255, 128, 0),
                white: 17,
                brightness: 200,
                effect: Effect::Christmas,
                flashing: false,
            }
        );
    }
}
