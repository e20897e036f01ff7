//! Mapping between domain types and the wire types

use crate::domain::dto::LightCommand;
use crate::domain::effect::EffectId;
use crate::domain::entity::{DeviceState, Power, RgbColor};
use crate::ha::command::{HaLightCommand, HaRgbColor};
use crate::ha::state::HaLightState;

/// Convert [`HaLightCommand`] to domain [`LightCommand`]
pub fn ha_command_to_light(command: &HaLightCommand<'_>) -> LightCommand {
    LightCommand {
        power: command.state.map(Power::from_command),
        color: command.color.map(|c| RgbColor::new(c.r, c.g, c.b)),
        brightness: command.brightness,
        effect: command.effect.map(EffectId::resolve),
        white: command.white_value,
    }
}

/// Convert domain [`DeviceState`] to [`HaLightState`]
pub fn light_state_to_ha(state: &DeviceState) -> HaLightState<'static> {
    let effect = if state.flashing {
        EffectId::Flash.as_str()
    } else {
        state.effect.as_str()
    };

    HaLightState {
        state: state.power.as_str(),
        color: HaRgbColor::new(state.color.r, state.color.g, state.color.b),
        brightness: state.brightness,
        effect,
        white_value: state.white,
    }
}
