use crate::domain::effect::EffectId;
use crate::domain::entity::{Power, RgbColor};

/// Partial update of the light state.
///
/// Every field is optional; `None` leaves the matching state field alone.
/// Commands are decoded once at the transport boundary and never carry
/// defaults of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightCommand {
    pub power: Option<Power>,
    /// Red, green and blue are always set together.
    pub color: Option<RgbColor>,
    pub brightness: Option<u8>,
    pub effect: Option<EffectId>,
    pub white: Option<u8>,
}

impl LightCommand {
    /// Create an empty command (no changes)
    pub const fn new() -> Self {
        Self {
            power: None,
            color: None,
            brightness: None,
            effect: None,
            white: None,
        }
    }

    /// Set power state
    #[must_use]
    pub const fn with_power(mut self, power: Power) -> Self {
        self.power = Some(power);
        self
    }

    /// Set color
    #[must_use]
    pub const fn with_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = Some(RgbColor::new(r, g, b));
        self
    }

    /// Set brightness
    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Set effect
    #[must_use]
    pub const fn with_effect(mut self, effect: EffectId) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Set white channel
    #[must_use]
    pub const fn with_white(mut self, white: u8) -> Self {
        self.white = Some(white);
        self
    }

    pub const fn is_empty(&self) -> bool {
        self.power.is_none()
            && self.color.is_none()
            && self.brightness.is_none()
            && self.effect.is_none()
            && self.white.is_none()
    }
}
