use crate::domain::effect::Effect;

/// Master on/off switch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Power {
    #[default]
    Off,
    On,
}

impl Power {
    pub const ON: &'static str = "ON";
    pub const OFF: &'static str = "OFF";

    /// Interpret a command `state` value.
    ///
    /// Only the exact string `"ON"` switches the light on.
    pub fn from_command(value: &str) -> Self {
        if value == Self::ON { Power::On } else { Power::Off }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Power::Off => Self::OFF,
            Power::On => Self::ON,
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Power::Off => 0,
            Power::On => 1,
        }
    }

    pub const fn from_u8(value: u8) -> Self {
        if value == 0 { Power::Off } else { Power::On }
    }

    pub const fn is_on(self) -> bool {
        matches!(self, Power::On)
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Duty levels for the four output channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelLevels {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
}

/// Authoritative state of the light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceState {
    pub power: Power,
    pub color: RgbColor,
    pub white: u8,
    /// Stored verbatim, not applied to the channels.
    pub brightness: u8,
    pub effect: Effect,
    /// Transient flash request. Never persisted.
    pub flashing: bool,
}

impl DeviceState {
    /// Power-on defaults used when no valid record is stored.
    pub const fn new() -> Self {
        Self {
            power: Power::Off,
            color: RgbColor::new(0, 0, 0),
            white: 0,
            brightness: 0,
            effect: Effect::Instant,
            flashing: false,
        }
    }

    /// Levels the outputs should be driven to for this state.
    pub const fn output_levels(&self) -> ChannelLevels {
        if !self.power.is_on() {
            return ChannelLevels {
                red: 0,
                green: 0,
                blue: 0,
                white: 0,
            };
        }
        ChannelLevels {
            red: self.color.r,
            green: self.color.g,
            blue: self.color.b,
            white: self.white,
        }
    }
}
