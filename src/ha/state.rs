//! State payload structures

use serde::Serialize;

use crate::ha::command::HaRgbColor;

/// Full light state payload published on the state topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HaLightState<'a> {
    /// Current on/off state ("ON" or "OFF")
    pub state: &'a str,
    /// Current RGB color
    pub color: HaRgbColor,
    /// Current brightness (0-255)
    pub brightness: u8,
    /// Current effect name, `"flash"` while a flash is requested
    pub effect: &'a str,
    /// Current white channel level
    pub white_value: u8,
}

/// Serialize `state` into `buffer`, returning the number of bytes written
pub fn write_state_payload(
    state: &HaLightState<'_>,
    buffer: &mut [u8],
) -> Result<usize, serde_json_core::ser::Error> {
    serde_json_core::to_slice(state, buffer)
}
