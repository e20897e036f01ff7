//! Fixed-layout persistent record of the device state.
//!
//! Byte layout: validity marker, power, red, green, blue, white, brightness,
//! effect. The record carries no version byte; a layout change has to keep
//! reading this form or migrate it.

use bytemuck::{Pod, Zeroable};

use crate::domain::effect::Effect;
use crate::domain::entity::{DeviceState, Power, RgbColor};

/// Marker value of a record that holds a saved state.
///
/// Erased flash reads back as `0xFF`, so a fresh medium is never valid.
pub const VALID_MARKER: u8 = 0x00;

/// Size of the record on the medium
pub const STATE_RECORD_SIZE: usize = core::mem::size_of::<StateRecord>();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct StateRecord {
    pub marker: u8,
    pub power: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
    pub brightness: u8,
    pub effect: u8,
}

impl StateRecord {
    pub const fn is_valid_marker(marker: u8) -> bool {
        marker == VALID_MARKER
    }

    pub const fn is_valid(&self) -> bool {
        Self::is_valid_marker(self.marker)
    }

    pub fn from_bytes(bytes: [u8; STATE_RECORD_SIZE]) -> Self {
        bytemuck::cast(bytes)
    }

    pub fn to_bytes(self) -> [u8; STATE_RECORD_SIZE] {
        bytemuck::cast(self)
    }
}

impl From<&DeviceState> for StateRecord {
    fn from(state: &DeviceState) -> Self {
        Self {
            marker: VALID_MARKER,
            power: state.power.as_u8(),
            red: state.color.r,
            green: state.color.g,
            blue: state.color.b,
            white: state.white,
            brightness: state.brightness,
            effect: state.effect.as_u8(),
        }
    }
}

impl From<StateRecord> for DeviceState {
    fn from(record: StateRecord) -> Self {
        Self {
            power: Power::from_u8(record.power),
            color: RgbColor::new(record.red, record.green, record.blue),
            white: record.white,
            brightness: record.brightness,
            effect: Effect::from_u8(record.effect).unwrap_or_default(),
            flashing: false,
        }
    }
}

/// Encode `state` into a record with the valid marker set
pub fn encode_state(state: &DeviceState) -> [u8; STATE_RECORD_SIZE] {
    StateRecord::from(state).to_bytes()
}

/// Decode a record, or `None` if its marker is not valid
pub fn decode_state(bytes: [u8; STATE_RECORD_SIZE]) -> Option<DeviceState> {
    let record = StateRecord::from_bytes(bytes);
    record.is_valid().then(|| record.into())
}
