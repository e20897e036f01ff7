use core::fmt;

use crate::domain::entity::DeviceState;

/// Error type for the persistence operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The storage medium could not be read
    Read,
    /// The storage medium rejected the write
    Write,
    /// The record read back after a write differs from what was written
    CommitMismatch,
    /// The record does not fit the storage medium at the configured offset
    OutOfBounds,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read => write!(f, "storage read failed"),
            StoreError::Write => write!(f, "storage write failed"),
            StoreError::CommitMismatch => write!(f, "stored record does not match"),
            StoreError::OutOfBounds => write!(f, "record exceeds storage capacity"),
        }
    }
}

/// Power-loss-safe storage for the device state
pub trait LightStateStore {
    /// Durably store `state`.
    ///
    /// Returns only after the record has been committed to the medium.
    fn save(&mut self, state: &DeviceState) -> Result<(), StoreError>;

    /// Load the stored state, or the power-on defaults if nothing valid is
    /// stored.
    fn restore(&mut self) -> Result<DeviceState, StoreError>;
}

impl<T: LightStateStore + ?Sized> LightStateStore for &mut T {
    fn save(&mut self, state: &DeviceState) -> Result<(), StoreError> {
        (**self).save(state)
    }

    fn restore(&mut self) -> Result<DeviceState, StoreError> {
        (**self).restore()
    }
}
