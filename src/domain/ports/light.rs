use core::fmt;

use crate::domain::entity::DeviceState;
use crate::domain::ports::persistence::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// An output channel rejected the new duty cycle
    Output,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Output => write!(f, "output channel error"),
        }
    }
}

/// Renders a device state onto the physical outputs
pub trait LightDriver {
    fn render(&mut self, state: &DeviceState) -> Result<(), DriverError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightError {
    /// The merged state could not be persisted
    Persistence(StoreError),
    /// The outputs could not be updated
    Render(DriverError),
}

impl fmt::Display for LightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightError::Persistence(e) => write!(f, "persistence error: {}", e),
            LightError::Render(e) => write!(f, "render error: {}", e),
        }
    }
}

impl From<StoreError> for LightError {
    fn from(error: StoreError) -> Self {
        LightError::Persistence(error)
    }
}

impl From<DriverError> for LightError {
    fn from(error: DriverError) -> Self {
        LightError::Render(error)
    }
}

impl<T: LightDriver + ?Sized> LightDriver for &mut T {
    fn render(&mut self, state: &DeviceState) -> Result<(), DriverError> {
        (**self).render(state)
    }
}
