use log::{error, info, warn};

use crate::domain::{
    dto::LightCommand,
    entity::DeviceState,
    ports::{LightDriver, LightError, LightStateStore},
};

/// Owner of the device state.
///
/// The state is only changed through [`LightUsecases::apply_command_and_persist`],
/// which commits the merged state to the store before it becomes current.
pub struct LightUsecases<S: LightStateStore, D: LightDriver> {
    state: DeviceState,
    store: S,
    driver: D,
}

impl<S: LightStateStore, D: LightDriver> LightUsecases<S, D> {
    /// Restore the stored state and drive the outputs to it.
    ///
    /// A storage read failure is not fatal: the node starts from the
    /// power-on defaults.
    pub fn boot(mut store: S, driver: D) -> Self {
        let state = store.restore().unwrap_or_else(|e| {
            warn!("light: error restoring state, using defaults: {}", e);
            DeviceState::new()
        });
        info!(
            "light: restored state={} rgb=({}, {}, {}) white={} brightness={} effect={}",
            state.power.as_str(),
            state.color.r,
            state.color.g,
            state.color.b,
            state.white,
            state.brightness,
            state.effect.as_str()
        );

        let mut usecases = Self {
            state,
            store,
            driver,
        };
        if let Err(e) = usecases.render() {
            warn!("light: error rendering restored state: {}", e);
        }
        usecases
    }

    /// Current device state
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Merge `command` into the current state and persist the result.
    ///
    /// On a persistence error the current state is left untouched.
    pub fn apply_command_and_persist(
        &mut self,
        command: &LightCommand,
    ) -> Result<&DeviceState, LightError> {
        let next = self.state.merge(command);

        self.store.save(&next).map_err(|e| {
            error!("light: error persisting light state: {}", e);
            LightError::Persistence(e)
        })?;
        self.state = next;

        Ok(&self.state)
    }

    /// Drive the outputs to the current state
    pub fn render(&mut self) -> Result<(), LightError> {
        self.driver.render(&self.state)?;
        Ok(())
    }
}
