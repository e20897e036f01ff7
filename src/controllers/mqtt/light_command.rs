//! Light command handling
//!
//! Runs one command payload through parse, merge, persist, republish and
//! render, in that order. The controller is the single writer of the
//! device state; the caller must not hand it a new payload before the
//! previous call returned.

use core::fmt;

use log::{debug, warn};

use crate::app::LightUsecases;
use crate::config::{MAX_COMMAND_PAYLOAD, STATE_PAYLOAD_SIZE, StateEcho};
use crate::domain::entity::DeviceState;
use crate::domain::ports::{LightDriver, LightError, LightStateStore, StatePublisher};
use crate::ha::{
    HaLightCommand, ha_command_to_light, light_state_to_ha, parse_light_command,
    write_state_payload,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Payload exceeds [`MAX_COMMAND_PAYLOAD`]
    PayloadTooLarge,
    /// Payload is not a single well-formed JSON object
    Malformed,
    /// Applying the command failed
    Light(LightError),
    /// The state snapshot does not fit the payload buffer
    Serialization,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::PayloadTooLarge => write!(f, "payload too large"),
            CommandError::Malformed => write!(f, "malformed command payload"),
            CommandError::Light(e) => write!(f, "{}", e),
            CommandError::Serialization => write!(f, "state serialization error"),
        }
    }
}

impl From<LightError> for CommandError {
    fn from(error: LightError) -> Self {
        CommandError::Light(error)
    }
}

pub struct LightCommandController<S: LightStateStore, D: LightDriver> {
    usecases: LightUsecases<S, D>,
    state_echo: StateEcho,
}

impl<S: LightStateStore, D: LightDriver> LightCommandController<S, D> {
    pub fn new(usecases: LightUsecases<S, D>, state_echo: StateEcho) -> Self {
        Self {
            usecases,
            state_echo,
        }
    }

    /// Current device state
    pub fn state(&self) -> &DeviceState {
        self.usecases.state()
    }

    /// Handle a payload received on the command topic.
    ///
    /// Rejected payloads change nothing and publish nothing. Once the merged
    /// state is persisted a failed publish is only logged: the state is
    /// already committed and the outputs are still rendered.
    pub fn handle_command<P: StatePublisher>(
        &mut self,
        payload: &[u8],
        publisher: &mut P,
    ) -> Result<(), CommandError> {
        if payload.len() > MAX_COMMAND_PAYLOAD {
            warn!("mqtt: command payload of {} bytes dropped", payload.len());
            return Err(CommandError::PayloadTooLarge);
        }
        debug!(
            "mqtt: message arrived: {}",
            core::str::from_utf8(payload).unwrap_or("<binary>")
        );

        let command = parse_light_command(payload).map_err(|e| {
            warn!("mqtt: malformed command payload: {:?}", e);
            CommandError::Malformed
        })?;
        log_command(&command);

        let command = ha_command_to_light(&command);
        if command.is_empty() {
            debug!("light: command carries no changes");
        }
        self.usecases.apply_command_and_persist(&command)?;

        let mut buffer = [0u8; STATE_PAYLOAD_SIZE];
        let state_payload = match self.state_echo {
            StateEcho::Command => payload,
            StateEcho::Snapshot => {
                let ha_state = light_state_to_ha(self.usecases.state());
                let len = write_state_payload(&ha_state, &mut buffer).map_err(|e| {
                    warn!("mqtt: error serializing state: {:?}", e);
                    CommandError::Serialization
                })?;
                &buffer[..len]
            }
        };
        if let Err(e) = publisher.publish_state(state_payload) {
            warn!("mqtt: error publishing state: {}", e);
        }

        self.usecases.render()?;
        Ok(())
    }
}

fn log_command(command: &HaLightCommand<'_>) {
    if let Some(state) = command.state {
        debug!("light: state = {}", state);
    }
    if let Some(color) = command.color {
        debug!("light: red = {}, green = {}, blue = {}", color.r, color.g, color.b);
    }
    if let Some(brightness) = command.brightness {
        debug!("light: brightness = {}", brightness);
    }
    if let Some(effect) = command.effect {
        debug!("light: effect = {}", effect);
    }
    if let Some(white) = command.white_value {
        debug!("light: white = {}", white);
    }
}
