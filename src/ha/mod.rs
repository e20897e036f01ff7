//! Wire format of the light's MQTT payloads.
//!
//! These types match the JSON schema used on the command and state topics
//! and are converted to domain types in [`mapping`].

pub mod command;
pub mod mapping;
pub mod state;
pub mod topic;

pub use command::{HaLightCommand, HaRgbColor, parse_light_command};
pub use mapping::{ha_command_to_light, light_state_to_ha};
pub use state::{HaLightState, write_state_payload};
pub use topic::{command_topic, state_topic};
