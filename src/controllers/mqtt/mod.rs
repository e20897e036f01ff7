mod light_command;

pub use light_command::{CommandError, LightCommandController};
