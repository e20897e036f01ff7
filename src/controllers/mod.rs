pub mod mqtt;

pub use mqtt::{CommandError, LightCommandController};
