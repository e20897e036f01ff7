//! MQTT-controlled RGBW light node.
//!
//! The crate holds the platform-independent part of the firmware: the device
//! state model, the partial-command merge, the persistent state record and
//! the MQTT command controller. Hardware (PWM outputs, flash, network) is
//! reached through the traits in [`domain::ports`], so everything here runs
//! on the host as well as on the target.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod ha;
pub mod infrastructure;

pub use app::LightUsecases;
pub use controllers::LightCommandController;
pub use domain::dto::LightCommand;
pub use domain::entity::{DeviceState, Power, RgbColor};
pub use domain::effect::{Effect, EffectId};
pub use infrastructure::repositories::PersistentStateStore;
