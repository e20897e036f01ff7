//! Infrastructure layer - Port implementations
//!
//! Concrete implementations of the domain ports that only depend on
//! hardware-neutral traits. Target-specific drivers live in the firmware
//! crate.

pub mod repositories;
