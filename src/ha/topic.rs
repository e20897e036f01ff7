//! Topic generation utilities
//!
//! Both helpers return `None` when the topic does not fit `N` bytes, so a
//! truncated topic is never used.

use core::fmt::Write;
use heapless::String;

/// Generate the state topic
///
/// Format: `{topic}`
pub fn state_topic<const N: usize>(topic: &str) -> Option<String<N>> {
    let mut state = String::new();
    state.push_str(topic).ok()?;
    Some(state)
}

/// Generate the command topic
///
/// Format: `{topic}/set`
pub fn command_topic<const N: usize>(topic: &str) -> Option<String<N>> {
    let mut command = String::new();
    write!(command, "{}/set", topic).ok()?;
    Some(command)
}
