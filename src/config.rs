/// Maximum accepted size of an inbound command payload.
///
/// Larger payloads are rejected before parsing.
pub const MAX_COMMAND_PAYLOAD: usize = 512;

/// Buffer size for a serialized state snapshot.
pub const STATE_PAYLOAD_SIZE: usize = 160;

/// Fixed delay between MQTT reconnection attempts.
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// Maximum length of a formatted MQTT topic.
pub const TOPIC_SIZE: usize = 64;

/// What the node republishes on the state topic after a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StateEcho {
    /// Republish the accepted command payload unchanged.
    ///
    /// Subscribers only see the fields that were present in the command.
    #[default]
    Command,
    /// Republish the full resolved device state.
    Snapshot,
}

impl StateEcho {
    /// Parse the compile-time `STATE_ECHO` setting.
    ///
    /// Anything other than `"snapshot"` keeps the command echo.
    pub fn from_setting(value: &str) -> Self {
        if value.eq_ignore_ascii_case("snapshot") {
            StateEcho::Snapshot
        } else {
            StateEcho::Command
        }
    }
}

#[derive(Debug, Clone)]
pub struct MqttConfig<'a> {
    pub host: &'a str,
    pub port: u16,
    pub client_id: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct NodeConfig<'a> {
    pub mqtt: MqttConfig<'a>,
    /// Base topic. Commands arrive on `{topic}/set`, state goes to `{topic}`.
    pub topic: &'a str,
    pub state_echo: StateEcho,
}
