use esp_rgbw_light::config::{MqttConfig, NodeConfig, StateEcho};

/// Flash offset of the persisted light state record
pub(crate) const LIGHT_STATE_PARTITION_OFFSET: u32 = 0x31_0000;

pub(crate) const BUILD_VERSION: &str = env!("BUILD_VERSION");
pub(crate) const HOSTNAME: &str = "esp-rgbw-light";

pub(crate) const WIFI_SSID: &str = env!("WIFI_SSID");
pub(crate) const WIFI_PASSWORD: &str = env!("WIFI_PASSWORD");

const MQTT_HOST: &str = env!("MQTT_HOST");
const MQTT_DEFAULT_PORT: u16 = 1883;

/// LEDC PWM frequency of the output channels
pub(crate) const PWM_FREQUENCY_HZ: u32 = 1000;

/// Output pins in red, green, blue, white order
#[macro_export]
macro_rules! rgbw_gpio {
    ($p:expr) => {
        ($p.GPIO12, $p.GPIO14, $p.GPIO13, $p.GPIO2)
    };
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn node_config() -> NodeConfig<'static> {
    let port = non_empty(option_env!("MQTT_PORT"))
        .and_then(|p| p.parse().ok())
        .unwrap_or(MQTT_DEFAULT_PORT);

    NodeConfig {
        mqtt: MqttConfig {
            host: MQTT_HOST,
            port,
            client_id: non_empty(option_env!("MQTT_CLIENT_ID")).unwrap_or(HOSTNAME),
            username: non_empty(option_env!("MQTT_USERNAME")),
            password: non_empty(option_env!("MQTT_PASSWORD")),
        },
        topic: env!("MQTT_TOPIC"),
        state_echo: StateEcho::from_setting(option_env!("STATE_ECHO").unwrap_or_default()),
    }
}
