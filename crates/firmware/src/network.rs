use core::str::FromStr;

use embassy_net::{DhcpConfig, IpAddress, Runner, Stack, StackResources, dns::DnsQueryType};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_radio::wifi::{
    AuthMethod, ClientConfig, Config as WifiConfig, ModeConfig, WifiController, WifiDevice,
    WifiEvent, WifiStaState,
};
use heapless::String;
use log::{info, warn};
use static_cell::make_static;

use crate::config::{HOSTNAME, WIFI_PASSWORD, WIFI_SSID};

const MAX_CONNECTIONS: usize = 4;

pub(crate) fn init_network_stack(
    wifi_device: WIFI<'static>,
) -> (
    Stack<'static>,
    Runner<'static, WifiDevice<'static>>,
    WifiController<'static>,
) {
    let esp_radio_ctrl = &*make_static!(esp_radio::init().unwrap());
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, WifiConfig::default()).unwrap();

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = Some(String::from_str(HOSTNAME).expect("Invalid hostname"));
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources = make_static!(StackResources::<MAX_CONNECTIONS>::new());
    let (stack, runner) =
        embassy_net::new(interfaces.sta, net_config, network_resources, get_seed());

    (stack, runner, controller)
}

fn get_seed() -> u64 {
    let rng = Rng::new();
    u64::from(rng.random()) << 32 | u64::from(rng.random())
}

/// Wait for the link to come up and DHCP to assign an address
pub(crate) async fn wait_for_connection(stack: Stack<'_>) -> embassy_net::StaticConfigV4 {
    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(100)).await;
    }
    loop {
        if let Some(config) = stack.config_v4() {
            info!("network: got address {}", config.address);
            return config;
        }
        Timer::after(Duration::from_millis(100)).await;
    }
}

/// Resolves a hostname to an IP address
pub(crate) async fn resolve_host(stack: Stack<'static>, host: &str) -> Option<IpAddress> {
    if let Ok(ip) = host.parse::<embassy_net::Ipv4Address>() {
        return Some(IpAddress::Ipv4(ip));
    }

    let addresses = stack.dns_query(host, DnsQueryType::A).await.ok()?;
    addresses.first().copied()
}

/// Keeps the station connected, reconnecting after every disconnect
#[embassy_executor::task]
pub(crate) async fn wifi_connection_task(mut controller: WifiController<'static>) {
    loop {
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("network: disconnected");
            Timer::after(Duration::from_millis(2000)).await;
        }
        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = if WIFI_PASSWORD.is_empty() {
                ClientConfig::default()
                    .with_ssid(WIFI_SSID.into())
                    .with_auth_method(AuthMethod::None)
            } else {
                ClientConfig::default()
                    .with_ssid(WIFI_SSID.into())
                    .with_password(WIFI_PASSWORD.into())
            };
            controller
                .set_config(&ModeConfig::Client(client_config))
                .unwrap();
            controller.start_async().await.unwrap();
        }

        info!("network: connecting to {}", WIFI_SSID);
        if let Err(e) = controller.connect_async().await {
            warn!("network: error connecting: {:?}", e);
            Timer::after(Duration::from_millis(5000)).await;
        }
    }
}

#[embassy_executor::task]
pub(crate) async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
