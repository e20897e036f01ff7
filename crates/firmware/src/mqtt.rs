//! MQTT session task.
//!
//! Owns the command controller: commands are handled one at a time, in the
//! order the broker delivers them, and the resulting state payloads are
//! published before the next packet is read.
//!
//! Every inbound packet (command, ping response) goes through one `poll`
//! path. A `poll` is only started once the socket has data, so it always
//! runs to completion; only the readiness wait races the ping timer.

use core::cell::RefCell;

use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_net::tcp::{self, TcpSocket};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use esp_rgbw_light::config::{
    MAX_COMMAND_PAYLOAD, MQTT_RECONNECT_DELAY_SECS, NodeConfig, TOPIC_SIZE,
};
use esp_rgbw_light::domain::ports::{PublishError, StatePublisher};
use esp_rgbw_light::ha::{command_topic, state_topic};
use esp_rgbw_light::{LightCommandController, PersistentStateStore};
use esp_storage::FlashStorage;
use heapless::Vec;
use log::{debug, error, info, warn};
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::client::raw_client::{Event, RawMqttClient};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::packet::v5::reason_codes::ReasonCode;
use rust_mqtt::utils::rng_generator::CountingRng;

use crate::network::resolve_host;
use crate::pwm::PwmLightDriver;

pub(crate) type AppController =
    LightCommandController<PersistentStateStore<FlashStorage<'static>>, PwmLightDriver>;

const MQTT_BUFFER_SIZE: usize = 1024;
const MQTT_MAX_PROPERTIES: usize = 5;
const KEEP_ALIVE_SECS: u16 = 30;
/// Pings go out at half the keep-alive so the broker never times us out
const PING_INTERVAL: Duration = Duration::from_secs(KEEP_ALIVE_SECS as u64 / 2);
const OUTBOX_DEPTH: usize = 2;

type StatePayload = Vec<u8, MAX_COMMAND_PAYLOAD>;

static OUTBOX: Channel<CriticalSectionRawMutex, StatePayload, OUTBOX_DEPTH> = Channel::new();

/// Queues state payloads until the session task publishes them
struct OutboxPublisher;

impl StatePublisher for OutboxPublisher {
    fn publish_state(&mut self, payload: &[u8]) -> Result<(), PublishError> {
        let payload =
            StatePayload::from_slice(payload).map_err(|_| PublishError::PayloadTooLarge)?;
        OUTBOX.try_send(payload).map_err(|_| PublishError::QueueFull)
    }
}

/// Socket shared between the MQTT client and the readiness wait.
///
/// Both live in the session task and never hold the socket at the same
/// time: the readiness future is dropped before `poll` or `send_ping` run.
struct SessionSocket<'s, 'a> {
    socket: &'s RefCell<TcpSocket<'a>>,
}

impl embedded_io_async::ErrorType for SessionSocket<'_, '_> {
    type Error = tcp::Error;
}

#[allow(clippy::await_holding_refcell_ref)]
impl embedded_io_async::Read for SessionSocket<'_, '_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.socket.borrow_mut().read(buf).await
    }
}

#[allow(clippy::await_holding_refcell_ref)]
impl embedded_io_async::Write for SessionSocket<'_, '_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.socket.borrow_mut().write(buf).await
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.socket.borrow_mut().flush().await
    }
}

#[allow(clippy::await_holding_refcell_ref)]
async fn wait_readable(socket: &RefCell<TcpSocket<'_>>) {
    socket.borrow().wait_read_ready().await;
}

#[derive(Debug)]
enum SessionError {
    Resolve,
    Connect,
    Protocol(ReasonCode),
    UnexpectedPacket,
}

#[embassy_executor::task]
pub(crate) async fn mqtt_task(
    stack: Stack<'static>,
    controller: &'static mut AppController,
    config: NodeConfig<'static>,
) {
    let topics = command_topic::<TOPIC_SIZE>(config.topic)
        .zip(state_topic::<TOPIC_SIZE>(config.topic));
    let Some((command_topic, state_topic)) = topics else {
        error!(
            "mqtt: topic '{}' does not fit {} bytes, MQTT disabled",
            config.topic, TOPIC_SIZE
        );
        return;
    };
    info!(
        "mqtt: commands on '{}', state on '{}'",
        command_topic, state_topic
    );

    loop {
        let session = run_session(stack, controller, &config, &command_topic, &state_topic);
        if let Err(e) = session.await {
            error!("mqtt: session ended: {:?}", e);
        }
        info!("mqtt: reconnecting in {}s", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

async fn run_session(
    stack: Stack<'static>,
    controller: &mut AppController,
    config: &NodeConfig<'static>,
    command_topic: &str,
    state_topic: &str,
) -> Result<(), SessionError> {
    let mqtt = &config.mqtt;
    let broker = resolve_host(stack, mqtt.host)
        .await
        .ok_or(SessionError::Resolve)?;

    let mut rx_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut tx_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(60)));

    info!("mqtt: connecting to {:?}:{}", broker, mqtt.port);
    if let Err(e) = socket.connect((broker, mqtt.port)).await {
        socket.abort();
        warn!("mqtt: TCP connect failed: {:?}", e);
        return Err(SessionError::Connect);
    }
    let socket = RefCell::new(socket);

    let mut client_config = ClientConfig::<MQTT_MAX_PROPERTIES, _>::new(
        MqttVersion::MQTTv5,
        CountingRng(20000),
    );
    client_config.add_client_id(mqtt.client_id);
    if let Some(username) = mqtt.username {
        client_config.add_username(username);
    }
    if let Some(password) = mqtt.password {
        client_config.add_password(password);
    }
    client_config.keep_alive = KEEP_ALIVE_SECS;
    client_config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut client = RawMqttClient::<_, MQTT_MAX_PROPERTIES, _>::new(
        SessionSocket { socket: &socket },
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        client_config,
    );

    client
        .connect_to_broker()
        .await
        .map_err(SessionError::Protocol)?;
    match client.poll::<1>().await.map_err(SessionError::Protocol)? {
        Event::Connack => {}
        Event::Disconnect(reason) => return Err(SessionError::Protocol(reason)),
        _ => return Err(SessionError::UnexpectedPacket),
    }
    client
        .subscribe_to_topic(command_topic)
        .await
        .map_err(SessionError::Protocol)?;
    info!("mqtt: connected as '{}'", mqtt.client_id);

    let mut next_ping = Instant::now() + PING_INTERVAL;
    loop {
        if let Either::First(()) = select(Timer::at(next_ping), wait_readable(&socket)).await {
            client.send_ping().await.map_err(SessionError::Protocol)?;
            next_ping = Instant::now() + PING_INTERVAL;
            continue;
        }

        match client.poll::<1>().await.map_err(SessionError::Protocol)? {
            Event::Message(topic, payload) => {
                if topic == command_topic {
                    if let Err(e) = controller.handle_command(payload, &mut OutboxPublisher) {
                        warn!("mqtt: command not applied: {}", e);
                    }
                } else {
                    debug!("mqtt: ignoring message on '{}'", topic);
                }
            }
            Event::Pingresp => debug!("mqtt: ping acknowledged"),
            Event::Disconnect(reason) => return Err(SessionError::Protocol(reason)),
            _ => {}
        }

        while let Ok(payload) = OUTBOX.try_receive() {
            client
                .send_message(state_topic, &payload, QualityOfService::QoS0, true)
                .await
                .map_err(SessionError::Protocol)?;
            next_ping = Instant::now() + PING_INTERVAL;
            debug!("mqtt: state published");
        }
    }
}
