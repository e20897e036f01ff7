#![no_std]
#![no_main]

mod config;
mod mqtt;
mod network;
mod pwm;

use embassy_executor::Spawner;
use embassy_time::Duration;
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_rgbw_light::{LightCommandController, LightUsecases, PersistentStateStore};
use esp_storage::FlashStorage;
use log::{error, info};

use crate::config::{BUILD_VERSION, LIGHT_STATE_PARTITION_OFFSET, node_config};
use crate::mqtt::{AppController, mqtt_task};
use crate::network::{
    init_network_stack, network_runner_task, wait_for_connection, wifi_connection_task,
};
use crate::pwm::init_pwm_driver;

esp_bootloader_esp_idf::esp_app_desc!();

// static_cell::make_static! in main causes a compiler error
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    info!("esp-rgbw-light {}", BUILD_VERSION);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Wi-Fi needs heap (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let node = node_config();

    let driver = match init_pwm_driver(peripherals.LEDC, crate::rgbw_gpio!(peripherals)) {
        Ok(driver) => driver,
        Err(e) => panic!("pwm: initialization failed: {:?}", e),
    };
    let store = PersistentStateStore::new(
        FlashStorage::new(peripherals.FLASH),
        LIGHT_STATE_PARTITION_OFFSET,
    );
    let usecases = LightUsecases::boot(store, driver);
    let controller = mk_static!(
        AppController,
        LightCommandController::new(usecases, node.state_echo)
    );

    let (stack, runner, wifi_controller) = init_network_stack(peripherals.WIFI);
    spawner.spawn(wifi_connection_task(wifi_controller)).ok();
    spawner.spawn(network_runner_task(runner)).ok();

    wait_for_connection(stack).await;

    if let Err(e) = spawner.spawn(mqtt_task(stack, controller, node)) {
        error!("mqtt: error spawning task: {:?}", e);
    }

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
