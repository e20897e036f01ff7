//! RGBW output driver on the LEDC peripheral.
//!
//! Each channel runs at 8-bit duty resolution, so state levels are written
//! to the hardware verbatim.

use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::ledc::channel::{self, ChannelHW, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::LEDC;
use esp_hal::time::Rate;
use esp_rgbw_light::DeviceState;
use esp_rgbw_light::domain::ports::{DriverError, LightDriver};
use log::{debug, info};

use crate::config::PWM_FREQUENCY_HZ;
use crate::mk_static;

pub(crate) struct PwmLightDriver {
    red: channel::Channel<'static, LowSpeed>,
    green: channel::Channel<'static, LowSpeed>,
    blue: channel::Channel<'static, LowSpeed>,
    white: channel::Channel<'static, LowSpeed>,
}

#[derive(Debug)]
pub(crate) enum PwmInitError {
    Timer(timer::Error),
    Channel(channel::Error),
}

impl From<timer::Error> for PwmInitError {
    fn from(error: timer::Error) -> Self {
        PwmInitError::Timer(error)
    }
}

impl From<channel::Error> for PwmInitError {
    fn from(error: channel::Error) -> Self {
        PwmInitError::Channel(error)
    }
}

/// Configure one LEDC timer and four channels, starting dark
pub(crate) fn init_pwm_driver(
    ledc: LEDC<'static>,
    pins: (
        impl PeripheralOutput<'static>,
        impl PeripheralOutput<'static>,
        impl PeripheralOutput<'static>,
        impl PeripheralOutput<'static>,
    ),
) -> Result<PwmLightDriver, PwmInitError> {
    let ledc = mk_static!(Ledc<'static>, Ledc::new(ledc));
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    let pwm_timer = mk_static!(
        timer::Timer<'static, LowSpeed>,
        ledc.timer::<LowSpeed>(timer::Number::Timer0)
    );
    pwm_timer.configure(timer::config::Config {
        duty: timer::config::Duty::Duty8Bit,
        clock_source: timer::LSClockSource::APBClk,
        frequency: Rate::from_hz(PWM_FREQUENCY_HZ),
    })?;
    let pwm_timer: &'static timer::Timer<'static, LowSpeed> = pwm_timer;

    let channel_config = || channel::config::Config {
        timer: pwm_timer,
        duty_pct: 0,
        pin_config: channel::config::PinConfig::PushPull,
    };

    let (red_pin, green_pin, blue_pin, white_pin) = pins;
    let mut red = ledc.channel(channel::Number::Channel0, red_pin);
    red.configure(channel_config())?;
    let mut green = ledc.channel(channel::Number::Channel1, green_pin);
    green.configure(channel_config())?;
    let mut blue = ledc.channel(channel::Number::Channel2, blue_pin);
    blue.configure(channel_config())?;
    let mut white = ledc.channel(channel::Number::Channel3, white_pin);
    white.configure(channel_config())?;

    info!("pwm: outputs configured at {} Hz", PWM_FREQUENCY_HZ);
    Ok(PwmLightDriver {
        red,
        green,
        blue,
        white,
    })
}

impl LightDriver for PwmLightDriver {
    fn render(&mut self, state: &DeviceState) -> Result<(), DriverError> {
        let levels = state.output_levels();
        debug!(
            "pwm: r={} g={} b={} w={}",
            levels.red, levels.green, levels.blue, levels.white
        );

        self.red.set_duty_hw(u32::from(levels.red));
        self.green.set_duty_hw(u32::from(levels.green));
        self.blue.set_duty_hw(u32::from(levels.blue));
        self.white.set_duty_hw(u32::from(levels.white));
        Ok(())
    }
}
