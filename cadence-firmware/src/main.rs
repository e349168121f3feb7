//! Cadence - Tap-Tempo Delay Controller Firmware
//!
//! Main firmware binary for RP2040 boards (Raspberry Pi Pico pinout).
//!
//! | Function              | Pin     |
//! |-----------------------|---------|
//! | Encoder push button   | GPIO2   |
//! | Encoder CLK           | GPIO3   |
//! | Encoder DTA           | GPIO4   |
//! | Tap footswitch        | GPIO5   |
//! | Wiper U/D             | GPIO10  |
//! | Wiper INC             | GPIO11  |
//! | Wiper CS              | GPIO12  |
//! | LCD SDA (I2C0)        | GPIO16  |
//! | LCD SCL (I2C0)        | GPIO17  |
//! | Status LED            | GPIO25  |
//! | Tempo pot (ADC0)      | GPIO26  |

#![no_std]
#![no_main]

use cadence_core::controller::{LCD_COLS, LCD_ROWS};
use cadence_drivers::display::{Hd44780, PCF8574_ADDR};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

mod analog;
mod channels;
mod config;
mod tasks;

use crate::analog::PotAdc;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cadence firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Encoder module carries its own pull-ups
    let clk = Input::new(p.PIN_3, Pull::Up);
    let dta = Input::new(p.PIN_4, Pull::Up);

    // Character LCD behind a PCF8574 backpack
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_17, p.PIN_16, Irqs, i2c_config);
    let lcd = Hd44780::new(i2c, Delay, PCF8574_ADDR, LCD_COLS as u8, LCD_ROWS as u8);

    // Buttons switch to 3V3 against the internal pull-downs
    let pins = tasks::ControlPins {
        button: Input::new(p.PIN_2, Pull::Down),
        tap: Input::new(p.PIN_5, Pull::Down),
        led: Output::new(p.PIN_25, Level::Low),
        up_down: Output::new(p.PIN_10, Level::Low),
        inc: Output::new(p.PIN_11, Level::High),
        cs: Output::new(p.PIN_12, Level::High),
    };

    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let pot = PotAdc::new(adc, Channel::new_pin(p.PIN_26, Pull::None));

    spawner.spawn(tasks::encoder_task(clk, dta)).unwrap();
    spawner.spawn(tasks::display_task(lcd)).unwrap();
    spawner.spawn(tasks::control_task(pins, pot, config)).unwrap();

    info!("All tasks spawned");
}
