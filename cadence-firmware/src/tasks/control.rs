//! Control loop task
//!
//! Owns every state machine and advances them once per tick in a fixed
//! order: button, tap, encoder drain, UI, then the outputs. Nothing in the
//! loop body waits; the only suspension point is the ticker.

use cadence_core::config::DeviceConfig;
use cadence_core::controller::{Actions, Controller};
use cadence_core::input::{DebouncedInput, Potentiometer, TapTempo};
use cadence_core::output::{StatusLed, WiperDrive};
use cadence_core::state::UiStateMachine;
use cadence_drivers::gpio::{HalInput, HalOutput};
use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Ticker};

use crate::analog::PotAdc;
use crate::channels::{ENCODER_STEPS, SCREEN};

/// Loop period, well below the 5 ms debounce windows
pub const TICK_INTERVAL_US: u64 = 250;

/// Potentiometer is sampled every this many ticks
const POT_DIVIDER: u32 = 80;

type Out = HalOutput<Output<'static>>;
type In = HalInput<Input<'static>>;

/// Pins owned by the control loop
pub struct ControlPins {
    /// Encoder push button, active high
    pub button: Input<'static>,
    /// Tap footswitch, active high
    pub tap: Input<'static>,
    pub led: Output<'static>,
    /// Wiper U/D
    pub up_down: Output<'static>,
    /// Wiper INC
    pub inc: Output<'static>,
    /// Wiper CS
    pub cs: Output<'static>,
}

#[embassy_executor::task]
pub async fn control_task(pins: ControlPins, pot: PotAdc, config: DeviceConfig) {
    info!("Control task started");

    let start = Instant::now();
    let mut button_pin: In = HalInput::new(pins.button);
    let mut tap_pin: In = HalInput::new(pins.tap);

    let mut button = DebouncedInput::from_config(&config.button);
    let mut tap = TapTempo::new(config.tap);
    let mut ui = UiStateMachine::new(&config.ui, 0);
    let mut led: StatusLed<Out> = StatusLed::new(HalOutput::new(pins.led, false), &config.led);
    let mut wiper: WiperDrive<Out, Out, Out> = WiperDrive::new(
        HalOutput::new(pins.up_down, false),
        HalOutput::new(pins.inc, true),
        HalOutput::new(pins.cs, true),
        config.wiper,
        0,
    );
    let mut pot = Potentiometer::new(pot, &config.pot);
    let mut controller = Controller::new(&config);

    // Physical wiper position is unknown at power-up
    let boot = Actions {
        wiper_target: Some(controller.tempo().wiper_position()),
        rehome: true,
        redraw: true,
    };
    let mut target = None;
    apply(boot, &controller, &mut wiper, &mut target);
    // Baseline only: the knob does not override the boot tempo until moved
    pot.changed();

    let mut ticker = Ticker::every(Duration::from_micros(TICK_INTERVAL_US));
    let mut tick: u32 = 0;

    loop {
        ticker.next().await;
        tick = tick.wrapping_add(1);

        let elapsed = start.elapsed();
        let now_ms = elapsed.as_millis() as u32;
        let now_us = elapsed.as_micros() as u32;

        button.sample(now_ms, &mut button_pin);
        tap.sample(now_ms, &mut tap_pin);
        let steps = ENCODER_STEPS.take();
        let bpm = tap.take_bpm();

        if tap.take_tap() {
            led.flash(now_ms, config.led.tap_flash_ms);
        }

        ui.update(now_ms, button.pressed(), steps, bpm);
        if let Some(event) = ui.poll() {
            debug!("UI event: {}", event);
            let actions = controller.handle(event);
            apply(actions, &controller, &mut wiper, &mut target);
        }

        if tick % POT_DIVIDER == 0 {
            if let Some(value) = pot.changed() {
                let actions = controller.pot_moved(value);
                apply(actions, &controller, &mut wiper, &mut target);
            }
        }

        // Only the latest target matters; hand it over once the queue drains
        if wiper.pending() == 0 {
            if let Some(position) = target.take() {
                if let Err(e) = wiper.move_to(position) {
                    warn!("Wiper move to {} dropped: {}", position, e);
                }
            }
        }

        led.update(now_ms);
        controller.indicate(&mut led);
        wiper.update(now_us);
    }
}

/// Carry out controller actions on the wiper and screen
///
/// Wiper targets are parked in `target` so a fast-turning encoder
/// replaces the pending target instead of filling the move queue.
fn apply(
    actions: Actions,
    controller: &Controller,
    wiper: &mut WiperDrive<Out, Out, Out>,
    target: &mut Option<u8>,
) {
    if actions.rehome {
        if let Err(e) = wiper.low() {
            warn!("Wiper rehome dropped: {}", e);
        }
    }
    if let Some(position) = actions.wiper_target {
        debug!("Tempo {} BPM -> wiper {}", controller.tempo().bpm(), position);
        *target = Some(position);
    }
    if actions.redraw {
        SCREEN.signal(controller.screen());
    }
}
