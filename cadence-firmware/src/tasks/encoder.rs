//! Rotary encoder edge task
//!
//! Sleeps until either encoder line changes (GPIO interrupt), then runs
//! the decoder transition and publishes completed detents.

use cadence_core::input::QuadratureDecoder;
use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use crate::channels::ENCODER_STEPS;

#[embassy_executor::task]
pub async fn encoder_task(mut clk: Input<'static>, mut dta: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::with_levels(clk.is_high(), dta.is_high());

    loop {
        select(clk.wait_for_any_edge(), dta.wait_for_any_edge()).await;
        decoder.on_pin_change_into(clk.is_high(), dta.is_high(), &ENCODER_STEPS);
    }
}
