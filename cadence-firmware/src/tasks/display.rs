//! Character LCD task
//!
//! Waits for new screen content and rewrites only the cells that changed.
//! I2C traffic happens here so the control loop never waits on the bus.

use cadence_core::controller::{LCD_COLS, LCD_ROWS, NOTE_CHAR, NOTE_GLYPH};
use cadence_core::output::LineDiff;
use cadence_drivers::display::Hd44780;
use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use crate::channels::SCREEN;

/// Concrete LCD type on I2C0
pub type Lcd = Hd44780<I2c<'static, I2C0, Async>, Delay>;

#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd) {
    info!("Display task started");

    let mut diff: LineDiff<LCD_COLS, LCD_ROWS> = LineDiff::new();

    if let Err(e) = lcd.init().await {
        warn!("LCD init failed: {}", e);
        diff.invalidate();
    }
    if let Err(e) = lcd.create_char(NOTE_CHAR, &NOTE_GLYPH).await {
        warn!("LCD glyph upload failed: {}", e);
    }

    let mut backlight = true;

    loop {
        let screen = SCREEN.wait().await;

        if screen.backlight != backlight {
            backlight = screen.backlight;
            if let Err(e) = lcd.set_backlight(backlight).await {
                warn!("LCD backlight write failed: {}", e);
            }
        }

        for (row, line) in screen.lines.iter().enumerate() {
            let row = row as u8;
            let spans = diff.update(row, line.as_bytes());
            if let Err(e) = lcd.apply(row, &spans).await {
                warn!("LCD write failed: {}", e);
                // Panel content unknown, repaint everything next time
                diff.invalidate();
            }
        }
    }
}
