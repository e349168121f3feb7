//! HD44780 character LCD over a PCF8574 I2C backpack
//!
//! The backpack exposes the LCD in 4-bit mode. Each I2C byte sets the
//! expander port: `P0 = RS`, `P1 = RW`, `P2 = E`, `P3 = backlight`,
//! `P4..P7 = D4..D7`. A nibble is latched by writing it with E high, then
//! again with E low.

use cadence_core::output::Span;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Default PCF8574 backpack address (0x3F on PCF8574A boards)
pub const PCF8574_ADDR: u8 = 0x27;

/// HD44780 instructions
#[allow(dead_code)]
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM: u8 = 0x40;
    pub const SET_DDRAM: u8 = 0x80;

    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const TWO_LINES: u8 = 0x08;
}

/// Expander port bits
mod port {
    pub const RS: u8 = 0x01;
    pub const ENABLE: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// DDRAM address of the first cell of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 driver
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    cols: u8,
    rows: u8,
    backlight: bool,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver for a `cols` x `rows` panel at `address`
    pub fn new(i2c: I2C, delay: D, address: u8, cols: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            cols,
            rows: rows.min(ROW_OFFSETS.len() as u8),
            backlight: true,
        }
    }

    /// Run the 4-bit power-on initialization
    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        // Controller needs >40 ms after Vcc rises
        self.delay.delay_ms(50).await;
        self.write_port(0).await?;

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x03, false).await?;
        self.delay.delay_us(4500).await;
        self.write_nibble(0x03, false).await?;
        self.delay.delay_us(4500).await;
        self.write_nibble(0x03, false).await?;
        self.delay.delay_us(150).await;
        self.write_nibble(0x02, false).await?;

        let lines = if self.rows > 1 { cmd::TWO_LINES } else { 0 };
        self.command(cmd::FUNCTION_SET | lines).await?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON).await?;
        self.clear().await?;
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_INCREMENT).await
    }

    /// Clear the panel and home the cursor
    pub async fn clear(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::CLEAR).await?;
        self.delay.delay_us(2000).await;
        Ok(())
    }

    /// Move the cursor; positions outside the panel are ignored
    pub async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I2C::Error> {
        if col >= self.cols || row >= self.rows {
            return Ok(());
        }
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
            .await
    }

    /// Write one character code at the cursor
    pub async fn write_byte(&mut self, byte: u8) -> Result<(), I2C::Error> {
        self.send(byte, true).await
    }

    /// Write `bytes` starting at (`col`, `row`), clipped at the row end
    pub async fn write_at(&mut self, col: u8, row: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
        if col >= self.cols || row >= self.rows {
            return Ok(());
        }
        self.set_cursor(col, row).await?;
        let room = usize::from(self.cols - col);
        for &b in bytes.iter().take(room) {
            self.write_byte(b).await?;
        }
        Ok(())
    }

    /// Write the runs produced by a `LineDiff` update of `row`
    pub async fn apply<const COLS: usize>(
        &mut self,
        row: u8,
        spans: &[Span<COLS>],
    ) -> Result<(), I2C::Error> {
        for span in spans {
            self.write_at(span.col, row, &span.bytes).await?;
        }
        Ok(())
    }

    /// Store a 5x8 glyph as character code `slot` (0-7)
    pub async fn create_char(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), I2C::Error> {
        self.command(cmd::SET_CGRAM | ((slot & 0x07) << 3)).await?;
        for &row in bitmap {
            self.write_byte(row).await?;
        }
        // Leave the address counter in DDRAM
        self.command(cmd::SET_DDRAM).await
    }

    /// Switch the backlight
    pub async fn set_backlight(&mut self, on: bool) -> Result<(), I2C::Error> {
        self.backlight = on;
        self.write_port(0).await
    }

    async fn command(&mut self, instruction: u8) -> Result<(), I2C::Error> {
        self.send(instruction, false).await
    }

    async fn send(&mut self, byte: u8, data: bool) -> Result<(), I2C::Error> {
        self.write_nibble(byte >> 4, data).await?;
        self.write_nibble(byte & 0x0F, data).await?;
        // Most instructions execute within 37 µs
        self.delay.delay_us(50).await;
        Ok(())
    }

    async fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), I2C::Error> {
        let mut bits = nibble << 4;
        if data {
            bits |= port::RS;
        }
        self.write_port(bits | port::ENABLE).await?;
        self.write_port(bits).await
    }

    async fn write_port(&mut self, bits: u8) -> Result<(), I2C::Error> {
        let backlight = if self.backlight { port::BACKLIGHT } else { 0 };
        self.i2c.write(self.address, &[bits | backlight]).await
    }

    /// Give the bus and delay back
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::output::LineDiff;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorType, Operation};
    use heapless::Vec;

    #[derive(Default)]
    struct MockBus {
        port_writes: Vec<u8, 1024>,
    }

    impl ErrorType for MockBus {
        type Error = Infallible;
    }

    impl I2c for MockBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Infallible> {
            assert_eq!(address, PCF8574_ADDR);
            for op in operations {
                if let Operation::Write(bytes) = op {
                    for &b in bytes.iter() {
                        self.port_writes.push(b).unwrap();
                    }
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        async fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Reassemble (is_data, byte) pairs from latched nibbles
    fn decode(writes: &[u8]) -> Vec<(bool, u8), 256> {
        let mut out = Vec::new();
        let mut high: Option<u8> = None;
        for &w in writes.iter().filter(|&&w| w & port::ENABLE != 0) {
            let nibble = w >> 4;
            match high.take() {
                None => high = Some(nibble),
                Some(h) => out.push((w & port::RS != 0, (h << 4) | nibble)).unwrap(),
            }
        }
        out
    }

    fn lcd() -> Hd44780<MockBus, NoDelay> {
        Hd44780::new(MockBus::default(), NoDelay, PCF8574_ADDR, 16, 2)
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = lcd();
        block_on(lcd.init()).unwrap();
        let (bus, _) = lcd.release();
        let latched: Vec<u8, 64> = bus
            .port_writes
            .iter()
            .filter(|&&w| w & port::ENABLE != 0)
            .map(|&w| w >> 4)
            .collect();
        assert_eq!(&latched[..4], &[0x03, 0x03, 0x03, 0x02]);
        // Function set, display on, clear, entry mode
        let bytes = decode(&bus.port_writes[9..]);
        assert_eq!(
            &bytes[..],
            &[(false, 0x28), (false, 0x0C), (false, 0x01), (false, 0x06)]
        );
    }

    #[test]
    fn test_write_at_second_row() {
        let mut lcd = lcd();
        block_on(lcd.write_at(2, 1, b"AB")).unwrap();
        let (bus, _) = lcd.release();
        assert_eq!(
            &decode(&bus.port_writes)[..],
            &[(false, 0x80 | 0x42), (true, b'A'), (true, b'B')]
        );
    }

    #[test]
    fn test_write_clipped_at_row_end() {
        let mut lcd = lcd();
        block_on(lcd.write_at(14, 0, b"xyz")).unwrap();
        let (bus, _) = lcd.release();
        assert_eq!(decode(&bus.port_writes).len(), 3);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut lcd = lcd();
        block_on(lcd.write_at(0, 2, b"x")).unwrap();
        let (bus, _) = lcd.release();
        assert!(bus.port_writes.is_empty());
    }

    #[test]
    fn test_apply_line_diff() {
        let mut lcd = lcd();
        let mut diff: LineDiff<16, 2> = LineDiff::new();
        diff.update(0, b"120 BPM");
        let spans = diff.update(0, b"126 BPM");
        block_on(lcd.apply(0, &spans)).unwrap();
        let (bus, _) = lcd.release();
        assert_eq!(&decode(&bus.port_writes)[..], &[(false, 0x82), (true, b'6')]);
    }

    #[test]
    fn test_create_char_targets_cgram() {
        let mut lcd = lcd();
        block_on(lcd.create_char(1, &[0x1F; 8])).unwrap();
        let (bus, _) = lcd.release();
        let bytes = decode(&bus.port_writes);
        assert_eq!(bytes[0], (false, 0x48));
        assert_eq!(bytes.len(), 10);
    }

    #[test]
    fn test_backlight_bit() {
        let mut lcd = lcd();
        block_on(lcd.set_backlight(false)).unwrap();
        block_on(lcd.write_byte(b'a')).unwrap();
        let (bus, _) = lcd.release();
        assert!(bus.port_writes.iter().all(|w| w & port::BACKLIGHT == 0));
    }
}
