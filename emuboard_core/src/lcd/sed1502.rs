// SPDX-License-Identifier: GPL-3.0
// sed1502.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use emuboard_utility::{SaveItem, SaveState};
use log::trace;

use super::{LcdController, SegmentOutput};

const RAM_SIZE: usize = 0x80;

/// Common lines driven by the SED1502.
pub const COMMONS: u8 = 16;

/// Segment lines driven by the SED1502.
pub const SEGMENTS: u8 = 34;

// Mode register bit selecting 8-bit (all commons) operation.
const MODE_8BIT: u8 = 0x01;

/// This struct models an Epson SED1502 LCD driver: 128 bytes of display RAM
/// where byte n holds the common bits of segment n. Commons 0-7 come from
/// the lower half of RAM and commons 8-15 from the upper half. The mode
/// register shares an address with the last even segment.
pub struct Sed1502 {

    ram: [u8; RAM_SIZE],

    // Last value written to the mode register.
    mode: u8,
}

impl Sed1502 {

    /// Creates a new SED1502 object with the correct initial state.
    pub fn new() -> Self {
        Sed1502 {
            ram: [0; RAM_SIZE],
            mode: 0,
        }
    }

    fn mode_address() -> u8 {
        SEGMENTS & !1
    }

    pub fn mode(&self) -> u8 {
        self.mode
    }

    fn eight_bit(&self) -> bool {
        self.mode & MODE_8BIT != 0
    }
}

impl LcdController for Sed1502 {

    fn write(&mut self, offset: u8, data: u8) {
        let offset = offset & 0x7F;
        trace!("sed1502: ram[{:#04x}] = {:#04x}", offset, data);
        self.ram[offset as usize] = data;

        if offset == Self::mode_address() {
            self.mode = data;
        }
    }

    fn read(&self, offset: u8) -> u8 {
        self.ram[(offset & 0x7F) as usize]
    }

    fn update_segs(&self, out: &mut dyn SegmentOutput) {
        // 4-bit mode only drives the low nibble of each half.
        let data_mask = if self.eight_bit() { 0xFF } else { 0x0F };

        for common in 0..COMMONS {
            let bank = ((common & 8) as usize) << 3;
            let segs = (0..SEGMENTS as usize).fold(0u64, |segs, seg| {
                let data = self.ram[seg | bank] & data_mask;
                segs | ((((data >> (common & 7)) & 1) as u64) << seg)
            });
            out.write_segs(common, segs);
        }
    }
}

impl SaveState for Sed1502 {
    fn save_items(&mut self) -> Vec<SaveItem<'_>> {
        // Display RAM lives in its own save region on the host side.
        vec![SaveItem::new("mode", &mut self.mode)]
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[derive(Default)]
    struct Rows(Vec<(u8, u64)>);

    impl SegmentOutput for Rows {
        fn write_segs(&mut self, common: u8, segs: u64) {
            self.0.push((common, segs));
        }
    }

    fn scan(lcd: &Sed1502) -> Vec<u64> {
        let mut rows = Rows::default();
        lcd.update_segs(&mut rows);
        assert_eq!(rows.0.len(), COMMONS as usize);
        rows.0.into_iter().map(|(_, segs)| segs).collect()
    }

    #[test]
    fn write_should_mask_address_to_ram_size() {

        let mut lcd = Sed1502::new();
        lcd.write(0x85, 0x3C);

        assert_eq!(lcd.read(0x05), 0x3C);
    }

    #[test]
    fn mode_register_should_sit_at_last_even_segment() {

        let mut lcd = Sed1502::new();
        lcd.write(34, 0x01);

        assert_eq!(lcd.mode(), 0x01);

        lcd.write(33, 0x00);
        assert_eq!(lcd.mode(), 0x01);
    }

    #[test]
    fn eight_bit_mode_should_drive_every_common() {

        let mut lcd = Sed1502::new();
        lcd.write(34, MODE_8BIT);
        lcd.write(0, 0x81);
        lcd.write(0x43, 0x10);

        let rows = scan(&lcd);

        assert_eq!(rows[0], 1);
        assert_eq!(rows[7], 1);
        assert_eq!(rows[12], 1 << 3);
        assert!(rows.iter().enumerate().all(|(c, &row)| [0, 7, 12].contains(&c) || row == 0));
    }

    #[test]
    fn four_bit_mode_should_blank_upper_nibble_commons() {

        let mut lcd = Sed1502::new();
        lcd.write(2, 0xFF);

        let rows = scan(&lcd);

        assert!(rows[..4].iter().all(|&row| row == 1 << 2));
        assert!(rows[4..].iter().all(|&row| row == 0));
    }
}
