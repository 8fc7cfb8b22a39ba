// SPDX-License-Identifier: GPL-3.0
// lcd.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

/// This module contains the Epson SED1502 segment driver.
pub mod sed1502;

/// This trait provides an implementation-opaque way of talking to an LCD
/// segment controller from a machine's port handlers.
pub trait LcdController {

    /// Writes a byte of display RAM (or a control register mapped into it).
    fn write(&mut self, offset: u8, data: u8);

    /// Reads back a byte of display RAM.
    fn read(&self, offset: u8) -> u8;

    /// Scans every common line once, handing each row of segment bits to
    /// `out`. The host calls this from its refresh timer.
    fn update_segs(&self, out: &mut dyn SegmentOutput);
}

/// Whatever sits on the controller's segment outputs. Bit n of `segs` is
/// segment n on common line `common`.
pub trait SegmentOutput {
    fn write_segs(&mut self, common: u8, segs: u64);
}
