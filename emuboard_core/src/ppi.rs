// SPDX-License-Identifier: GPL-3.0
// ppi.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

/// This module contains the Intel 8255 implementation.
pub mod i8255;

/// This trait provides an implementation-opaque way of talking to a
/// programmable peripheral interface from a machine's I/O handlers.
pub trait Ppi {

    /// Reads one of the four registers (A, B, C, control).
    fn read(&mut self, offset: u8, bridge: &mut dyn PpiBridge) -> u8;

    /// Writes one of the four registers (A, B, C, control).
    fn write(&mut self, offset: u8, data: u8, bridge: &mut dyn PpiBridge);

    /// Puts the device back in its power-on mode.
    fn reset(&mut self, bridge: &mut dyn PpiBridge);
}

/// This trait is what the PPI sees of the board it is soldered to. Ports the
/// board leaves unconnected read as all ones and swallow writes.
pub trait PpiBridge {

    fn in_pa(&mut self) -> u8 {
        0xFF
    }

    fn in_pb(&mut self) -> u8 {
        0xFF
    }

    fn in_pc(&mut self) -> u8 {
        0xFF
    }

    fn out_pa(&mut self, _data: u8) {}

    fn out_pb(&mut self, _data: u8) {}

    fn out_pc(&mut self, _data: u8) {}
}
