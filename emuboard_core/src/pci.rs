// SPDX-License-Identifier: GPL-3.0
// pci.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

/// This module contains the type 0 configuration header shared by cards.
pub mod config_space;

/// This module contains the Promise PDC20262 controller.
pub mod pdc20262;

/// This trait provides an implementation-opaque way for a host PCI bus to
/// talk to a card: configuration cycles, I/O cycles and reset.
pub trait PciCard {

    /// Reads the configuration dword containing `reg`.
    fn config_read(&self, reg: u8) -> u32;

    /// Writes the configuration dword containing `reg`, honouring byte lanes
    /// in `mem_mask`.
    fn config_write(&mut self, reg: u8, data: u32, mem_mask: u32);

    /// An I/O read cycle. `port` selects a dword, so its low two bits are
    /// ignored, and the byte within it comes from the lowest lane enabled in
    /// `mem_mask`. Data sits in its lanes. Ports the card does not claim read
    /// as all ones.
    fn io_read(&mut self, port: u32, mem_mask: u32) -> u32;

    /// An I/O write cycle, addressed the same way as `io_read`. Ports the
    /// card does not claim ignore the write.
    fn io_write(&mut self, port: u32, data: u32, mem_mask: u32);

    /// Returns the card to its power-on state.
    fn reset(&mut self);
}

/// The far side of an IDE channel. Offsets and masks are in the host bus's
/// 32-bit lane layout.
pub trait IdeBus {

    fn read_cs0(&mut self, offset: u32, mem_mask: u32) -> u32;

    fn write_cs0(&mut self, offset: u32, data: u32, mem_mask: u32);

    fn read_cs1(&mut self, offset: u32, mem_mask: u32) -> u32;

    fn write_cs1(&mut self, offset: u32, data: u32, mem_mask: u32);
}
