// SPDX-License-Identifier: GPL-3.0
// config_space.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use log::{debug, warn};

pub const VENDOR_ID: usize = 0x00;
pub const COMMAND: usize = 0x04;
pub const STATUS: usize = 0x06;
pub const REVISION_ID: usize = 0x08;
pub const CACHE_LINE_SIZE: usize = 0x0C;
pub const LATENCY_TIMER: usize = 0x0D;
pub const BAR0: usize = 0x10;
pub const SUBSYSTEM_VENDOR_ID: usize = 0x2C;
pub const EXPANSION_ROM_BASE: usize = 0x30;
pub const INTERRUPT_LINE: usize = 0x3C;
pub const INTERRUPT_PIN: usize = 0x3D;

/// Command register bit enabling I/O space decode.
pub const COMMAND_IO_SPACE: u16 = 0x0001;

const BAR_COUNT: usize = 6;

/// A base address register's decode size. Only I/O BARs exist on the cards
/// modelled here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct IoBar {
    size: u32,
}

/// This struct models a type 0 PCI configuration header as a flat 256-byte
/// array. Writes go through a per-register policy so that read-only fields
/// cannot be clobbered and BARs only keep the bits their size allows.
#[derive(Clone, Debug)]
pub struct PciConfigSpace {

    // Raw register contents, little-endian.
    data: [u8; 256],

    // Decode size of each implemented BAR.
    bars: [Option<IoBar>; BAR_COUNT],

    // Size of the expansion ROM, zero for none.
    expansion_rom_size: u32,

    // Command register bits software may change.
    command_mask: u16,
}

impl PciConfigSpace {

    /// Creates a new configuration header from a combined `vendor << 16 |
    /// device` id, a revision, a 24-bit class code and a combined subsystem
    /// id.
    pub fn new(main_id: u32, revision: u8, class_code: u32, subsystem_id: u32) -> Self {
        let mut config = PciConfigSpace {
            data: [0; 256],
            bars: [None; BAR_COUNT],
            expansion_rom_size: 0,
            command_mask: 0xFFFF,
        };

        config.set_u16(VENDOR_ID, (main_id >> 16) as u16);
        config.set_u16(VENDOR_ID + 2, main_id as u16);
        config.set_u32(REVISION_ID, (class_code << 8) | revision as u32);
        config.set_u16(SUBSYSTEM_VENDOR_ID, (subsystem_id >> 16) as u16);
        config.set_u16(SUBSYSTEM_VENDOR_ID + 2, subsystem_id as u16);
        config
    }

    fn set_u16(&mut self, offset: usize, value: u16) {
        self.data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn set_u32(&mut self, offset: usize, value: u32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn u16_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.data[offset], self.data[offset + 1]])
    }

    fn u32_at(&self, offset: usize) -> u32 {
        u32::from_le_bytes([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ])
    }

    /// Declares BAR `index` as an I/O window of `size` bytes. Sizes are
    /// powers of two, at least four.
    pub fn add_io_bar(&mut self, index: usize, size: u32) {
        let size = size.max(4).next_power_of_two();
        self.bars[index] = Some(IoBar { size });
        self.set_u32(BAR0 + index * 4, 1);
    }

    pub fn set_expansion_rom(&mut self, size: u32, base: u32) {
        self.expansion_rom_size = size.next_power_of_two();
        self.set_u32(EXPANSION_ROM_BASE, base);
    }

    pub fn set_interrupt_pin(&mut self, pin: u8) {
        self.data[INTERRUPT_PIN] = pin;
    }

    /// Loads the command and status registers and the writable command mask.
    pub fn set_command(&mut self, command: u16, command_mask: u16, status: u16) {
        self.command_mask = command_mask;
        self.set_u16(COMMAND, command);
        self.set_u16(STATUS, status);
    }

    pub fn command(&self) -> u16 {
        self.u16_at(COMMAND)
    }

    pub fn status(&self) -> u16 {
        self.u16_at(STATUS)
    }

    pub fn io_enabled(&self) -> bool {
        self.command() & COMMAND_IO_SPACE != 0
    }

    /// The programmed base of BAR `index`, or `None` if it is not implemented.
    pub fn bar_base(&self, index: usize) -> Option<u32> {
        self.bars
            .get(index)
            .copied()
            .flatten()
            .map(|_| self.u32_at(BAR0 + index * 4) & !3)
    }

    pub fn bar_size(&self, index: usize) -> Option<u32> {
        self.bars.get(index).copied().flatten().map(|bar| bar.size)
    }

    pub fn expansion_rom_base(&self) -> u32 {
        self.u32_at(EXPANSION_ROM_BASE) & !1
    }

    /// Maps an I/O port onto a BAR window. Returns the BAR index and the
    /// offset within it. Nothing decodes while I/O space is disabled, and an
    /// unassigned (zero) base never decodes.
    pub fn decode_io(&self, port: u32) -> Option<(usize, u32)> {
        if !self.io_enabled() {
            return None;
        }
        (0..BAR_COUNT).find_map(|index| {
            let base = self.bar_base(index)?;
            let size = self.bar_size(index)?;
            let offset = port.wrapping_sub(base);
            (base != 0 && offset < size).then_some((index, offset))
        })
    }

    /// Reads the dword containing `reg`.
    pub fn read_dword(&self, reg: u8) -> u32 {
        self.u32_at((reg & 0xFC) as usize)
    }

    /// Writes the dword containing `reg`. Only the bytes enabled in
    /// `mem_mask` take part, and only where the register allows it.
    pub fn write_dword(&mut self, reg: u8, data: u32, mem_mask: u32) {
        let reg = (reg & 0xFC) as usize;
        let old = self.u32_at(reg);
        let merged = (old & !mem_mask) | (data & mem_mask);

        match reg {
            COMMAND => {
                // Status is read-only here; only the command half changes.
                let command = (self.command() & !self.command_mask) | (merged as u16 & self.command_mask);
                debug!("pci: command {:#06x}", command);
                self.set_u16(COMMAND, command);
            }
            CACHE_LINE_SIZE => {
                self.data[CACHE_LINE_SIZE] = merged as u8;
                self.data[LATENCY_TIMER] = (merged >> 8) as u8;
            }
            0x10..=0x24 => {
                let index = (reg - BAR0) / 4;
                if let Some(bar) = self.bars[index] {
                    self.set_u32(reg, (merged & !(bar.size - 1) & !3) | 1);
                }
            }
            EXPANSION_ROM_BASE => {
                if self.expansion_rom_size != 0 {
                    let address_mask = !(self.expansion_rom_size - 1) & 0xFFFF_F800;
                    self.set_u32(reg, (merged & address_mask) | (merged & 1));
                }
            }
            INTERRUPT_LINE => {
                self.data[INTERRUPT_LINE] = merged as u8;
            }
            _ => {
                warn!("pci: write of {:#010x} to read-only config register {:#04x} ignored", data, reg);
            }
        }
    }

    /// The raw 256 bytes, as a configuration dump would show them.
    pub fn bytes(&self) -> &[u8; 256] {
        &self.data
    }
}
