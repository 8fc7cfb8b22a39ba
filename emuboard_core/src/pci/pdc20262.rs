// SPDX-License-Identifier: GPL-3.0
// pdc20262.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use log::{debug, trace, warn};

use super::config_space::PciConfigSpace;
use super::{IdeBus, PciCard};
use crate::error::{check_region, Result};

const MAIN_ID: u32 = 0x105A_4D38;
const REVISION: u8 = 0x00;
const CLASS_CODE: u32 = 0x01_8000;
const SUBSYSTEM_ID: u32 = 0x105A_4D33;

/// Size of the option ROM holding the Ultra66 BIOS.
pub const BIOS_SIZE: usize = 0x4000;
const EXPANSION_ROM_BASE: u32 = 0xC8000;

// INTB#.
const INTERRUPT_PIN: u8 = 2;

const RESET_COMMAND: u16 = 0x0000;
const RESET_COMMAND_MASK: u16 = 0x0005;
const RESET_STATUS: u16 = 0x0000;

// Byte lane the single decoded control block register sits on.
const CS1_LANE_MASK: u32 = 0x00FF_0000;

/// How the card presents its channels to the host. The card reads this from
/// a board strap; decode is the same either way.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IdeMode {
    #[default]
    Unspecified,
    Compatible,
    Native,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Pdc20262Config {
    pub mode: IdeMode,
}

/// One of the card's two IDE channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdeChannel {
    Primary,
    Secondary,
}

/// This struct models the Promise PDC20262 (Ultra66) as far as its PCI
/// personality goes: configuration space, BAR decode and the option ROM.
/// Register cycles are passed through to whatever drive bus is attached,
/// and while I/O decode is off, or nothing is attached, they read as an
/// idle bus.
pub struct Pdc20262 {

    config: PciConfigSpace,
    mode: IdeMode,
    bios: Vec<u8>,

    // Drive buses behind the primary and secondary channels.
    ide1: Option<Box<dyn IdeBus>>,
    ide2: Option<Box<dyn IdeBus>>,
}

impl Pdc20262 {

    /// Creates a new PDC20262 object with the correct initial state. The BIOS
    /// image must fill the 16 KiB option ROM exactly.
    pub fn new(config: Pdc20262Config, bios: &[u8]) -> Result<Self> {

        check_region("bios", bios, BIOS_SIZE)?;

        let mut space = PciConfigSpace::new(MAIN_ID, REVISION, CLASS_CODE, SUBSYSTEM_ID);
        space.add_io_bar(0, 8);
        space.add_io_bar(1, 4);
        space.add_io_bar(2, 8);
        space.add_io_bar(3, 4);
        space.set_expansion_rom(BIOS_SIZE as u32, EXPANSION_ROM_BASE);
        space.set_interrupt_pin(INTERRUPT_PIN);

        debug!("pdc20262: mode strap {:?}", config.mode);

        let mut card = Pdc20262 {
            config: space,
            mode: config.mode,
            bios: bios.to_vec(),
            ide1: None,
            ide2: None,
        };
        card.reset();
        Ok(card)
    }

    /// Connects a drive bus to one of the channels, replacing any already
    /// there.
    pub fn attach(&mut self, channel: IdeChannel, bus: Box<dyn IdeBus>) {
        match channel {
            IdeChannel::Primary => self.ide1 = Some(bus),
            IdeChannel::Secondary => self.ide2 = Some(bus),
        }
    }

    pub fn mode(&self) -> IdeMode {
        self.mode
    }

    pub fn config_space(&self) -> &PciConfigSpace {
        &self.config
    }

    /// Reads a byte of the option ROM.
    pub fn rom_read(&self, offset: u32) -> u8 {
        self.bios[offset as usize & (BIOS_SIZE - 1)]
    }

    /// Returns the drive bus for a channel if decode is on and one is attached.
    fn bus(&mut self, channel: IdeChannel) -> Option<&mut (dyn IdeBus + 'static)> {
        if !self.config.io_enabled() {
            return None;
        }
        match channel {
            IdeChannel::Primary => self.ide1.as_deref_mut(),
            IdeChannel::Secondary => self.ide2.as_deref_mut(),
        }
    }

    fn read32_cs0(&mut self, channel: IdeChannel, offset: u32, mem_mask: u32) -> u32 {
        match self.bus(channel) {
            Some(bus) => bus.read_cs0(offset, mem_mask),
            None => 0xFFFF_FFFF,
        }
    }

    fn write32_cs0(&mut self, channel: IdeChannel, offset: u32, data: u32, mem_mask: u32) {
        trace!("pdc20262: {:?} cs0 {} <- {:#010x} & {:#010x}", channel, offset, data, mem_mask);
        if let Some(bus) = self.bus(channel) {
            bus.write_cs0(offset, data, mem_mask);
        }
    }

    fn read_cs1(&mut self, channel: IdeChannel) -> u8 {
        match self.bus(channel) {
            Some(bus) => (bus.read_cs1(1, CS1_LANE_MASK) >> 16) as u8,
            None => 0xFF,
        }
    }

    fn write_cs1(&mut self, channel: IdeChannel, data: u8) {
        trace!("pdc20262: {:?} cs1 <- {:#04x}", channel, data);
        if let Some(bus) = self.bus(channel) {
            bus.write_cs1(1, (data as u32) << 16, CS1_LANE_MASK);
        }
    }

    pub fn ide1_read32_cs0(&mut self, offset: u32, mem_mask: u32) -> u32 {
        self.read32_cs0(IdeChannel::Primary, offset, mem_mask)
    }

    pub fn ide1_write32_cs0(&mut self, offset: u32, data: u32, mem_mask: u32) {
        self.write32_cs0(IdeChannel::Primary, offset, data, mem_mask);
    }

    pub fn ide2_read32_cs0(&mut self, offset: u32, mem_mask: u32) -> u32 {
        self.read32_cs0(IdeChannel::Secondary, offset, mem_mask)
    }

    pub fn ide2_write32_cs0(&mut self, offset: u32, data: u32, mem_mask: u32) {
        self.write32_cs0(IdeChannel::Secondary, offset, data, mem_mask);
    }

    pub fn ide1_read_cs1(&mut self) -> u8 {
        self.read_cs1(IdeChannel::Primary)
    }

    pub fn ide1_write_cs1(&mut self, data: u8) {
        self.write_cs1(IdeChannel::Primary, data);
    }

    pub fn ide2_read_cs1(&mut self) -> u8 {
        self.read_cs1(IdeChannel::Secondary)
    }

    pub fn ide2_write_cs1(&mut self, data: u8) {
        self.write_cs1(IdeChannel::Secondary, data);
    }
}

/// Byte position of the lowest lane enabled in `mem_mask`.
fn lane_shift(mem_mask: u32) -> u32 {
    if mem_mask == 0 { 0 } else { mem_mask.trailing_zeros() & !7 }
}

/// The byte address an I/O cycle targets: the dword holding `port`, plus
/// the first lane in `mem_mask`.
fn lane_address(port: u32, mem_mask: u32) -> u32 {
    (port & !3) + lane_shift(mem_mask) / 8
}

impl PciCard for Pdc20262 {

    fn config_read(&self, reg: u8) -> u32 {
        self.config.read_dword(reg)
    }

    fn config_write(&mut self, reg: u8, data: u32, mem_mask: u32) {
        self.config.write_dword(reg, data, mem_mask);
    }

    fn io_read(&mut self, port: u32, mem_mask: u32) -> u32 {
        let Some((bar, offset)) = self.config.decode_io(lane_address(port, mem_mask)) else {
            return 0xFFFF_FFFF;
        };
        match bar {
            0 => self.ide1_read32_cs0(offset / 4, mem_mask),
            2 => self.ide2_read32_cs0(offset / 4, mem_mask),
            1 | 3 if offset == 2 => {
                let data = if bar == 1 { self.ide1_read_cs1() } else { self.ide2_read_cs1() };
                ((data as u32) << lane_shift(mem_mask)) | !mem_mask
            }
            _ => 0xFFFF_FFFF,
        }
    }

    fn io_write(&mut self, port: u32, data: u32, mem_mask: u32) {
        let Some((bar, offset)) = self.config.decode_io(lane_address(port, mem_mask)) else {
            return;
        };
        match bar {
            0 => self.ide1_write32_cs0(offset / 4, data, mem_mask),
            2 => self.ide2_write32_cs0(offset / 4, data, mem_mask),
            1 | 3 if offset == 2 => {
                let byte = (data >> lane_shift(mem_mask)) as u8;
                if bar == 1 {
                    self.ide1_write_cs1(byte);
                } else {
                    self.ide2_write_cs1(byte);
                }
            }
            _ => warn!("pdc20262: write of {:#010x} to undecoded port {:#06x} ignored", data, port),
        }
    }

    fn reset(&mut self) {
        debug!("pdc20262: reset");
        self.config.set_command(RESET_COMMAND, RESET_COMMAND_MASK, RESET_STATUS);
    }
}
