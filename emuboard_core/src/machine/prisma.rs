// SPDX-License-Identifier: GPL-3.0
// prisma.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use emuboard_utility::{BitField, SaveItem, SaveState};
use log::{debug, trace};

use super::{Machine, MachineInfo};
use crate::cpu::HostCpu;
use crate::display::PwmDisplay;
use crate::error::{check_region, Result};
use crate::lcd::sed1502::{self, Sed1502};
use crate::lcd::LcdController;
use crate::sensorboard::chess_sensorboard::{ChessSensorboard, SensorType};
use crate::sensorboard::Sensorboard;

pub const MAINCPU_SIZE: usize = 0x8000;

/// Port data direction registers as the firmware programs them, ports 1-7.
pub const PORT_DDR: [u8; 7] = [0xFF, 0xFF, 0xFF, 0x7F, 0x30, 0xFF, 0x00];

/// Fill value for the MCU's battery-backed RAM on first boot.
pub const NVRAM_DEFAULT: u8 = 0xFF;

/// IN.0 bits carrying the CPU frequency strap.
pub const CPU_FREQ_MASK: u8 = 0x81;

/// IN.3 battery status, set when the battery is fine.
pub const BATTERY_NORMAL: u8 = 0x01;

// Crystals the strap can select. 12 MHz never shipped but the firmware
// supports it.
const XTAL: [u32; 4] = [16_000_000, 20_000_000, 24_000_000, 12_000_000];

const LED_ROWS: usize = 4;
const LED_COLUMNS: usize = 8;

/// The factory CPU clock strap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CpuFrequency {
    /// 8 MHz, as sold by Tandy as the Chess Champion 2150L.
    Mhz8,
    /// 10 MHz, the Prisma itself.
    #[default]
    Mhz10,
}

impl CpuFrequency {

    /// The strap as it reads on IN.0.
    pub fn strap_bits(self) -> u8 {
        match self {
            CpuFrequency::Mhz8 => 0x00,
            CpuFrequency::Mhz10 => 0x01,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PrismaConfig {
    pub cpu_frequency: CpuFrequency,
}

/// Returns the CPU clock selected by the IN.0 strap bits.
pub fn cpu_clock_for(strap: u8) -> u32 {
    XTAL[strap.bitswap(&[7, 0]) as usize] / 2
}

/// This struct models the Saitek Kasparov Prisma board around its H8/325
/// MCU: a button sensor chessboard, an LCD behind an SED1502, a small LED
/// matrix and a 1-bit speaker. The MCU core belongs to the host, which
/// routes port accesses here.
pub struct Prisma {

    rom: Vec<u8>,

    board: ChessSensorboard,
    lcd: Sed1502,

    // LED matrix and the LCD's segment outputs.
    display: PwmDisplay,
    lcd_pwm: PwmDisplay,

    // 1-bit DAC level.
    speaker: u8,

    // IN.0 to IN.3.
    inputs: [u8; 4],

    // Port latches.
    lcd_data: u8,
    lcd_address: u8,
    lcd_write: u8,
    inp_mux: u8,
}

impl Prisma {

    /// Creates a new Prisma object with the correct initial state. The board
    /// starts with the pieces in the opening position; the host overwrites
    /// that if it has saved NVRAM.
    pub fn new(config: PrismaConfig, rom: &[u8]) -> Result<Self> {

        check_region("maincpu", rom, MAINCPU_SIZE)?;

        let mut board = ChessSensorboard::new(SensorType::Buttons);
        board.preset_chess();

        Ok(Prisma {
            rom: rom.to_vec(),
            board,
            lcd: Sed1502::new(),
            display: PwmDisplay::new(LED_ROWS, LED_COLUMNS),
            lcd_pwm: PwmDisplay::new(sed1502::COMMONS as usize, sed1502::SEGMENTS as usize),
            speaker: 0,
            inputs: [config.cpu_frequency.strap_bits(), 0, 0, BATTERY_NORMAL],
            lcd_data: 0,
            lcd_address: 0,
            lcd_write: 0,
            inp_mux: 0,
        })
    }

    /// Program space read. Everything above the ROM is inside the MCU.
    pub fn read(&self, address: u16) -> u8 {
        self.rom.get(address as usize).copied().unwrap_or(0xFF)
    }

    /// The clock the CPU should currently run at.
    pub fn cpu_clock(&self) -> u32 {
        cpu_clock_for(self.inputs[0])
    }

    /// Sets one of the four input ports. A change to the frequency strap on
    /// IN.0 is passed straight on to the CPU.
    pub fn set_input(&mut self, port: usize, data: u8, cpu: &mut dyn HostCpu) {
        let Some(slot) = self.inputs.get_mut(port) else {
            return;
        };
        let old = *slot;
        *slot = data;

        if port == 0 && (old ^ data) & CPU_FREQ_MASK != 0 {
            self.change_cpu_freq(cpu);
        }
    }

    fn change_cpu_freq(&mut self, cpu: &mut dyn HostCpu) {
        let hz = self.cpu_clock();
        debug!("prisma: cpu clock now {} Hz", hz);
        cpu.set_unscaled_clock(hz);
    }

    /// P10-P13: direct LEDs. P14: speaker.
    pub fn p1_w(&mut self, data: u8) {
        self.speaker = data.bit(4);
    }

    /// P20-P27: input mux and LED column data.
    pub fn p2_w(&mut self, data: u8) {
        self.inp_mux = (!data).bitswap(&[7, 6, 5, 4, 0, 3, 1, 2]);
        self.display.write_mx(!data as u64);
    }

    /// P30-P37: LCD data.
    pub fn p3_w(&mut self, data: u8) {
        self.lcd_data = data.bitswap(&[3, 4, 5, 6, 7, 0, 1, 2]);
    }

    /// P40: LCD CS. P41: LCD RD. P42: LCD WR. Data is written on the falling
    /// edge of WR while CS is low.
    pub fn p4_w(&mut self, data: u8) {
        if !data & self.lcd_write != 0 && !data & 1 != 0 {
            trace!("prisma: lcd[{:#04x}] <- {:#04x}", self.lcd_address, self.lcd_data);
            self.lcd.write(self.lcd_address, self.lcd_data);
        }
        self.lcd_write = data & 4;
    }

    /// P50-P52: button rows. P53: battery status.
    pub fn p5_r(&self) -> u8 {
        let buttons = (0..3).fold(0u8, |data, i| {
            if self.inp_mux & self.inputs[i] != 0 {
                data | (1 << i)
            } else {
                data
            }
        });
        let data = buttons | ((self.inputs[3] & 1) << 3);
        !data | 0xF0
    }

    /// P54-P55: LED row select.
    pub fn p5_w(&mut self, data: u8) {
        self.display.write_my(((!data >> 4) & 3) as u64);
    }

    /// P60-P66: LCD address.
    pub fn p6_w(&mut self, data: u8) {
        self.lcd_address = data & 0x7F;
    }

    /// P70-P77: chessboard, one file per mux bit.
    pub fn p7_r(&self) -> u8 {
        let data = (0..8u8)
            .filter(|&file| self.inp_mux.bit(file as u32) != 0)
            .fold(0, |data, file| data | self.board.read_file(file));
        (!data).bitswap(&[6, 5, 3, 2, 0, 1, 7, 4])
    }

    /// Scans the LCD controller into the segment matrix. The host calls this
    /// at the controller's frame rate.
    pub fn lcd_refresh(&mut self) {
        self.lcd.update_segs(&mut self.lcd_pwm);
    }

    /// Whether the LCD segment on common `common` is dark.
    pub fn lcd_segment(&self, common: usize, segment: usize) -> bool {
        self.lcd_pwm.read_element(common, segment)
    }

    pub fn led(&self, row: usize, column: usize) -> bool {
        self.display.read_element(row, column)
    }

    pub fn speaker_level(&self) -> u8 {
        self.speaker
    }

    pub fn board(&self) -> &ChessSensorboard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut ChessSensorboard {
        &mut self.board
    }

    pub fn lcd(&self) -> &Sed1502 {
        &self.lcd
    }
}

impl Machine for Prisma {

    fn info(&self) -> MachineInfo {
        MachineInfo {
            name: "prisma",
            description: "Kasparov Prisma",
            manufacturer: "Saitek",
            year: 1990,
            working: false,
        }
    }
}

/// The port latches, then the chessboard, which lives in NVRAM.
impl SaveState for Prisma {
    fn save_items(&mut self) -> Vec<SaveItem<'_>> {
        let mut items = vec![
            SaveItem::new("lcd_data", &mut self.lcd_data),
            SaveItem::new("lcd_address", &mut self.lcd_address),
            SaveItem::new("lcd_write", &mut self.lcd_write),
            SaveItem::new("inp_mux", &mut self.inp_mux),
        ];
        items.extend(self.board.save_items());
        items
    }
}

#[cfg(test)]
mod tests;
