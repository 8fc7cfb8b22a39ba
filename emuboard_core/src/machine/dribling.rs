// SPDX-License-Identifier: GPL-3.0
// dribling.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use emuboard_utility::{BitField, SaveItem, SaveState};
use log::{debug, trace};

use super::{Machine, MachineInfo};
use crate::cpu::{HostCpu, LineState};
use crate::error::{check_region, Result};
use crate::ppi::i8255::I8255;
use crate::ppi::{Ppi, PpiBridge};
use crate::sound::dribling_sound::DriblingSound;
use crate::sound::{SoundInput, SoundNetwork};
use crate::watchdog::{Watchdog, DEFAULT_WATCHDOG_FRAMES};

/// Palette and screen composition.
pub mod video;

/// Z80 clock: 20 MHz crystal divided by four.
pub const CPU_CLOCK: u32 = 5_000_000;

pub const MAINCPU_SIZE: usize = 0x8000;
pub const GFX_SIZE: usize = 0x2000;
pub const PROMS_SIZE: usize = 0x600;

const VIDEORAM_SIZE: usize = 0x2000;
const COLORRAM_SIZE: usize = 0x2000;

// Colour RAM only decodes these address lines.
const COLORRAM_MASK: u16 = 0x1F9F;

/// IN0 DIP switch: game length. The time the board actually gives does not
/// match either setting's label.
pub const DIP_GAME_DURATION: u8 = 0x40;

/// IN0 DIP switch: new game with one coin, active low.
pub const DIP_NEW_GAME_ONE_COIN: u8 = 0x80;

/// Board configuration.
#[derive(Copy, Clone, Debug)]
pub struct DriblingConfig {
    pub watchdog_frames: u8,
}

impl Default for DriblingConfig {
    fn default() -> Self {
        DriblingConfig {
            watchdog_frames: DEFAULT_WATCHDOG_FRAMES,
        }
    }
}

/// The ROM regions the board needs.
pub struct DriblingRoms<'a> {
    pub maincpu: &'a [u8],
    pub gfx: &'a [u8],
    pub proms: &'a [u8],
}

/// Everything on the board except the two PPIs. Splitting it out lets the
/// PPIs call back into the board while they are themselves borrowed.
struct DriblingBoard {

    // Memory regions.
    rom: Vec<u8>,
    gfx: Vec<u8>,
    proms: Vec<u8>,
    videoram: Vec<u8>,
    colorram: Vec<u8>,

    sound: DriblingSound,
    watchdog: Watchdog,

    // Input ports, active low.
    matrix: [u8; 3],
    in0: u8,

    // Misc latches.
    abca: u8,
    di: u8,
    dr: u8,
    ds: u8,
    sh: u8,
    input_sel: u8,
}

impl DriblingBoard {

    /// Returns DSR0-7: the 16-bit shift register formed by DS:DR, read
    /// through a window that SH slides left. SH is three bits wide, including
    /// when it comes back from a save state.
    fn dsr_r(&self) -> u8 {
        let sh = (self.sh & 7) as u16;
        let ds = self.ds as u16;
        let dr = self.dr as u16;
        ((ds << sh) | (dr >> (8 - sh))) as u8
    }

    /// A clear bit in the selector enables the matching input group.
    fn input_matrix_read(&self) -> u8 {
        (0..3).fold(0xFF, |result, i| {
            if self.input_sel.bit(i) == 0 {
                result & self.matrix[i as usize]
            } else {
                result
            }
        })
    }

    /// Returns true if the write masked the CPU's interrupt.
    fn misc_w(&mut self, data: u8) -> bool {

        trace!("dribling: misc_w {:#04x}", data);

        self.di = data.bit(7);

        // Goalkeeper save.
        self.sound.write_line(SoundInput::Parata, data.bit(6) != 0);

        // Field enable.
        self.abca = data.bit(5);

        self.sound.write_line(SoundInput::EnableSound, data.bit(4) != 0);

        // Bit 3 is not connected.
        self.input_sel = data & 7;

        self.di == 0
    }

    fn sound_w(&mut self, data: u8) {

        trace!("dribling: sound_w {:#04x}", data);

        const LINES: [SoundInput; 8] = [
            SoundInput::FollaB,
            SoundInput::FollaM,
            SoundInput::FollaA,
            SoundInput::CalcioB,
            SoundInput::Fischio,
            SoundInput::CalcioA,
            SoundInput::Contrasto,
            SoundInput::StopPalla,
        ];
        for (bit, input) in LINES.into_iter().enumerate() {
            self.sound.write_line(input, data.bit(bit as u32) != 0);
        }
    }

    fn pb_w(&mut self, data: u8) {

        trace!("dribling: pb_w {:#04x}", data);

        for (bit, input) in SoundInput::PB.into_iter().enumerate() {
            self.sound.write_line(input, data.bit(bit as u32) != 0);
        }
    }

    fn shr_w(&mut self, data: u8) {
        self.watchdog.reset_line_w(data.bit(3) == 0);
        self.sh = data & 7;
    }
}

/// PPI 0: shifter and player controls in, misc latch out.
struct MainPpiBridge<'a, 'c> {
    board: &'a mut DriblingBoard,
    cpu: Option<&'a mut (dyn HostCpu + 'c)>,
}

impl PpiBridge for MainPpiBridge<'_, '_> {

    fn in_pa(&mut self) -> u8 {
        self.board.dsr_r()
    }

    fn in_pb(&mut self) -> u8 {
        self.board.input_matrix_read()
    }

    fn out_pc(&mut self, data: u8) {
        if self.board.misc_w(data) {
            if let Some(cpu) = self.cpu.as_mut() {
                cpu.set_input_line(0, LineState::Clear);
            }
        }
    }
}

/// PPI 1: sound lines out, coin/start/DIPs in, shifter control out.
struct SoundPpiBridge<'a> {
    board: &'a mut DriblingBoard,
}

impl PpiBridge for SoundPpiBridge<'_> {

    fn out_pa(&mut self, data: u8) {
        self.board.sound_w(data);
    }

    fn out_pb(&mut self, data: u8) {
        self.board.pb_w(data);
    }

    fn in_pc(&mut self) -> u8 {
        self.board.in0
    }

    fn out_pc(&mut self, data: u8) {
        self.board.shr_w(data);
    }
}

/// This struct models the Model Racing Dribbling main board: a Z80 with two
/// 8255s, a bitmap display and a discrete sound board behind 18 logic lines.
/// The CPU core belongs to the host, which calls into this object for every
/// memory and I/O cycle and once per vblank.
pub struct Dribling {
    ppi: [I8255; 2],
    board: DriblingBoard,
}

impl Dribling {

    /// Creates a new Dribbling board object from its ROM regions, building
    /// the sound netlist along the way. The board comes out of reset.
    pub fn new(config: DriblingConfig, roms: DriblingRoms<'_>) -> Result<Self> {

        check_region("maincpu", roms.maincpu, MAINCPU_SIZE)?;
        check_region("gfx", roms.gfx, GFX_SIZE)?;
        check_region("proms", roms.proms, PROMS_SIZE)?;

        let sound = DriblingSound::new()?;
        debug!(
            "dribling: sound netlist has {} nets, watchdog {} frames",
            sound.netlist().nets().len(),
            config.watchdog_frames
        );

        let mut dribling = Dribling {
            ppi: [I8255::new(), I8255::new()],
            board: DriblingBoard {
                rom: roms.maincpu.to_vec(),
                gfx: roms.gfx.to_vec(),
                proms: roms.proms.to_vec(),
                videoram: vec![0; VIDEORAM_SIZE],
                colorram: vec![0; COLORRAM_SIZE],
                sound,
                watchdog: Watchdog::new(config.watchdog_frames),
                matrix: [0xFF; 3],
                in0: 0xFF,
                abca: 0,
                di: 0,
                dr: 0,
                ds: 0,
                sh: 0,
                input_sel: 0,
            },
        };
        dribling.machine_reset();
        Ok(dribling)
    }

    /// Program space read.
    pub fn read(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF | 0x4000..=0x7FFF => self.board.rom[address as usize],
            0x2000..=0x3FFF => self.board.videoram[(address & 0x1FFF) as usize],
            0xC000..=0xDFFF => self.board.colorram[(address & 0x1FFF) as usize],
            _ => 0xFF,
        }
    }

    /// Program space write.
    pub fn write(&mut self, address: u16, data: u8) {
        match address {
            0x2000..=0x3FFF => self.board.videoram[(address & 0x1FFF) as usize] = data,
            0xC000..=0xDFFF => self.colorram_w(address & 0x1FFF, data),
            _ => {}
        }
    }

    /// Only some of the colour RAM address lines are decoded.
    fn colorram_w(&mut self, offset: u16, data: u8) {
        self.board.colorram[(offset & COLORRAM_MASK) as usize] = data;
    }

    /// I/O space read. The bus only decodes the low byte of the address.
    pub fn io_read(&mut self, offset: u8) -> u8 {
        let [ppi0, ppi1] = &mut self.ppi;
        if offset & 0x08 != 0 {
            let mut bridge = MainPpiBridge { board: &mut self.board, cpu: None };
            ppi0.read(offset & 3, &mut bridge)
        } else if offset & 0x10 != 0 {
            let mut bridge = SoundPpiBridge { board: &mut self.board };
            ppi1.read(offset & 3, &mut bridge)
        } else {
            0xFF
        }
    }

    /// I/O space write. `cpu` is needed because a misc latch write can clear
    /// the CPU's interrupt line.
    pub fn io_write(&mut self, offset: u8, data: u8, cpu: &mut dyn HostCpu) {
        let [ppi0, ppi1] = &mut self.ppi;
        if offset & 0x08 != 0 {
            let mut bridge = MainPpiBridge { board: &mut self.board, cpu: Some(cpu) };
            ppi0.write(offset & 3, data, &mut bridge);
        } else if offset & 0x10 != 0 {
            let mut bridge = SoundPpiBridge { board: &mut self.board };
            ppi1.write(offset & 3, data, &mut bridge);
        } else if offset & 0x40 != 0 {
            self.board.dr = self.board.ds;
            self.board.ds = data;
        }
    }

    /// Called by the host at the start of every vblank. Returns true if the
    /// watchdog fired and the machine was reset.
    pub fn vblank(&mut self, cpu: &mut dyn HostCpu) -> bool {
        if self.board.di != 0 {
            cpu.set_input_line(0, LineState::Assert);
        }

        if self.board.watchdog.vblank() {
            cpu.reset();
            self.machine_reset();
            return true;
        }
        false
    }

    /// Sets one of the three multiplexed control groups (MUX0-2).
    pub fn set_matrix(&mut self, group: usize, data: u8) {
        if let Some(slot) = self.board.matrix.get_mut(group) {
            *slot = data;
        }
    }

    /// Sets the coin, start and DIP port.
    pub fn set_in0(&mut self, data: u8) {
        self.board.in0 = data;
    }

    pub fn sound(&self) -> &DriblingSound {
        &self.board.sound
    }

    /// The host drains the sound board's line changes through this once per
    /// solver step.
    pub fn sound_mut(&mut self) -> &mut DriblingSound {
        &mut self.board.sound
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.board.watchdog
    }

    pub fn ppi(&self, index: usize) -> &I8255 {
        &self.ppi[index & 1]
    }

    /// The field enable latch.
    pub fn abca(&self) -> u8 {
        self.board.abca
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.board.di != 0
    }
}

impl Machine for Dribling {

    fn info(&self) -> MachineInfo {
        MachineInfo {
            name: "dribling",
            description: "Dribbling",
            manufacturer: "Model Racing",
            year: 1983,
            working: true,
        }
    }

    fn machine_reset(&mut self) {

        debug!("dribling: machine reset");

        let [ppi0, ppi1] = &mut self.ppi;
        ppi0.reset(&mut MainPpiBridge { board: &mut self.board, cpu: None });
        ppi1.reset(&mut SoundPpiBridge { board: &mut self.board });

        let board = &mut self.board;
        board.abca = 0;
        board.di = 0;
        board.dr = 0;
        board.ds = 0;
        board.sh = 0;
        board.input_sel = 0;
        board.watchdog.watchdog_reset();
    }
}

impl SaveState for Dribling {
    fn save_items(&mut self) -> Vec<SaveItem<'_>> {
        let board = &mut self.board;
        vec![
            SaveItem::new("abca", &mut board.abca),
            SaveItem::new("di", &mut board.di),
            SaveItem::new("dr", &mut board.dr),
            SaveItem::new("ds", &mut board.ds),
            SaveItem::new("sh", &mut board.sh),
            SaveItem::new("input_sel", &mut board.input_sel),
        ]
    }
}

#[cfg(test)]
mod tests;
