// SPDX-License-Identifier: GPL-3.0
// i8255.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use emuboard_utility::{SaveItem, SaveState};
use log::{debug, warn};

use super::{Ppi, PpiBridge};

/// Control word the part powers up with: mode 0, every port an input.
const POWER_ON_MODE: u8 = 0x9B;

const PORT_A: usize = 0;
const PORT_B: usize = 1;
const PORT_C: usize = 2;

/// This struct models an Intel 8255 PPI in mode 0 (simple I/O), which is
/// all the boards in this crate use. Ports configured as inputs float high,
/// so they present 0xFF to anything listening on their output side.
pub struct I8255 {

    // The last mode control word.
    control: u8,

    // Output latches for ports A, B and C.
    latch: [u8; 3],
}

/// Implementation functions for the 8255 itself.
impl I8255 {

    /// Creates a new 8255 object in its power-on mode. Nothing is driven
    /// until the first reset.
    pub fn new() -> Self {
        I8255 {
            control: POWER_ON_MODE,
            latch: [0; 3],
        }
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    fn port_a_input(&self) -> bool {
        self.control & 0x10 != 0
    }

    fn port_b_input(&self) -> bool {
        self.control & 0x02 != 0
    }

    /// Bits of port C currently configured as inputs.
    fn port_c_input_mask(&self) -> u8 {
        let upper = if self.control & 0x08 != 0 { 0xF0 } else { 0x00 };
        let lower = if self.control & 0x01 != 0 { 0x0F } else { 0x00 };
        upper | lower
    }

    fn output_pa(&self, bridge: &mut dyn PpiBridge) {
        let data = if self.port_a_input() { 0xFF } else { self.latch[PORT_A] };
        bridge.out_pa(data);
    }

    fn output_pb(&self, bridge: &mut dyn PpiBridge) {
        let data = if self.port_b_input() { 0xFF } else { self.latch[PORT_B] };
        bridge.out_pb(data);
    }

    fn output_pc(&self, bridge: &mut dyn PpiBridge) {
        bridge.out_pc(self.latch[PORT_C] | self.port_c_input_mask());
    }

    /// Loads a new mode control word. All latches clear and every port
    /// republishes its level.
    fn set_mode(&mut self, data: u8, bridge: &mut dyn PpiBridge) {

        if data & 0x64 != 0 {
            warn!("8255: mode {:#04x} asks for mode 1 or 2, treating as mode 0", data);
        }
        debug!("8255: control word {:#04x}", data);

        self.control = data;
        self.latch = [0; 3];

        self.output_pa(bridge);
        self.output_pb(bridge);
        self.output_pc(bridge);
    }
}

/// Implementation functions to be called from anything that understands what
/// a Ppi object is.
impl Ppi for I8255 {

    fn read(&mut self, offset: u8, bridge: &mut dyn PpiBridge) -> u8 {
        match offset & 3 {
            0 => {
                if self.port_a_input() {
                    bridge.in_pa()
                } else {
                    self.latch[PORT_A]
                }
            }
            1 => {
                if self.port_b_input() {
                    bridge.in_pb()
                } else {
                    self.latch[PORT_B]
                }
            }
            2 => {
                let mask = self.port_c_input_mask();
                let input = if mask != 0 { bridge.in_pc() } else { 0 };
                (input & mask) | (self.latch[PORT_C] & !mask)
            }
            _ => self.control,
        }
    }

    fn write(&mut self, offset: u8, data: u8, bridge: &mut dyn PpiBridge) {
        match offset & 3 {
            // Input ports still latch and publish, floating high.
            0 => {
                self.latch[PORT_A] = data;
                self.output_pa(bridge);
            }
            1 => {
                self.latch[PORT_B] = data;
                self.output_pb(bridge);
            }
            2 => {
                self.latch[PORT_C] = data;
                self.output_pc(bridge);
            }
            _ => {
                if data & 0x80 != 0 {
                    self.set_mode(data, bridge);
                } else {
                    // Port C bit set/reset.
                    let bit = (data >> 1) & 7;
                    if data & 1 != 0 {
                        self.latch[PORT_C] |= 1 << bit;
                    } else {
                        self.latch[PORT_C] &= !(1 << bit);
                    }
                    self.output_pc(bridge);
                }
            }
        }
    }

    fn reset(&mut self, bridge: &mut dyn PpiBridge) {
        self.set_mode(POWER_ON_MODE, bridge);
    }
}

impl SaveState for I8255 {
    fn save_items(&mut self) -> Vec<SaveItem<'_>> {
        let [a, b, c] = &mut self.latch;
        vec![
            SaveItem::new("control", &mut self.control),
            SaveItem::new("latch_a", a),
            SaveItem::new("latch_b", b),
            SaveItem::new("latch_c", c),
        ]
    }
}
