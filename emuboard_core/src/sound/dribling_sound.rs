// SPDX-License-Identifier: GPL-3.0
// dribling_sound.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::collections::VecDeque;

use log::{trace, warn};

use super::{LineChange, SoundInput, SoundNetwork};
use crate::error::{DriverError, Result};
use crate::netlist::{ComponentKind, Netlist};

/// The circuit description itself.
pub mod netlist;

/// Most changes held for the solver. Past this the oldest are dropped.
pub const CHANGE_QUEUE_LIMIT: usize = 4096;

/// This struct models the Dribbling sound board as far as the driver is
/// concerned: eighteen logic lines into a discrete circuit. It owns the
/// built netlist and queues line changes for whoever runs the solver.
pub struct DriblingSound {

    // The validated circuit.
    netlist: Netlist,

    // Current level of every line, indexed by SoundInput.
    levels: [bool; SoundInput::COUNT],

    // Changes not yet collected by the solver.
    changes: VecDeque<LineChange>,

    // Set once the queue has dropped a change since the last drain.
    overflowed: bool,
}

/// Implementation functions for the sound board itself.
impl DriblingSound {

    /// Creates a new sound board object, building and validating the netlist.
    /// Every driver line must land on a logic input device.
    pub fn new() -> Result<Self> {

        let netlist = netlist::build()?;

        let mut levels = [false; SoundInput::COUNT];
        for input in SoundInput::ALL {
            match netlist.component(input.device_name()).map(|component| component.kind()) {
                Some(ComponentKind::TtlInput { level }) => levels[input.index()] = *level,
                _ => return Err(DriverError::MissingLogicInput(input.device_name().to_string())),
            }
        }

        Ok(DriblingSound {
            netlist,
            levels,
            changes: VecDeque::new(),
            overflowed: false,
        })
    }
}

/// Implementation functions to be called from anything that understands what
/// a SoundNetwork object is.
impl SoundNetwork for DriblingSound {

    fn write_line(&mut self, input: SoundInput, level: bool) {

        let slot = &mut self.levels[input.index()];
        if *slot == level {
            return;
        }
        *slot = level;

        trace!("{} -> {}", input.device_name(), level as u8);
        if self.changes.len() == CHANGE_QUEUE_LIMIT {
            if !self.overflowed {
                warn!("sound line changes not drained, dropping the oldest");
                self.overflowed = true;
            }
            self.changes.pop_front();
        }
        self.changes.push_back(LineChange { input, level });
    }

    fn line_level(&self, input: SoundInput) -> bool {
        self.levels[input.index()]
    }

    fn drain_changes(&mut self) -> Vec<LineChange> {
        self.overflowed = false;
        self.changes.drain(..).collect()
    }

    fn netlist(&self) -> &Netlist {
        &self.netlist
    }
}
