// SPDX-License-Identifier: GPL-3.0
// watchdog.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use emuboard_utility::{SaveItem, SaveState};
use log::warn;

/// Frames a board may go without kicking the watchdog, unless configured
/// otherwise.
pub const DEFAULT_WATCHDOG_FRAMES: u8 = 8;

/// This struct models a vblank-counting watchdog. Software kicks it by
/// toggling its reset line; if a configured number of frames passes with no
/// kick, the machine must be reset.
pub struct Watchdog {

    // Frames allowed between kicks. Zero disables the watchdog.
    frames: u8,

    // Frames since the last kick.
    counter: u8,

    // Last level seen on the reset line.
    reset_line: u8,
}

/// Implementation functions for the watchdog itself.
impl Watchdog {

    /// Creates a new watchdog object that fires after `frames` vblanks.
    pub fn new(frames: u8) -> Self {
        Watchdog {
            frames,
            counter: 0,
            reset_line: 0,
        }
    }

    /// Drives the reset line. Any change of level counts as a kick.
    pub fn reset_line_w(&mut self, state: bool) {
        let state = state as u8;
        if state != self.reset_line {
            self.reset_line = state;
            self.counter = 0;
        }
    }

    /// Restarts the count without touching the line.
    pub fn watchdog_reset(&mut self) {
        self.counter = 0;
    }

    /// Called once per vblank. Returns true when the watchdog has expired,
    /// in which case it also rearms itself.
    pub fn vblank(&mut self) -> bool {
        if self.frames == 0 {
            return false;
        }

        self.counter += 1;
        if self.counter < self.frames {
            return false;
        }

        warn!("watchdog expired after {} frames, resetting machine", self.frames);
        self.counter = 0;
        true
    }

    pub fn frames_since_kick(&self) -> u8 {
        self.counter
    }
}

impl SaveState for Watchdog {
    fn save_items(&mut self) -> Vec<SaveItem<'_>> {
        vec![
            SaveItem::new("watchdog_counter", &mut self.counter),
            SaveItem::new("watchdog_line", &mut self.reset_line),
        ]
    }
}
