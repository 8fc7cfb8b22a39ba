// SPDX-License-Identifier: GPL-3.0
// machine.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use emuboard_utility::SaveState;

/// This module contains the Model Racing Dribbling arcade board.
pub mod dribling;

/// This module contains the Saitek Kasparov Prisma chess computer.
pub mod prisma;

/// Catalogue details for a driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MachineInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub manufacturer: &'static str,
    pub year: u16,
    pub working: bool,
}

/// This trait provides an implementation-opaque way for a host to manage a
/// driver: identify it, reset it and persist its latches.
pub trait Machine: SaveState {

    fn info(&self) -> MachineInfo;

    /// Puts the board's own latches back to their power-on state. CPU reset
    /// is the host's business.
    fn machine_reset(&mut self) {}
}
