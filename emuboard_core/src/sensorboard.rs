// SPDX-License-Identifier: GPL-3.0
// sensorboard.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

/// This module contains the 8x8 chessboard with one sensor per square.
pub mod chess_sensorboard;

/// This trait provides an implementation-opaque way for a machine to scan a
/// sensor board. Square (0, 0) is a1, the bottom-left corner from the white
/// player's side.
pub trait Sensorboard {

    /// Returns the active sensors of file `x` (a..h as 0..7), one bit per
    /// rank with rank 1 in bit 0.
    fn read_file(&self, x: u8) -> u8;

    /// Returns the active sensors of rank `y`, one bit per file.
    fn read_rank(&self, y: u8) -> u8;
}
