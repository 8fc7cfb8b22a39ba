// SPDX-License-Identifier: GPL-3.0
// lib.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

// This crate contains useful utility functions that can be used throughout the codebase.

/// Exists to allow us to define custom trait operations on `u8`.
type CustomByte = u8;

/// Exists to allow us to define custom trait operations on `u32`.
type CustomWord = u32;

/// This trait exists to allow us to pick apart and reassemble port values in the
/// way the hardware wiring does, bit by bit.
pub trait BitField {

    type Output;

    /// This function should return the value of the specified bit, as either 0 or 1.
    fn bit(self, n: u32) -> Self::Output;

    /// This function should return a value whose bits are taken from the listed
    /// source bits, most significant first. So for an 8-bit value, `order[0]`
    /// names the source of bit 7 and `order[7]` names the source of bit 0.
    fn bitswap(self, order: &[u32]) -> Self::Output;
}

impl BitField for CustomByte {

    type Output = u8;

    /// Returns bit `n` as 0 or 1.
    #[inline(always)]
    fn bit(self, n: u32) -> Self::Output {
        (self >> n) & 1
    }

    /// Reassembles the byte from the listed source bits.
    #[inline(always)]
    fn bitswap(self, order: &[u32]) -> Self::Output {
        order.iter().fold(0, |acc, &source| (acc << 1) | self.bit(source))
    }
}

impl BitField for CustomWord {

    type Output = u32;

    /// Returns bit `n` as 0 or 1.
    #[inline(always)]
    fn bit(self, n: u32) -> Self::Output {
        (self >> n) & 1
    }

    /// Reassembles the word from the listed source bits.
    #[inline(always)]
    fn bitswap(self, order: &[u32]) -> Self::Output {
        order.iter().fold(0, |acc, &source| (acc << 1) | self.bit(source))
    }
}

/// A single named register latch that should survive a save/restore cycle.
/// The host's snapshot mechanism reads and writes it through the reference.
pub struct SaveItem<'a> {
    pub name: &'static str,
    pub value: &'a mut u8,
}

impl<'a> SaveItem<'a> {

    /// Creates a new save item for the given field.
    pub fn new(name: &'static str, value: &'a mut u8) -> Self {
        SaveItem { name, value }
    }
}

/// This trait lets a device declare which of its fields participate in save
/// states. It deliberately says nothing about how they are serialised.
pub trait SaveState {

    /// Implementations must return every persistent field, in a stable order.
    fn save_items(&mut self) -> Vec<SaveItem<'_>>;
}

/// Copies all save items out of a device into plain name/value pairs.
pub fn snapshot(device: &mut dyn SaveState) -> Vec<(&'static str, u8)> {
    device
        .save_items()
        .into_iter()
        .map(|item| (item.name, *item.value))
        .collect()
}

/// Writes previously captured name/value pairs back into a device. Names the
/// device no longer declares are ignored.
pub fn restore(device: &mut dyn SaveState, state: &[(&'static str, u8)]) {
    for item in device.save_items() {
        if let Some((_, value)) = state.iter().find(|(name, _)| *name == item.name) {
            *item.value = *value;
        }
    }
}
