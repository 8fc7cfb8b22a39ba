// SPDX-License-Identifier: GPL-3.0
// cpu.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

// The CPU cores themselves (Z80, H8/325) live in the host emulation kernel.
// Drivers in this crate only ever need to poke at the CPU's external lines,
// so that is all this module describes.

/// The state of a CPU input line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineState {
    Clear,
    Assert,
}

/// This trait provides an implementation-opaque way for a driver to drive the
/// host CPU's external lines. The host supplies it on every call that could
/// cause a line change.
pub trait HostCpu {

    /// The driver calls this to change the state of an input (interrupt) line.
    fn set_input_line(&mut self, line: u8, state: LineState);

    /// The driver calls this when a configuration strap changes the CPU clock.
    fn set_unscaled_clock(&mut self, hz: u32);

    /// The driver calls this when the whole machine must be reset, for
    /// example after a watchdog expiry.
    fn reset(&mut self);
}
