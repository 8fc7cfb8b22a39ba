// SPDX-License-Identifier: GPL-3.0
// lib.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

// Crate-wide lines to disable specific lints:

// Devices are built through constructors that take their configuration and
// ROM regions, so there will be no derived Default implementations unless
// a type genuinely has a sensible default.
#![allow(clippy::new_without_default)]

/// This module contains configuration-time error types.
pub mod error;

/// This module contains the host CPU line interface.
pub mod cpu;

/// This module contains the analog netlist description and resolver.
pub mod netlist;

/// This module contains discrete sound boards driven by logic lines.
pub mod sound;

/// This module contains programmable peripheral interface chips.
pub mod ppi;

/// This module contains the vblank watchdog.
pub mod watchdog;

/// This module contains PCI configuration space and cards.
pub mod pci;

/// This module contains LCD segment controllers.
pub mod lcd;

/// This module contains raster and matrix display helpers.
pub mod display;

/// This module contains chessboard sensor arrays.
pub mod sensorboard;

/// This module contains the machine drivers that tie the devices together.
pub mod machine;
