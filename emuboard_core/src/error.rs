// SPDX-License-Identifier: GPL-3.0
// error.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use thiserror::Error;

use super::netlist;

/// Errors that can occur while configuring a driver. Register reads and writes
/// never fail, so nothing here is reachable once a machine is running.
#[derive(Debug, Error)]
pub enum DriverError {

    #[error("region '{region}' must be {expected:#x} bytes, got {actual:#x}")]
    RegionSize {
        region: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("sound netlist: {0}")]
    Netlist(#[from] netlist::Error),

    #[error("netlist has no logic input named {0}")]
    MissingLogicInput(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;

/// Checks that a ROM or PROM region has exactly the size the hardware decodes.
pub(crate) fn check_region(region: &'static str, data: &[u8], expected: usize) -> Result<()> {
    if data.len() != expected {
        return Err(DriverError::RegionSize {
            region,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}
