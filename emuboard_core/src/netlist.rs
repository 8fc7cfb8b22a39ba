// SPDX-License-Identifier: GPL-3.0
// netlist.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

// A netlist here is a value: a description of a discrete analog circuit that
// an external nodal solver consumes. Nothing in this crate solves it. What we
// do own is building the graph from a declarative description, following
// aliases through sub-circuit namespaces and checking the result is sane
// before anybody tries to simulate it.

/// Engineering-unit helpers used when writing descriptions.
pub mod units;

/// SPICE-style device model cards.
pub mod model;

/// Component kinds and their terminals.
mod component;

/// The deferred description builder and sub-circuit scopes.
mod builder;

/// The resolved, immutable graph.
mod graph;

/// Netlist error types.
mod error;

pub use builder::{Hint, HintKind, NetlistBuilder, Scope, SolverParams, SubcircuitDef};
pub use component::{Component, ComponentKind, TerminalId};
pub use error::{Error, Result};
pub use graph::{Net, NetId, Netlist, SubcircuitInstance};
pub use model::DeviceModel;

#[cfg(test)]
mod tests;
