// SPDX-License-Identifier: GPL-3.0
// error.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {

    #[error("duplicate component: {0}")]
    DuplicateComponent(String),

    #[error("duplicate alias: {0}")]
    DuplicateAlias(String),

    #[error("unknown reference '{reference}' in scope '{scope}'")]
    UnknownReference { reference: String, scope: String },

    #[error("alias cycle through {0}")]
    AliasCycle(String),

    #[error("connection needs at least two terminals: {0:?}")]
    ShortConnection(Vec<String>),

    #[error("net {0} has fewer than two distinct terminals")]
    DegenerateNet(String),

    #[error("floating terminal: {0}")]
    FloatingTerminal(String),

    #[error("sub-circuit {subcircuit} has no parameter {param}")]
    UnknownParameter { subcircuit: String, param: String },

    #[error("malformed model '{0}'")]
    MalformedModel(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
