// Copyright (c) 2025 - Cowboy AI, Inc.
//! Records and the pure tick projection
//!
//! A [`Record`] is the structured value derived from a tick. The mapping is a
//! pure function:
//!
//! ```text
//! tick n  ──project──▶  Record { id: n + 1, name: "Item {n + 1}" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// One emission step of a tick source, numbered from zero
pub type Tick = u64;

/// Prefix used for every record name
pub const NAME_PREFIX: &str = "Item ";

/// Structured value derived from a tick
///
/// Records are immutable once built and carry no identity beyond their fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    id: u128,
    name: String,
}

impl Record {
    /// Create a record from its parts
    pub fn new(id: u128, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The record id (tick + 1)
    ///
    /// Wider than [`Tick`] so the last tick still has an id.
    pub fn id(&self) -> u128 {
        self.id
    }

    /// The display name, `"Item {id}"` for projected records
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Project a tick into its record
///
/// Deterministic and side-effect free.
pub fn project(tick: Tick) -> Record {
    let id = u128::from(tick) + 1;
    Record {
        id,
        name: format!("{NAME_PREFIX}{id}"),
    }
}
