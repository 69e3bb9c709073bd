//! Discrete item identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a discrete item.
///
/// Ids are handed out in ascending order starting from [`ItemId::FIRST`] and
/// are never reassigned once burned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// The first id ever allocated.
    pub const FIRST: ItemId = ItemId(1);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id following this one, `None` if the id space is exhausted.
    pub fn next(self) -> Option<ItemId> {
        self.0.checked_add(1).map(ItemId)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
