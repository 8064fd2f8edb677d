//! Items

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog item (a part).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an item identifier.
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::new(id)
    }
}

/// A catalog entry, referenced by offerings and cart lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    name: String,
}

impl Item {
    /// Creates a new item with the given identifier and display name.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the item identifier
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the display name of the item
    pub fn name(&self) -> &str {
        &self.name
    }
}
