//! Sellers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a seller (a business stocking parts).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(String);

impl SellerId {
    /// Create a seller identifier.
    pub fn new(id: impl Into<String>) -> Self {
        SellerId(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SellerId {
    fn from(id: &str) -> Self {
        SellerId::new(id)
    }
}

/// Seller
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seller {
    /// Seller identifier
    pub id: SellerId,

    /// Display name
    pub name: String,

    /// Contact address
    pub email: String,
}

impl Seller {
    /// Create a new seller.
    pub fn new(id: SellerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Seller {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
