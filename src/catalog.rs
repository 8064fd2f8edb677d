//! Catalog
//!
//! The external store the planner reads items and offerings from.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::{items::ItemId, offerings::OfferingRecord};

pub mod memory;

/// Errors surfaced by a catalog implementation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing store could not be reached or failed the query.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to items and offerings.
///
/// Implementations do not retry; a failed read is reported as a [`CatalogError`].
#[automock]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Resolve an external part code to an item identifier, or `None` if no item has that code.
    async fn resolve_item_id(&self, code: &str) -> Result<Option<ItemId>, CatalogError>;

    /// Fetch every offering for the given items, with seller and item display data attached.
    async fn fetch_offerings(&self, items: &[ItemId])
    -> Result<Vec<OfferingRecord>, CatalogError>;
}
