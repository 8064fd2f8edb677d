//! In-memory catalog

use async_trait::async_trait;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    catalog::{Catalog, CatalogError},
    items::ItemId,
    offerings::OfferingRecord,
};

/// A catalog held entirely in memory, used by fixtures and demos.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    codes: FxHashMap<String, ItemId>,
    offerings: Vec<OfferingRecord>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an external code for an item.
    pub fn add_code(&mut self, code: impl Into<String>, item: ItemId) -> &mut Self {
        self.codes.insert(code.into(), item);

        self
    }

    /// Add an offering record.
    pub fn add_offering(&mut self, offering: OfferingRecord) -> &mut Self {
        self.offerings.push(offering);

        self
    }

    /// Number of offering records held.
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Check if the catalog holds no offerings.
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn resolve_item_id(&self, code: &str) -> Result<Option<ItemId>, CatalogError> {
        Ok(self.codes.get(code).cloned())
    }

    async fn fetch_offerings(
        &self,
        items: &[ItemId],
    ) -> Result<Vec<OfferingRecord>, CatalogError> {
        let wanted: FxHashSet<&ItemId> = items.iter().collect();

        Ok(self
            .offerings
            .iter()
            .filter(|offering| wanted.contains(&offering.item_id))
            .cloned()
            .collect())
    }
}
