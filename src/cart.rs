//! Cart Aggregation
//!
//! Normalises raw cart lines into a single quantity per item before any planning runs.

use std::num::NonZeroU32;

use futures::future::try_join_all;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::{Catalog, CatalogError},
    items::ItemId,
};

/// Errors related to cart line construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A cart line asked for zero units.
    #[error("cart line quantity must be at least 1")]
    ZeroQuantity,
}

/// How a cart line refers to an item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemRef {
    /// Direct item identifier
    Id(ItemId),

    /// External part code, resolved through the catalog
    Code(String),
}

/// A single line of a raw cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartLine {
    item: ItemRef,
    quantity: NonZeroU32,
}

impl CartLine {
    /// Create a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if `quantity` is zero.
    pub fn new(item: ItemRef, quantity: u32) -> Result<Self, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::ZeroQuantity)?;

        Ok(CartLine { item, quantity })
    }

    /// Create a cart line referring to an item by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if `quantity` is zero.
    pub fn for_item(item: impl Into<ItemId>, quantity: u32) -> Result<Self, CartError> {
        Self::new(ItemRef::Id(item.into()), quantity)
    }

    /// Create a cart line referring to an item by external code.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if `quantity` is zero.
    pub fn for_code(code: impl Into<String>, quantity: u32) -> Result<Self, CartError> {
        Self::new(ItemRef::Code(code.into()), quantity)
    }

    /// Item reference
    pub fn item(&self) -> &ItemRef {
        &self.item
    }

    /// Requested quantity
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// Total requested quantity per item, in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuantityMap {
    entries: Vec<(ItemId, u64)>,
    positions: FxHashMap<ItemId, usize>,
}

impl QuantityMap {
    /// Create an empty quantity map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `item`, merging with any existing entry.
    pub fn add(&mut self, item: ItemId, quantity: u64) {
        match self.positions.get(&item) {
            Some(&position) => {
                if let Some((_, total)) = self.entries.get_mut(position) {
                    *total = total.saturating_add(quantity);
                }
            }
            None => {
                self.positions.insert(item.clone(), self.entries.len());
                self.entries.push((item, quantity));
            }
        }
    }

    /// Requested quantity for an item.
    pub fn get(&self, item: &ItemId) -> Option<u64> {
        self.positions
            .get(item)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, quantity)| *quantity)
    }

    /// Iterate over (item, quantity) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u64)> {
        self.entries.iter().map(|(item, quantity)| (item, *quantity))
    }

    /// Iterate over the distinct requested items.
    pub fn items(&self) -> impl Iterator<Item = &ItemId> {
        self.entries.iter().map(|(item, _)| item)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no items were requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of requested quantities across all items.
    pub fn total_quantity(&self) -> u64 {
        self.entries
            .iter()
            .fold(0, |acc, (_, quantity)| acc.saturating_add(*quantity))
    }
}

impl FromIterator<(ItemId, u64)> for QuantityMap {
    fn from_iter<I: IntoIterator<Item = (ItemId, u64)>>(iter: I) -> Self {
        let mut quantities = QuantityMap::new();

        for (item, quantity) in iter {
            quantities.add(item, quantity);
        }

        quantities
    }
}

/// A cart after item resolution and quantity merging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregatedCart {
    quantities: QuantityMap,
    dropped_lines: usize,
}

impl AggregatedCart {
    /// Create an aggregated cart from an already-resolved quantity map.
    pub fn new(quantities: QuantityMap) -> Self {
        AggregatedCart {
            quantities,
            dropped_lines: 0,
        }
    }

    /// Requested quantity per item
    pub fn quantities(&self) -> &QuantityMap {
        &self.quantities
    }

    /// The distinct items the cart requires.
    pub fn cover_set(&self) -> Vec<ItemId> {
        self.quantities.items().cloned().collect()
    }

    /// Number of raw lines dropped because their item could not be resolved.
    pub fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }

    /// Total number of units across the cart.
    pub fn total_quantity(&self) -> u64 {
        self.quantities.total_quantity()
    }

    /// Check if nothing in the cart resolved to an item.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

/// Resolve and merge raw cart lines.
///
/// Each distinct external code is resolved once, concurrently. Lines whose code does not
/// resolve are dropped and do not count toward any item.
///
/// # Errors
///
/// Returns a [`CatalogError`] if the catalog could not be reached while resolving codes.
pub async fn aggregate<C>(lines: &[CartLine], catalog: &C) -> Result<AggregatedCart, CatalogError>
where
    C: Catalog + ?Sized,
{
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    let codes: Vec<&str> = lines
        .iter()
        .filter_map(|line| match line.item() {
            ItemRef::Code(code) => Some(code.as_str()),
            ItemRef::Id(_) => None,
        })
        .filter(|code| seen.insert(*code))
        .collect();

    let lookups = codes.iter().map(|&code| async move {
        catalog
            .resolve_item_id(code)
            .await
            .map(|item| (code, item))
    });

    let resolved: FxHashMap<&str, Option<ItemId>> =
        try_join_all(lookups).await?.into_iter().collect();

    let mut quantities = QuantityMap::new();
    let mut dropped_lines = 0;

    for line in lines {
        let item = match line.item() {
            ItemRef::Id(item) => Some(item.clone()),
            ItemRef::Code(code) => resolved.get(code.as_str()).cloned().flatten(),
        };

        if let Some(item) = item {
            quantities.add(item, u64::from(line.quantity()));
        } else {
            warn!(item = ?line.item(), quantity = line.quantity(), "dropping unresolved cart line");

            dropped_lines += 1;
        }
    }

    debug!(
        lines = lines.len(),
        codes = codes.len(),
        items = quantities.len(),
        dropped_lines,
        "aggregated cart"
    );

    Ok(AggregatedCart {
        quantities,
        dropped_lines,
    })
}
