//! Offering Index
//!
//! Request-scoped lookup structures over a flat offering snapshot: offerings by item, and
//! the set of items each seller covers.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::ItemId,
    offerings::{Offering, Price},
    sellers::{Seller, SellerId},
};

/// Errors related to index construction.
#[derive(Debug, Error)]
pub enum IndexError {
    /// An offering's currency differs from the planning currency.
    ///
    /// Carries the offering position, its currency and the planning currency.
    #[error("Offering {0} has currency {1}, but planning currency is {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// Items covered by a single seller, and the offerings that cover them.
#[derive(Debug)]
pub struct SellerCoverage {
    seller: Seller,
    items: FxHashSet<ItemId>,
    offerings: SmallVec<[usize; 8]>,
}

impl SellerCoverage {
    /// The seller this coverage belongs to
    pub fn seller(&self) -> &Seller {
        &self.seller
    }

    /// Whether the seller offers the given item.
    pub fn covers(&self, item: &ItemId) -> bool {
        self.items.contains(item)
    }

    /// Whether the seller offers every one of the given items.
    pub fn covers_all<'i>(&self, items: impl IntoIterator<Item = &'i ItemId>) -> bool {
        items.into_iter().all(|item| self.items.contains(item))
    }

    /// Number of distinct items the seller offers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the seller offers nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions of this seller's offerings in the index.
    pub fn offering_indexes(&self) -> &[usize] {
        &self.offerings
    }
}

/// Offering Index
#[derive(Debug)]
pub struct OfferingIndex<'a> {
    offerings: Vec<Offering<'a>>,
    by_item: FxHashMap<ItemId, SmallVec<[usize; 4]>>,
    by_seller: BTreeMap<SellerId, SellerCoverage>,
    currency: &'a Currency,
}

impl<'a> OfferingIndex<'a> {
    /// Build an index over the given offerings.
    ///
    /// Every input offering is kept, including duplicates for the same (seller, item) pair.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError::CurrencyMismatch`] if a priced offering is not in `currency`.
    pub fn build(
        offerings: impl Into<Vec<Offering<'a>>>,
        currency: &'a Currency,
    ) -> Result<Self, IndexError> {
        let offerings = offerings.into();

        offerings.iter().enumerate().try_for_each(|(i, offering)| {
            match offering.price() {
                Price::Known(money) if money.currency() != currency => {
                    Err(IndexError::CurrencyMismatch(
                        i,
                        money.currency().iso_alpha_code,
                        currency.iso_alpha_code,
                    ))
                }
                Price::Known(_) | Price::Unknown => Ok(()),
            }
        })?;

        let mut by_item: FxHashMap<ItemId, SmallVec<[usize; 4]>> = FxHashMap::default();
        let mut by_seller: BTreeMap<SellerId, SellerCoverage> = BTreeMap::new();

        for (i, offering) in offerings.iter().enumerate() {
            let item_id = offering.item().id();

            by_item.entry(item_id.clone()).or_default().push(i);

            let coverage = by_seller
                .entry(offering.seller().id.clone())
                .or_insert_with(|| SellerCoverage {
                    seller: offering.seller().clone(),
                    items: FxHashSet::default(),
                    offerings: SmallVec::new(),
                });

            coverage.items.insert(item_id.clone());
            coverage.offerings.push(i);
        }

        Ok(OfferingIndex {
            offerings,
            by_item,
            by_seller,
            currency,
        })
    }

    /// Iterate over the offerings for an item, in input order.
    pub fn offerings_for<'s>(
        &'s self,
        item: &ItemId,
    ) -> impl Iterator<Item = &'s Offering<'a>> + use<'s, 'a> {
        self.by_item
            .get(item)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|&i| self.offerings.get(i))
    }

    /// Coverage of a single seller.
    pub fn seller(&self, seller: &SellerId) -> Option<&SellerCoverage> {
        self.by_seller.get(seller)
    }

    /// Iterate over seller coverage, in ascending seller identifier order.
    pub fn sellers(&self) -> impl Iterator<Item = &SellerCoverage> {
        self.by_seller.values()
    }

    /// Number of distinct sellers in the index.
    pub fn seller_count(&self) -> usize {
        self.by_seller.len()
    }

    /// Offering by its position in the index.
    pub fn offering(&self, index: usize) -> Option<&Offering<'a>> {
        self.offerings.get(index)
    }

    /// Number of offerings in the index.
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Check if the index holds no offerings.
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Planning currency
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Consume the index, returning the offering snapshot it was built from.
    pub fn into_offerings(self) -> Vec<Offering<'a>> {
        self.offerings
    }
}
