//! Plans
//!
//! A plan is a complete, fully priced assignment of one offering per requested item. Plans
//! are only ever built whole: a planner either returns one or reports why it could not.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::ItemId,
    offerings::Offering,
    pricing::PricingError,
    sellers::Seller,
};

/// Why a planner could not produce a plan.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Infeasible {
    /// No eligible offering exists for a requested item.
    #[error("no seller can supply item {0}")]
    MissingOffering(ItemId),

    /// No seller stocks every requested item at a usable price.
    #[error("no single seller can fulfill the whole cart")]
    NoSingleSeller,

    /// Even the union of every known seller misses a requested item.
    #[error("cart cannot be fulfilled even using every known seller")]
    NoSellerCover,

    /// Seller sets of the minimum size cover the cart, but none of them could price it.
    #[error("found covering sets of {size} sellers, but none could price the cart")]
    NoPricedCover {
        /// Minimum cover size
        size: usize,
    },

    /// The configured subset size limit was reached without finding a cover.
    #[error("no covering seller set of at most {limit} sellers")]
    SearchLimitReached {
        /// Largest subset size explored
        limit: usize,
    },
}

/// Outcome of a single planner.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanOutcome<T> {
    /// The cart was empty, so there was nothing to plan.
    Empty,

    /// A plan was found.
    Found(T),

    /// No plan satisfies the planner's constraints.
    Infeasible(Infeasible),
}

impl<T> PlanOutcome<T> {
    /// Returns the plan if one was found.
    pub fn found(&self) -> Option<&T> {
        match self {
            PlanOutcome::Found(plan) => Some(plan),
            PlanOutcome::Empty | PlanOutcome::Infeasible(_) => None,
        }
    }

    /// Returns the reason no plan was found, if infeasible.
    pub fn infeasible(&self) -> Option<&Infeasible> {
        match self {
            PlanOutcome::Infeasible(reason) => Some(reason),
            PlanOutcome::Empty | PlanOutcome::Found(_) => None,
        }
    }

    /// Check if the outcome is the empty-cart result.
    pub fn is_empty(&self) -> bool {
        matches!(self, PlanOutcome::Empty)
    }
}

/// `unit_price × quantity` in minor units, or `None` if it does not fit.
pub(crate) fn line_minor_units(unit_price: &Money<'_, Currency>, quantity: u64) -> Option<i64> {
    i64::try_from(quantity)
        .ok()
        .and_then(|quantity| unit_price.to_minor_units().checked_mul(quantity))
}

/// A single resolved line of a plan.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanLine<'a> {
    item: ItemId,
    name: String,
    quantity: u64,
    unit_price: Money<'a, Currency>,
    line_total: Money<'a, Currency>,
    seller: Seller,
}

impl<'a> PlanLine<'a> {
    /// Bind `quantity` units of an item to the offering that supplies it.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line total cannot be represented.
    pub fn new(
        offering: &Offering<'a>,
        quantity: u64,
        unit_price: Money<'a, Currency>,
    ) -> Result<Self, PricingError> {
        let item = offering.item().id().clone();

        let minor_units = line_minor_units(&unit_price, quantity)
            .ok_or_else(|| PricingError::Overflow(item.clone()))?;

        Ok(PlanLine {
            item,
            name: offering.item().name().to_string(),
            quantity,
            unit_price,
            line_total: Money::from_minor(minor_units, unit_price.currency()),
            seller: offering.seller().clone(),
        })
    }

    /// Item identifier
    pub fn item(&self) -> &ItemId {
        &self.item
    }

    /// Item display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requested quantity
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Unit price of the chosen offering
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Unit price multiplied by quantity
    pub fn line_total(&self) -> Money<'a, Currency> {
        self.line_total
    }

    /// Seller supplying the line
    pub fn seller(&self) -> &Seller {
        &self.seller
    }
}

/// Plan
#[derive(Clone, Debug, PartialEq)]
pub struct Plan<'a> {
    lines: Vec<PlanLine<'a>>,
    total: Money<'a, Currency>,
}

impl<'a> Plan<'a> {
    /// Build a plan from resolved lines; the total is the sum of the line totals.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError::Money`] if a line is in a different currency.
    pub fn new(lines: Vec<PlanLine<'a>>, currency: &'a Currency) -> Result<Self, PricingError> {
        let total = lines
            .iter()
            .try_fold(Money::from_minor(0, currency), |acc, line| {
                acc.add(line.line_total)
            })?;

        Ok(Plan { lines, total })
    }

    /// Resolved lines, in cart order
    pub fn lines(&self) -> &[PlanLine<'a>] {
        &self.lines
    }

    /// The line for a given item.
    pub fn line_for(&self, item: &ItemId) -> Option<&PlanLine<'a>> {
        self.lines.iter().find(|line| line.item() == item)
    }

    /// Total cost of the plan
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Distinct sellers used, in order of first appearance.
    pub fn sellers(&self) -> SmallVec<[&Seller; 4]> {
        let mut sellers: SmallVec<[&Seller; 4]> = SmallVec::new();

        for line in &self.lines {
            if !sellers.iter().any(|seller| seller.id == line.seller.id) {
                sellers.push(&line.seller);
            }
        }

        sellers
    }

    /// Number of distinct sellers used.
    pub fn seller_count(&self) -> usize {
        self.sellers().len()
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the plan has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A minimum-size seller set together with its priced plan.
#[derive(Clone, Debug, PartialEq)]
pub struct SellerSetPlan<'a> {
    /// Sellers in the set, in ascending identifier order
    pub sellers: SmallVec<[Seller; 4]>,

    /// Cheapest plan restricted to those sellers
    pub plan: Plan<'a>,
}
