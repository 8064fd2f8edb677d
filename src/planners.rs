//! Planners
//!
//! The three ways of sourcing a cart. Each planner is attempted and reported independently:
//! one being infeasible never prevents the others from running.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};

use crate::{
    cart::QuantityMap,
    config::PlannerConfig,
    index::OfferingIndex,
    plans::{Plan, PlanOutcome, SellerSetPlan},
    pricing::PricingError,
};

pub mod combinations;
pub mod global_cheapest;
pub mod minimum_sellers;
pub mod single_seller;

pub use global_cheapest::global_cheapest;
pub use minimum_sellers::minimum_seller_sets;
pub use single_seller::single_seller;

/// The outcome of every planner for one cart and offering snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanSet<'a> {
    /// Cheapest offering per item, regardless of seller count
    pub global_cheapest: PlanOutcome<Plan<'a>>,

    /// Cheapest plan supplied entirely by one seller
    pub single_seller: PlanOutcome<Plan<'a>>,

    /// Every minimum-size seller set, cheapest first
    pub minimum_seller_sets: PlanOutcome<Vec<SellerSetPlan<'a>>>,
}

/// How much the global cheapest plan saves over buying everything from one seller.
#[derive(Clone, Debug, PartialEq)]
pub struct Savings<'a> {
    /// Absolute saving
    pub amount: Money<'a, Currency>,

    /// Saving as a fraction of the single-seller total
    pub percent: Percentage,
}

impl<'a> PlanSet<'a> {
    /// Compare the global cheapest plan against the single-seller plan.
    ///
    /// Returns `None` unless both plans were found.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings_versus_single_seller(&self) -> Result<Option<Savings<'a>>, MoneyError> {
        let (Some(cheapest), Some(single)) =
            (self.global_cheapest.found(), self.single_seller.found())
        else {
            return Ok(None);
        };

        let amount = single.total().sub(cheapest.total())?;
        let single_minor = single.total().to_minor_units();

        let percent = if single_minor == 0 {
            Percentage::from(0.0)
        } else {
            Percentage::from(Decimal::from(amount.to_minor_units()) / Decimal::from(single_minor))
        };

        Ok(Some(Savings { amount, percent }))
    }
}

/// Run every planner over an aggregated cart and indexed offerings.
///
/// # Errors
///
/// Returns a [`PricingError`] if plan totals cannot be computed. Infeasibility is reported
/// per planner in the returned [`PlanSet`], never as an error.
pub fn plan_all<'a>(
    quantities: &QuantityMap,
    index: &OfferingIndex<'a>,
    config: &PlannerConfig,
) -> Result<PlanSet<'a>, PricingError> {
    Ok(PlanSet {
        global_cheapest: global_cheapest(quantities, index)?,
        single_seller: single_seller(quantities, index)?,
        minimum_seller_sets: minimum_seller_sets(quantities, index, config.max_seller_set_size)?,
    })
}
