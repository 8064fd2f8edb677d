//! Plan Pricer

use rusty_money::MoneyError;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::QuantityMap,
    index::OfferingIndex,
    items::ItemId,
    plans::{Plan, PlanLine, line_minor_units},
    sellers::SellerId,
};

/// Errors that can occur while pricing a plan.
///
/// These are arithmetic failures, not infeasibility; see [`Pricing::Uncovered`].
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line total does not fit in the money representation.
    #[error("line total for item {0} overflowed")]
    Overflow(ItemId),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Which sellers a pricing attempt may draw from.
#[derive(Clone, Copy, Debug)]
pub enum SellerFilter<'s> {
    /// Every seller is allowed.
    Any,

    /// Only the listed sellers are allowed.
    Only(&'s [SellerId]),
}

impl SellerFilter<'_> {
    /// Whether the filter admits the given seller.
    pub fn allows(&self, seller: &SellerId) -> bool {
        match self {
            SellerFilter::Any => true,
            SellerFilter::Only(sellers) => sellers.contains(seller),
        }
    }
}

/// Result of a pricing attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Pricing<'a> {
    /// Every requested item was assigned an offering.
    Priced(Plan<'a>),

    /// No allowed offering can supply this item; no partial plan is produced.
    Uncovered(ItemId),
}

/// Price every item in `quantities` using the cheapest eligible offering from an allowed seller.
///
/// Ties on unit price go to the lowest seller identifier, then to the offering seen first.
/// Offerings whose line total would overflow are never chosen.
///
/// # Errors
///
/// Returns a [`PricingError`] if line or plan totals cannot be computed.
pub fn price_plan<'a>(
    quantities: &QuantityMap,
    index: &OfferingIndex<'a>,
    sellers: SellerFilter<'_>,
) -> Result<Pricing<'a>, PricingError> {
    let mut lines = Vec::with_capacity(quantities.len());

    for (item, quantity) in quantities.iter() {
        let cheapest = index
            .offerings_for(item)
            .filter(|offering| sellers.allows(&offering.seller().id))
            .filter_map(|offering| {
                let price = offering.eligible_price(quantity)?;

                // An unrepresentable line total can never be the cheapest choice.
                if line_minor_units(price, quantity).is_none() {
                    debug!(seller = %offering.seller().id, %item, quantity, "line total overflows");

                    return None;
                }

                Some((offering, *price))
            })
            .min_by(|(a, a_price), (b, b_price)| {
                a_price
                    .to_minor_units()
                    .cmp(&b_price.to_minor_units())
                    .then_with(|| a.seller().id.cmp(&b.seller().id))
            });

        let Some((offering, unit_price)) = cheapest else {
            return Ok(Pricing::Uncovered(item.clone()));
        };

        lines.push(PlanLine::new(offering, quantity, unit_price)?);
    }

    Ok(Pricing::Priced(Plan::new(lines, index.currency())?))
}
