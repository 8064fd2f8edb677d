//! Single-Seller Planner

use std::slice;

use tracing::debug;

use crate::{
    cart::QuantityMap,
    index::OfferingIndex,
    plans::{Infeasible, Plan, PlanOutcome},
    pricing::{Pricing, PricingError, SellerFilter, price_plan},
};

/// Find the cheapest seller that can supply the whole cart on its own.
///
/// Sellers are considered in ascending identifier order; on equal totals the first wins.
///
/// # Errors
///
/// Returns a [`PricingError`] if plan totals cannot be computed.
#[tracing::instrument(
    name = "planners.single_seller",
    skip_all,
    fields(items = quantities.len(), candidates = tracing::field::Empty)
)]
pub fn single_seller<'a>(
    quantities: &QuantityMap,
    index: &OfferingIndex<'a>,
) -> Result<PlanOutcome<Plan<'a>>, PricingError> {
    if quantities.is_empty() {
        return Ok(PlanOutcome::Empty);
    }

    let mut candidates = 0_usize;
    let mut best: Option<Plan<'a>> = None;

    for coverage in index.sellers() {
        if !coverage.covers_all(quantities.items()) {
            continue;
        }

        candidates += 1;

        let seller = &coverage.seller().id;

        match price_plan(quantities, index, SellerFilter::Only(slice::from_ref(seller)))? {
            Pricing::Priced(plan) => {
                let cheaper = best.as_ref().is_none_or(|best| {
                    plan.total().to_minor_units() < best.total().to_minor_units()
                });

                if cheaper {
                    best = Some(plan);
                }
            }
            Pricing::Uncovered(item) => {
                debug!(%seller, %item, "covering seller cannot price item");
            }
        }
    }

    tracing::Span::current().record("candidates", candidates);

    Ok(best.map_or(
        PlanOutcome::Infeasible(Infeasible::NoSingleSeller),
        PlanOutcome::Found,
    ))
}
