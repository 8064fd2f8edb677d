//! Global Cheapest Planner

use tracing::debug;

use crate::{
    cart::QuantityMap,
    index::OfferingIndex,
    plans::{Infeasible, Plan, PlanOutcome},
    pricing::{Pricing, PricingError, SellerFilter, price_plan},
};

/// Pick the cheapest eligible offering for each item independently, ignoring seller count.
///
/// This is the price floor: no other planner can produce a lower total.
///
/// # Errors
///
/// Returns a [`PricingError`] if plan totals cannot be computed.
#[tracing::instrument(
    name = "planners.global_cheapest",
    skip_all,
    fields(items = quantities.len())
)]
pub fn global_cheapest<'a>(
    quantities: &QuantityMap,
    index: &OfferingIndex<'a>,
) -> Result<PlanOutcome<Plan<'a>>, PricingError> {
    if quantities.is_empty() {
        return Ok(PlanOutcome::Empty);
    }

    match price_plan(quantities, index, SellerFilter::Any)? {
        Pricing::Priced(plan) => {
            debug!(total = %plan.total(), sellers = plan.seller_count(), "priced cheapest plan");

            Ok(PlanOutcome::Found(plan))
        }
        Pricing::Uncovered(item) => {
            debug!(%item, "no eligible offering");

            Ok(PlanOutcome::Infeasible(Infeasible::MissingOffering(item)))
        }
    }
}
