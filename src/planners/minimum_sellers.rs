//! Minimum-Seller-Set Solver
//!
//! Finds every smallest set of sellers whose combined coverage includes each requested item,
//! prices each set, and returns them cheapest first.
//!
//! Sets are enumerated size by size (1, 2, 3, ...). Once any set of size `k` covers the cart,
//! the remaining sets of size `k` are still checked so that every minimum cover is reported,
//! but no larger size is explored. Worst-case cost is exponential in the number of sellers
//! stocking the requested items; [`crate::config::PlannerConfig::max_seller_set_size`] bounds it.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    cart::QuantityMap,
    index::{OfferingIndex, SellerCoverage},
    plans::{Infeasible, PlanOutcome, SellerSetPlan},
    planners::combinations::Combinations,
    pricing::{Pricing, PricingError, SellerFilter, price_plan},
    sellers::{Seller, SellerId},
};

/// A seller that stocks at least one requested item, with a per-item coverage mask.
struct Candidate<'i> {
    coverage: &'i SellerCoverage,
    covered: Vec<bool>,
}

impl Candidate<'_> {
    fn covers(&self, target: usize) -> bool {
        self.covered.get(target).copied().unwrap_or(false)
    }
}

fn set_covers(combination: &[usize], candidates: &[Candidate<'_>], targets: usize) -> bool {
    (0..targets).all(|target| {
        combination
            .iter()
            .filter_map(|&i| candidates.get(i))
            .any(|candidate| candidate.covers(target))
    })
}

/// Find and price every minimum-size covering seller set.
///
/// `limit` caps the largest set size explored; `None` explores up to every candidate seller.
///
/// # Errors
///
/// Returns a [`PricingError`] if plan totals cannot be computed.
#[tracing::instrument(
    name = "planners.minimum_seller_sets",
    skip_all,
    fields(
        items = quantities.len(),
        candidates = tracing::field::Empty,
        set_size = tracing::field::Empty,
        sets = tracing::field::Empty
    )
)]
pub fn minimum_seller_sets<'a>(
    quantities: &QuantityMap,
    index: &OfferingIndex<'a>,
    limit: Option<usize>,
) -> Result<PlanOutcome<Vec<SellerSetPlan<'a>>>, PricingError> {
    if quantities.is_empty() {
        return Ok(PlanOutcome::Empty);
    }

    let span = tracing::Span::current();
    let targets = quantities.len();

    // Sellers that stock none of the requested items can never be part of a minimum cover.
    let candidates: Vec<Candidate<'_>> = index
        .sellers()
        .filter_map(|coverage| {
            let covered: Vec<bool> = quantities.items().map(|item| coverage.covers(item)).collect();

            covered
                .contains(&true)
                .then_some(Candidate { coverage, covered })
        })
        .collect();

    span.record("candidates", candidates.len());

    let coverable =
        (0..targets).all(|target| candidates.iter().any(|candidate| candidate.covers(target)));

    if !coverable {
        return Ok(PlanOutcome::Infeasible(Infeasible::NoSellerCover));
    }

    let max_size = limit.map_or(candidates.len(), |limit| limit.min(candidates.len()));

    for size in 1..=max_size {
        let covers: Vec<_> = Combinations::new(candidates.len(), size)
            .filter(|combination| set_covers(combination, &candidates, targets))
            .collect();

        if covers.is_empty() {
            debug!(size, "no covering set");

            continue;
        }

        span.record("set_size", size);

        let mut solutions = Vec::with_capacity(covers.len());

        for combination in &covers {
            let sellers: SmallVec<[Seller; 4]> = combination
                .iter()
                .filter_map(|&i| candidates.get(i))
                .map(|candidate| candidate.coverage.seller().clone())
                .collect();

            let ids: SmallVec<[SellerId; 4]> =
                sellers.iter().map(|seller| seller.id.clone()).collect();

            match price_plan(quantities, index, SellerFilter::Only(&ids))? {
                Pricing::Priced(plan) => solutions.push(SellerSetPlan { sellers, plan }),
                Pricing::Uncovered(item) => {
                    debug!(sellers = ?ids, %item, "covering set cannot price item");
                }
            }
        }

        if solutions.is_empty() {
            return Ok(PlanOutcome::Infeasible(Infeasible::NoPricedCover { size }));
        }

        solutions.sort_by_key(|solution| solution.plan.total().to_minor_units());

        span.record("sets", solutions.len());

        return Ok(PlanOutcome::Found(solutions));
    }

    Ok(PlanOutcome::Infeasible(match limit {
        Some(limit) if limit < candidates.len() => Infeasible::SearchLimitReached { limit },
        Some(_) | None => Infeasible::NoSellerCover,
    }))
}
