//! Integration tests for small planning scenarios.
//!
//! `two_sellers`: Garage X offers A@10, B@10 and Garage Y offers A@8, B@20.
//!
//! - Global cheapest: A from Y + B from X = 18, using both garages
//! - Single seller: X at 20 (Y would be 28)
//! - Minimum seller sets: both garages cover the cart alone, so [X (20), Y (28)]
//!
//! `disjoint`: only Garage X stocks A and only Garage Z stocks B, so no single garage can
//! fulfil the cart and {X, Z} is the unique minimum cover.

use rusty_money::{Money, iso::EUR};
use testresult::TestResult;

use cartplan::{
    cart::CartLine,
    catalog::{CatalogError, MockCatalog},
    config::PlannerConfig,
    fixtures::Fixture,
    items::ItemId,
    planner::{CartPlanner, CartPlans, PlanError},
    plans::{Infeasible, Plan, PlanOutcome},
};

async fn plan_set(
    name: &str,
    lines: Option<Vec<CartLine>>,
    max_seller_set_size: Option<usize>,
) -> TestResult<CartPlans<'static>> {
    let fixture = Fixture::from_set(name)?;
    let lines = lines.unwrap_or_else(|| fixture.cart().to_vec());

    let config = PlannerConfig {
        max_seller_set_size,
        ..fixture.config()
    };

    let planner = CartPlanner::new(fixture.into_catalog(), config)?;

    Ok(planner.plan_cart(&lines).await?)
}

fn seller_ids(plan: &Plan<'_>) -> Vec<String> {
    plan.lines()
        .iter()
        .map(|line| line.seller().id.to_string())
        .collect()
}

fn every_plan<'p>(result: &'p CartPlans<'_>) -> Vec<&'p Plan<'p>> {
    let mut plans: Vec<&Plan<'_>> = Vec::new();

    plans.extend(result.plans.global_cheapest.found());
    plans.extend(result.plans.single_seller.found());

    if let Some(sets) = result.plans.minimum_seller_sets.found() {
        plans.extend(sets.iter().map(|set| &set.plan));
    }

    plans
}

#[tokio::test]
async fn two_sellers_both_covering() -> TestResult {
    let result = plan_set("two_sellers", None, None).await?;

    let cheapest = result.plans.global_cheapest.found().ok_or("expected cheapest plan")?;
    let single = result.plans.single_seller.found().ok_or("expected single seller plan")?;
    let sets = result
        .plans
        .minimum_seller_sets
        .found()
        .ok_or("expected minimum seller sets")?;

    assert_eq!(cheapest.total(), Money::from_minor(1800, EUR));
    assert_eq!(seller_ids(cheapest), vec!["y", "x"]);
    assert_eq!(single.total(), Money::from_minor(2000, EUR));

    let totals: Vec<i64> = sets
        .iter()
        .map(|set| set.plan.total().to_minor_units())
        .collect();

    assert_eq!(totals, vec![2000, 2800]);
    assert_eq!(sets.first().map(|set| &set.plan), Some(single));

    Ok(())
}

#[tokio::test]
async fn disjoint_sellers_need_a_pair() -> TestResult {
    let result = plan_set("disjoint", None, None).await?;

    assert_eq!(
        result.plans.single_seller,
        PlanOutcome::Infeasible(Infeasible::NoSingleSeller)
    );

    let sets = result
        .plans
        .minimum_seller_sets
        .found()
        .ok_or("expected minimum seller sets")?;

    assert_eq!(sets.len(), 1);

    let set = sets.first().ok_or("missing set")?;
    let ids: Vec<&str> = set.sellers.iter().map(|seller| seller.id.as_str()).collect();

    assert_eq!(ids, vec!["x", "z"]);
    assert_eq!(set.plan.total(), Money::from_minor(3000, EUR));

    Ok(())
}

#[tokio::test]
async fn search_limit_below_minimum_cover_is_reported() -> TestResult {
    let result = plan_set("disjoint", None, Some(1)).await?;

    assert_eq!(
        result.plans.minimum_seller_sets,
        PlanOutcome::Infeasible(Infeasible::SearchLimitReached { limit: 1 })
    );

    // The other planners are unaffected by the limit.
    assert!(result.plans.global_cheapest.found().is_some());

    Ok(())
}

#[tokio::test]
async fn item_without_offerings_makes_every_planner_infeasible() -> TestResult {
    let lines = vec![CartLine::for_item("a", 1)?, CartLine::for_item("ghost", 1)?];
    let result = plan_set("two_sellers", Some(lines), None).await?;

    assert_eq!(
        result.plans.global_cheapest,
        PlanOutcome::Infeasible(Infeasible::MissingOffering(ItemId::new("ghost")))
    );
    assert!(result.plans.single_seller.infeasible().is_some());
    assert!(result.plans.minimum_seller_sets.infeasible().is_some());

    Ok(())
}

#[tokio::test]
async fn duplicate_lines_aggregate() -> TestResult {
    let lines = vec![
        CartLine::for_item("a", 1)?,
        CartLine::for_item("b", 1)?,
        CartLine::for_item("a", 2)?,
    ];

    let result = plan_set("two_sellers", Some(lines), None).await?;

    for plan in every_plan(&result) {
        let line = plan.line_for(&ItemId::new("a")).ok_or("missing line for a")?;

        assert_eq!(line.quantity(), 3);
    }

    let cheapest = result.plans.global_cheapest.found().ok_or("expected cheapest plan")?;

    assert_eq!(cheapest.total(), Money::from_minor(3400, EUR));

    Ok(())
}

#[tokio::test]
async fn empty_cart_has_no_plans() -> TestResult {
    let result = plan_set("two_sellers", Some(Vec::new()), None).await?;

    assert!(result.plans.global_cheapest.is_empty());
    assert!(result.plans.single_seller.is_empty());
    assert!(result.plans.minimum_seller_sets.is_empty());
    assert_eq!(result.cart.total_quantity(), 0);

    Ok(())
}

#[tokio::test]
async fn totals_match_lines_and_global_is_the_floor() -> TestResult {
    for name in ["two_sellers", "disjoint", "garages"] {
        let result = plan_set(name, None, None).await?;
        let floor = result
            .plans
            .global_cheapest
            .found()
            .ok_or("expected cheapest plan")?
            .total()
            .to_minor_units();

        for plan in every_plan(&result) {
            let sum: i64 = plan
                .lines()
                .iter()
                .map(|line| {
                    let quantity = i64::try_from(line.quantity()).unwrap_or(i64::MAX);

                    line.unit_price().to_minor_units() * quantity
                })
                .sum();

            assert_eq!(plan.total().to_minor_units(), sum, "{name}: total is the sum of lines");
            assert!(
                plan.total().to_minor_units() >= floor,
                "{name}: no plan beats the global floor"
            );

            let mut items: Vec<&ItemId> = plan.lines().iter().map(|line| line.item()).collect();
            let count = items.len();
            items.sort();
            items.dedup();

            assert_eq!(items.len(), count, "{name}: each item appears once");
            assert_eq!(count, result.cart.quantities().len(), "{name}: every item is planned");
        }
    }

    Ok(())
}

#[tokio::test]
async fn planning_is_idempotent() -> TestResult {
    for name in ["two_sellers", "disjoint", "garages"] {
        let first = plan_set(name, None, None).await?;
        let second = plan_set(name, None, None).await?;

        assert_eq!(first.plans, second.plans, "{name}: identical plans");
    }

    Ok(())
}

#[tokio::test]
async fn code_resolution_failure_is_a_hard_error() -> TestResult {
    let mut catalog = MockCatalog::new();

    catalog
        .expect_resolve_item_id()
        .returning(|_| Err(CatalogError::Unavailable("connection reset".to_string())));
    catalog.expect_fetch_offerings().never();

    let planner = CartPlanner::new(catalog, PlannerConfig::default())?;
    let result = planner.plan_cart(&[CartLine::for_code("BP-100", 1)?]).await;

    assert!(matches!(result, Err(PlanError::Catalog(_))));

    Ok(())
}

#[tokio::test]
async fn unresolved_codes_only_yield_an_empty_cart() -> TestResult {
    let mut catalog = MockCatalog::new();

    catalog.expect_resolve_item_id().times(1).returning(|_| Ok(None));
    catalog.expect_fetch_offerings().never();

    let planner = CartPlanner::new(catalog, PlannerConfig::default())?;
    let result = planner
        .plan_cart(&[CartLine::for_code("XX-1", 1)?, CartLine::for_code("XX-1", 2)?])
        .await?;

    assert_eq!(result.cart.dropped_lines(), 2);
    assert!(result.plans.global_cheapest.is_empty());

    Ok(())
}
