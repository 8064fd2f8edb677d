//! Cart Planner
//!
//! Entry point tying the catalog, cart aggregation, offering index and planners together for
//! a single planning request. Nothing is shared between requests.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{Span, info};

use crate::{
    cart::{AggregatedCart, CartLine, aggregate},
    catalog::{Catalog, CatalogError},
    config::{ConfigError, PlannerConfig},
    index::{IndexError, OfferingIndex},
    offerings::{Offering, OfferingError},
    planners::{PlanSet, plan_all},
    plans::PlanOutcome,
    pricing::PricingError,
};

/// Hard failures of a planning request.
///
/// A cart that cannot be fulfilled is not an error; see [`PlanOutcome::Infeasible`].
#[derive(Debug, Error)]
pub enum PlanError {
    /// The catalog could not be read.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The catalog returned an offering that failed validation.
    #[error(transparent)]
    Offering(#[from] OfferingError),

    /// Offerings could not be indexed.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Plan totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Everything computed for one planning request.
#[derive(Clone, Debug)]
pub struct CartPlans<'a> {
    /// The cart after resolution and merging
    pub cart: AggregatedCart,

    /// Offering snapshot the plans were computed from
    pub offerings: Vec<Offering<'a>>,

    /// Planner outcomes
    pub plans: PlanSet<'a>,
}

/// Plans carts against a catalog.
#[derive(Debug)]
pub struct CartPlanner<C> {
    catalog: C,
    config: PlannerConfig,
    currency: &'static Currency,
}

impl<C: Catalog> CartPlanner<C> {
    /// Create a planner over the given catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(catalog: C, config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let currency = config.currency()?;

        Ok(CartPlanner {
            catalog,
            config,
            currency,
        })
    }

    /// The catalog this planner reads from
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Planner settings
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a raw cart.
    ///
    /// Resolves item codes, fetches offerings for the requested items, and runs every
    /// planner. An empty cart yields [`PlanOutcome::Empty`] from every planner without
    /// touching the offering store.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] if the catalog fails or returns invalid data.
    #[tracing::instrument(
        name = "planner.plan_cart",
        skip_all,
        fields(
            lines = lines.len(),
            items = tracing::field::Empty,
            offerings = tracing::field::Empty,
            sellers = tracing::field::Empty
        ),
        err
    )]
    pub async fn plan_cart(&self, lines: &[CartLine]) -> Result<CartPlans<'static>, PlanError> {
        let span = Span::current();

        let cart = aggregate(lines, &self.catalog).await?;

        span.record("items", cart.quantities().len());

        let records = if cart.is_empty() {
            Vec::new()
        } else {
            self.catalog.fetch_offerings(&cart.cover_set()).await?
        };

        let offerings = records
            .into_iter()
            .map(Offering::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let index = OfferingIndex::build(offerings, self.currency)?;

        span.record("offerings", index.len());
        span.record("sellers", index.seller_count());

        let plans = plan_all(cart.quantities(), &index, &self.config)?;

        info!(
            global_cheapest = %describe(&plans.global_cheapest, |plan| plan.total().to_string()),
            single_seller = %describe(&plans.single_seller, |plan| plan.total().to_string()),
            minimum_seller_sets = %describe(&plans.minimum_seller_sets, |sets| {
                format!("{} set(s)", sets.len())
            }),
            "planned cart"
        );

        Ok(CartPlans {
            cart,
            offerings: index.into_offerings(),
            plans,
        })
    }
}

fn describe<T>(outcome: &PlanOutcome<T>, found: impl Fn(&T) -> String) -> String {
    match outcome {
        PlanOutcome::Empty => "empty".to_string(),
        PlanOutcome::Found(plan) => found(plan),
        PlanOutcome::Infeasible(reason) => reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::{
        catalog::{MockCatalog, memory::InMemoryCatalog},
        items::ItemId,
        offerings::OfferingRecord,
        sellers::SellerId,
    };

    use super::*;

    fn record(seller: &str, item: &str, price: &str) -> OfferingRecord {
        OfferingRecord {
            seller_id: SellerId::new(seller),
            seller_name: seller.to_uppercase(),
            seller_email: format!("{seller}@example.test"),
            item_id: ItemId::new(item),
            item_name: item.to_uppercase(),
            price: Some(price.to_string()),
            currency: "EUR".to_string(),
            quantity: None,
        }
    }

    #[tokio::test]
    async fn empty_cart_skips_offering_fetch() -> TestResult {
        let mut catalog = MockCatalog::new();
        catalog.expect_fetch_offerings().never();

        let planner = CartPlanner::new(catalog, PlannerConfig::default())?;
        let result = planner.plan_cart(&[]).await?;

        assert!(result.plans.global_cheapest.is_empty());
        assert!(result.plans.single_seller.is_empty());
        assert!(result.plans.minimum_seller_sets.is_empty());
        assert!(result.offerings.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn fetch_failure_is_a_hard_error() -> TestResult {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_offerings()
            .returning(|_| Err(CatalogError::Unavailable("timeout".to_string())));

        let planner = CartPlanner::new(catalog, PlannerConfig::default())?;
        let result = planner.plan_cart(&[CartLine::for_item("a", 1)?]).await;

        assert!(matches!(result, Err(PlanError::Catalog(CatalogError::Unavailable(_)))));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_offering_is_a_hard_error() -> TestResult {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_offering(record("x", "a", "not-a-price"));

        let planner = CartPlanner::new(catalog, PlannerConfig::default())?;
        let result = planner.plan_cart(&[CartLine::for_item("a", 1)?]).await;

        assert!(matches!(result, Err(PlanError::Offering(OfferingError::InvalidPrice { .. }))));

        Ok(())
    }

    #[tokio::test]
    async fn foreign_currency_offering_is_a_hard_error() -> TestResult {
        let mut catalog = InMemoryCatalog::new();
        let mut foreign = record("x", "a", "1.00");
        foreign.currency = "USD".to_string();
        catalog.add_offering(foreign);

        let planner = CartPlanner::new(catalog, PlannerConfig::default())?;
        let result = planner.plan_cart(&[CartLine::for_item("a", 1)?]).await;

        assert!(matches!(
            result,
            Err(PlanError::Index(IndexError::CurrencyMismatch(0, "USD", "EUR")))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn plans_cart_against_catalog() -> TestResult {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .add_code("A-1", ItemId::new("a"))
            .add_offering(record("x", "a", "10.00"))
            .add_offering(record("x", "b", "10.00"))
            .add_offering(record("y", "a", "8.00"))
            .add_offering(record("y", "b", "20.00"))
            .add_offering(record("y", "unrelated", "1.00"));

        let planner = CartPlanner::new(catalog, PlannerConfig::default())?;

        let result = planner
            .plan_cart(&[
                CartLine::for_code("A-1", 1)?,
                CartLine::for_item("b", 1)?,
                CartLine::for_code("MISSING", 4)?,
            ])
            .await?;

        assert_eq!(result.cart.dropped_lines(), 1);
        assert_eq!(result.offerings.len(), 4);

        let cheapest = result.plans.global_cheapest.found().ok_or("expected cheapest")?;
        let single = result.plans.single_seller.found().ok_or("expected single seller")?;

        assert_eq!(cheapest.total(), Money::from_minor(1800, EUR));
        assert_eq!(single.total(), Money::from_minor(2000, EUR));

        Ok(())
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PlannerConfig {
            currency: "NOPE".to_string(),
            max_seller_set_size: None,
        };

        let result = CartPlanner::new(InMemoryCatalog::new(), config);

        assert!(matches!(result, Err(ConfigError::UnknownCurrency(_))));
    }
}
