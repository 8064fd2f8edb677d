//! Cartplan prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AggregatedCart, CartError, CartLine, ItemRef, QuantityMap},
    catalog::{Catalog, CatalogError, memory::InMemoryCatalog},
    config::{ConfigError, PlannerConfig},
    index::{IndexError, OfferingIndex, SellerCoverage},
    items::{Item, ItemId},
    offerings::{Offering, OfferingError, OfferingRecord, Price, Stock},
    orders::{OrderLine, SellerOrder, seller_orders},
    planner::{CartPlanner, CartPlans, PlanError},
    planners::{PlanSet, Savings, plan_all},
    plans::{Infeasible, Plan, PlanLine, PlanOutcome, SellerSetPlan},
    pricing::PricingError,
    receipt::{ReceiptError, write_plans},
    sellers::{Seller, SellerId},
};
