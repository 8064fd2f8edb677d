//! Plan Cart Example
//!
//! This example plans a cart loaded from a fixture set against every planner.
//!
//! Use `-f` to load a fixture set by name
//! Use `-o` to print an order request per seller for the cheapest plan
//! Use `--max-seller-set-size` (or `CARTPLAN_MAX_SELLER_SET_SIZE`) to bound the seller set search

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cartplan::{
    config::PlannerConfig, fixtures::Fixture, orders::seller_orders, planner::CartPlanner,
    receipt::write_plans, utils::ExamplePlanArgs,
};

/// Plan Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
#[tokio::main]
pub async fn main() -> Result<()> {
    let _env = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init()?;

    let args = ExamplePlanArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let lines = fixture.cart().to_vec();

    let config = PlannerConfig {
        max_seller_set_size: args.max_seller_set_size,
        ..fixture.config()
    };

    let planner = CartPlanner::new(fixture.into_catalog(), config)?;

    let start = Instant::now();

    let plans = planner.plan_cart(&lines).await?;

    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_plans(&mut handle, &plans)?;

    if args.orders
        && let Some(plan) = plans.plans.global_cheapest.found()
    {
        for order in seller_orders(plan) {
            println!("\nTo: {} <{}>\n{}", order.seller.name, order.seller.email, order.message);
        }
    }

    println!("\nPlanned in {}", elapsed.human(Truncate::Nano));

    Ok(())
}
