//! Receipt
//!
//! Renders the outcome of every planner as a table per plan.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::MoneyError;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    planner::CartPlans,
    plans::{Plan, PlanOutcome},
};

/// Errors that can occur when rendering plans.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write every planner outcome in `plans` to `out`.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if writing fails or the savings cannot be computed.
pub fn write_plans(out: &mut impl io::Write, plans: &CartPlans<'_>) -> Result<(), ReceiptError> {
    writeln!(
        out,
        "Cart: {} item(s), {} unit(s), {} offering(s)",
        plans.cart.quantities().len(),
        plans.cart.total_quantity(),
        plans.offerings.len()
    )
    .map_err(|_err| ReceiptError::IO)?;

    if plans.cart.dropped_lines() > 0 {
        writeln!(
            out,
            "Dropped {} unresolved cart line(s)",
            plans.cart.dropped_lines()
        )
        .map_err(|_err| ReceiptError::IO)?;
    }

    write_outcome(out, "Global cheapest", &plans.plans.global_cheapest)?;
    write_outcome(out, "Single seller", &plans.plans.single_seller)?;

    match &plans.plans.minimum_seller_sets {
        PlanOutcome::Found(sets) => {
            for (position, set) in sets.iter().enumerate() {
                let names: Vec<&str> =
                    set.sellers.iter().map(|seller| seller.name.as_str()).collect();

                write_plan(
                    out,
                    &format!("Minimum seller set #{} ({})", position + 1, names.join(", ")),
                    &set.plan,
                )?;
            }
        }
        PlanOutcome::Empty => write_note(out, "Minimum seller set", "cart is empty")?,
        PlanOutcome::Infeasible(reason) => {
            write_note(out, "Minimum seller set", &reason.to_string())?;
        }
    }

    if let Some(savings) = plans.plans.savings_versus_single_seller()? {
        let points = percent_points_from_fractional_percentage(savings.percent);

        writeln!(
            out,
            "\nSavings versus single seller: ({points:.2}%) {}",
            savings.amount
        )
        .map_err(|_err| ReceiptError::IO)?;
    }

    Ok(())
}

fn write_outcome(
    out: &mut impl io::Write,
    title: &str,
    outcome: &PlanOutcome<Plan<'_>>,
) -> Result<(), ReceiptError> {
    match outcome {
        PlanOutcome::Empty => write_note(out, title, "cart is empty"),
        PlanOutcome::Found(plan) => write_plan(out, title, plan),
        PlanOutcome::Infeasible(reason) => write_note(out, title, &reason.to_string()),
    }
}

fn write_note(out: &mut impl io::Write, title: &str, note: &str) -> Result<(), ReceiptError> {
    writeln!(out, "\n{title}: {note}").map_err(|_err| ReceiptError::IO)
}

fn write_plan(out: &mut impl io::Write, title: &str, plan: &Plan<'_>) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Seller", "Qty", "Unit Price", "Line Total"]);

    for line in plan.lines() {
        builder.push_record([
            line.name().to_string(),
            line.seller().name.clone(),
            line.quantity().to_string(),
            format!("{}", line.unit_price()),
            format!("{}", line.line_total()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(
        out,
        "\n{title} ({} seller(s))\n{table}\nTotal: {}",
        plan.seller_count(),
        plan.total()
    )
    .map_err(|_err| ReceiptError::IO)
}

fn percent_points_from_fractional_percentage(percent: Percentage) -> Decimal {
    ((percent * Decimal::ONE) * Decimal::from(100)).round_dp(2)
}
