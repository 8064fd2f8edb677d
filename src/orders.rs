//! Seller orders
//!
//! Splits a chosen plan into one order request per seller.

use std::fmt::Write;

use crate::{plans::Plan, sellers::Seller};

/// A single part on an order request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderLine {
    /// Item display name
    pub name: String,

    /// Units requested
    pub quantity: u64,
}

/// An order request addressed to one seller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellerOrder {
    /// Seller receiving the order
    pub seller: Seller,

    /// Parts requested from the seller
    pub lines: Vec<OrderLine>,

    /// Plain-text message body
    pub message: String,
}

/// Group a plan's lines by seller, in order of each seller's first line.
pub fn seller_orders(plan: &Plan<'_>) -> Vec<SellerOrder> {
    let mut orders: Vec<SellerOrder> = Vec::new();

    for line in plan.lines() {
        let order_line = OrderLine {
            name: line.name().to_string(),
            quantity: line.quantity(),
        };

        match orders
            .iter_mut()
            .find(|order| order.seller.id == line.seller().id)
        {
            Some(order) => order.lines.push(order_line),
            None => orders.push(SellerOrder {
                seller: line.seller().clone(),
                lines: vec![order_line],
                message: String::new(),
            }),
        }
    }

    for order in &mut orders {
        order.message = order_message(&order.seller, &order.lines);
    }

    orders
}

fn order_message(seller: &Seller, lines: &[OrderLine]) -> String {
    let mut message = format!(
        "Hi {},\n\nWe'd like to order the following parts:\n",
        seller.name
    );

    for line in lines {
        _ = writeln!(message, "- {} x{}", line.name, line.quantity);
    }

    message.push_str("\nThank you!");

    message
}
