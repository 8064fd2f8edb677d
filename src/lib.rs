//! Cartplan
//!
//! Cartplan is a cart fulfillment optimiser for multi-seller marketplaces. Given a cart of
//! requested items and the offerings every seller lists for them, it computes three
//! independent sourcing plans:
//!
//! - the globally cheapest plan, ignoring how many sellers are involved;
//! - the cheapest plan supplied entirely by one seller;
//! - every smallest set of sellers that can jointly supply the cart, cheapest first.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod index;
pub mod items;
pub mod offerings;
pub mod orders;
pub mod planner;
pub mod planners;
pub mod plans;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod sellers;
pub mod utils;
