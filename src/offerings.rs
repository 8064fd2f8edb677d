//! Offerings
//!
//! An offering is a seller's priced, quantified listing of an item. Raw records arrive from
//! the catalog with loosely typed prices and quantities; they are validated into [`Offering`]
//! values here so that no ambiguous amount ever reaches the pricing arithmetic.

use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    items::{Item, ItemId},
    sellers::{Seller, SellerId},
};

/// Errors raised while validating an offering record.
#[derive(Debug, Error, PartialEq)]
pub enum OfferingError {
    /// The price could not be parsed as a decimal amount.
    #[error("invalid price {price:?} for item {item} from seller {seller}")]
    InvalidPrice {
        /// Seller of the offending record
        seller: SellerId,

        /// Item of the offending record
        item: ItemId,

        /// Raw price value
        price: String,
    },

    /// The price was below zero.
    #[error("negative price {price} for item {item} from seller {seller}")]
    NegativePrice {
        /// Seller of the offending record
        seller: SellerId,

        /// Item of the offending record
        item: ItemId,

        /// Parsed price value
        price: Decimal,
    },

    /// The available quantity was below zero.
    #[error("negative quantity {quantity} for item {item} from seller {seller}")]
    NegativeQuantity {
        /// Seller of the offending record
        seller: SellerId,

        /// Item of the offending record
        item: ItemId,

        /// Raw quantity value
        quantity: i64,
    },

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Unit price of an offering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Price<'a> {
    /// A validated, non-negative unit price.
    Known(Money<'a, Currency>),

    /// The seller listed the item without a price.
    Unknown,
}

impl<'a> Price<'a> {
    /// Returns the amount if the price is known.
    pub fn known(&self) -> Option<&Money<'a, Currency>> {
        match self {
            Price::Known(money) => Some(money),
            Price::Unknown => None,
        }
    }
}

/// Available quantity of an offering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stock {
    /// A known number of units on hand.
    Available(u64),

    /// Stock is not tracked for this offering.
    Unknown,
}

impl Stock {
    /// Whether this stock level can supply `quantity` units.
    ///
    /// Untracked stock is assumed to be able to supply any quantity.
    pub fn satisfies(&self, quantity: u64) -> bool {
        match self {
            Stock::Available(available) => *available >= quantity,
            Stock::Unknown => true,
        }
    }
}

/// A seller's listing of a single item.
#[derive(Clone, Debug, PartialEq)]
pub struct Offering<'a> {
    seller: Seller,
    item: Item,
    price: Price<'a>,
    stock: Stock,
}

impl<'a> Offering<'a> {
    /// Creates a new offering.
    pub fn new(seller: Seller, item: Item, price: Price<'a>, stock: Stock) -> Self {
        Self {
            seller,
            item,
            price,
            stock,
        }
    }

    /// Seller supplying the item
    pub fn seller(&self) -> &Seller {
        &self.seller
    }

    /// Item on offer
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Unit price
    pub fn price(&self) -> &Price<'a> {
        &self.price
    }

    /// Available quantity
    pub fn stock(&self) -> Stock {
        self.stock
    }

    /// Returns the unit price if this offering can supply `quantity` units.
    ///
    /// Offerings without a known price, or with too little known stock, are never used to
    /// price a plan line.
    pub fn eligible_price(&self, quantity: u64) -> Option<&Money<'a, Currency>> {
        if self.stock.satisfies(quantity) {
            self.price.known()
        } else {
            None
        }
    }
}

/// An offering as stored by the catalog, with seller and item display data attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingRecord {
    /// Seller identifier
    pub seller_id: SellerId,

    /// Seller display name
    pub seller_name: String,

    /// Seller contact address
    #[serde(default)]
    pub seller_email: String,

    /// Item identifier
    pub item_id: ItemId,

    /// Item display name
    pub item_name: String,

    /// Unit price as a decimal string (e.g. "12.50"); absent when unpriced
    pub price: Option<String>,

    /// ISO currency code of the price
    pub currency: String,

    /// Units on hand; absent when untracked
    pub quantity: Option<i64>,
}

impl TryFrom<OfferingRecord> for Offering<'static> {
    type Error = OfferingError;

    fn try_from(record: OfferingRecord) -> Result<Self, Self::Error> {
        let currency = iso::find(&record.currency)
            .ok_or_else(|| OfferingError::UnknownCurrency(record.currency.clone()))?;

        let price = match record.price.as_deref() {
            Some(raw) => Price::Known(parse_price(raw, currency, &record)?),
            None => Price::Unknown,
        };

        let stock = match record.quantity {
            Some(quantity) => Stock::Available(u64::try_from(quantity).map_err(|_err| {
                OfferingError::NegativeQuantity {
                    seller: record.seller_id.clone(),
                    item: record.item_id.clone(),
                    quantity,
                }
            })?),
            None => Stock::Unknown,
        };

        let seller = Seller::new(record.seller_id, record.seller_name, record.seller_email);
        let item = Item::new(record.item_id, record.item_name);

        Ok(Offering::new(seller, item, price, stock))
    }
}

/// Parse a decimal price into money, rounded to the currency's minor unit.
fn parse_price(
    raw: &str,
    currency: &'static Currency,
    record: &OfferingRecord,
) -> Result<Money<'static, Currency>, OfferingError> {
    let invalid = || OfferingError::InvalidPrice {
        seller: record.seller_id.clone(),
        item: record.item_id.clone(),
        price: raw.to_string(),
    };

    let amount = Decimal::from_str(raw.trim()).map_err(|_err| invalid())?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(OfferingError::NegativePrice {
            seller: record.seller_id.clone(),
            item: record.item_id.clone(),
            price: amount,
        });
    }

    let scale = 10_i64.checked_pow(currency.exponent).ok_or_else(invalid)?;

    let minor_units = amount
        .checked_mul(Decimal::from(scale))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(invalid)?;

    Ok(Money::from_minor(minor_units, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;

    fn record(price: Option<&str>, quantity: Option<i64>) -> OfferingRecord {
        OfferingRecord {
            seller_id: SellerId::new("garage-1"),
            seller_name: "Garage One".to_string(),
            seller_email: "orders@garage-one.test".to_string(),
            item_id: ItemId::new("brake-pads"),
            item_name: "Brake Pads".to_string(),
            price: price.map(str::to_string),
            currency: "EUR".to_string(),
            quantity,
        }
    }

    #[test]
    fn record_with_price_and_quantity_validates() -> TestResult {
        let offering = Offering::try_from(record(Some("12.50"), Some(4)))?;

        assert_eq!(offering.price(), &Price::Known(Money::from_minor(1250, EUR)));
        assert_eq!(offering.stock(), Stock::Available(4));
        assert_eq!(offering.seller().name, "Garage One");
        assert_eq!(offering.item().name(), "Brake Pads");

        Ok(())
    }

    #[test]
    fn missing_price_and_quantity_are_unknown() -> TestResult {
        let offering = Offering::try_from(record(None, None))?;

        assert_eq!(offering.price(), &Price::Unknown);
        assert_eq!(offering.stock(), Stock::Unknown);

        Ok(())
    }

    #[test]
    fn price_is_rounded_to_minor_units() -> TestResult {
        let offering = Offering::try_from(record(Some("9.999"), None))?;

        assert_eq!(offering.price(), &Price::Known(Money::from_minor(1000, EUR)));

        Ok(())
    }

    #[test]
    fn unparsable_price_is_rejected() {
        let result = Offering::try_from(record(Some("twelve"), None));

        assert!(matches!(result, Err(OfferingError::InvalidPrice { .. })));
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = Offering::try_from(record(Some("-1.00"), None));

        assert!(matches!(result, Err(OfferingError::NegativePrice { .. })));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let result = Offering::try_from(record(Some("1.00"), Some(-3)));

        assert!(matches!(
            result,
            Err(OfferingError::NegativeQuantity { quantity: -3, .. })
        ));
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let mut raw = record(Some("1.00"), None);
        raw.currency = "XYZ".to_string();

        let result = Offering::try_from(raw);

        assert_eq!(result, Err(OfferingError::UnknownCurrency("XYZ".to_string())));
    }

    #[test]
    fn eligible_price_respects_stock_and_price() -> TestResult {
        let stocked = Offering::try_from(record(Some("5.00"), Some(2)))?;
        let unpriced = Offering::try_from(record(None, Some(10)))?;

        assert_eq!(stocked.eligible_price(2), Some(&Money::from_minor(500, EUR)));
        assert_eq!(stocked.eligible_price(3), None);
        assert_eq!(unpriced.eligible_price(1), None);

        Ok(())
    }
}
