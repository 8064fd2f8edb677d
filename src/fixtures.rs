//! Fixtures
//!
//! Loads a catalog and a cart from a YAML fixture set.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::{CartError, CartLine, ItemRef},
    catalog::memory::InMemoryCatalog,
    config::PlannerConfig,
    items::ItemId,
    offerings::OfferingRecord,
    sellers::SellerId,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Seller not found
    #[error("Seller not found: {0}")]
    SellerNotFound(String),

    /// Item not found
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Cart line names neither an item nor a code
    #[error("Cart line {0} has neither an item nor a code")]
    MissingItemRef(usize),

    /// Invalid cart line
    #[error("Invalid cart line {0}: {1}")]
    Cart(usize, CartError),
}

/// Fixture set in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    /// ISO currency code for every offering in the set
    #[serde(default = "default_currency")]
    currency: String,

    /// Map of seller key -> seller fixture
    sellers: FxHashMap<String, SellerFixture>,

    /// Map of item key -> item fixture
    items: FxHashMap<String, ItemFixture>,

    /// Offerings, in catalog order
    #[serde(default)]
    offerings: Vec<OfferingFixture>,

    /// Raw cart lines
    #[serde(default)]
    cart: Vec<CartLineFixture>,
}

#[derive(Debug, Deserialize)]
struct SellerFixture {
    name: String,

    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct ItemFixture {
    name: String,

    /// External part code the item can be ordered by
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OfferingFixture {
    seller: String,
    item: String,
    price: Option<String>,
    quantity: Option<i64>,

    /// Overrides the set currency
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CartLineFixture {
    item: Option<String>,
    code: Option<String>,

    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_currency() -> String {
    PlannerConfig::default().currency
}

fn default_quantity() -> u32 {
    1
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the loaded sets
    catalog: InMemoryCatalog,

    /// Cart lines from the loaded sets
    cart: Vec<CartLine>,

    /// Currency of the last loaded set
    currency: Option<String>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: InMemoryCatalog::new(),
            cart: Vec::new(),
            currency: None,
        }
    }

    /// Load a catalog and cart from `catalogs/{name}.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an offering refers to an
    /// unknown seller or item, or if a cart line is invalid.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalogs").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        for (key, item) in &fixture.items {
            if let Some(code) = &item.code {
                self.catalog.add_code(code.clone(), ItemId::new(key.clone()));
            }
        }

        for offering in fixture.offerings {
            let seller = fixture
                .sellers
                .get(&offering.seller)
                .ok_or_else(|| FixtureError::SellerNotFound(offering.seller.clone()))?;

            let item = fixture
                .items
                .get(&offering.item)
                .ok_or_else(|| FixtureError::ItemNotFound(offering.item.clone()))?;

            self.catalog.add_offering(OfferingRecord {
                seller_id: SellerId::new(offering.seller),
                seller_name: seller.name.clone(),
                seller_email: seller.email.clone(),
                item_id: ItemId::new(offering.item),
                item_name: item.name.clone(),
                price: offering.price,
                currency: offering.currency.unwrap_or_else(|| fixture.currency.clone()),
                quantity: offering.quantity,
            });
        }

        for (position, line) in fixture.cart.into_iter().enumerate() {
            // An item identifier takes precedence over a code.
            let item = match (line.item, line.code) {
                (Some(item), _) => ItemRef::Id(ItemId::new(item)),
                (None, Some(code)) => ItemRef::Code(code),
                (None, None) => return Err(FixtureError::MissingItemRef(position)),
            };

            let cart_line = CartLine::new(item, line.quantity)
                .map_err(|err| FixtureError::Cart(position, err))?;

            self.cart.push(cart_line);
        }

        self.currency = Some(fixture.currency);

        Ok(self)
    }

    /// Load a complete fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture set cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?;

        Ok(fixture)
    }

    /// Loaded catalog
    pub fn catalog(&self) -> &InMemoryCatalog {
        &self.catalog
    }

    /// Take the loaded catalog
    pub fn into_catalog(self) -> InMemoryCatalog {
        self.catalog
    }

    /// Loaded cart lines
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Planner settings matching the fixture currency
    pub fn config(&self) -> PlannerConfig {
        PlannerConfig {
            currency: self.currency.clone().unwrap_or_else(default_currency),
            ..PlannerConfig::default()
        }
    }
}
