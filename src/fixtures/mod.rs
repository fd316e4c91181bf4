//! Fixtures
//!
//! YAML fixture sets of listings and orders, used by the report binary and the integration
//! tests. A set named `panel` lives in `./fixtures/listings/panel.yml` and
//! `./fixtures/orders/panel.yml`.

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

use crate::{
    fixtures::{listings::ListingsFixture, orders::OrdersFixture},
    listings::{ListingAnalytics, ListingRecord},
    orders::{OrderError, OrderRecord},
};

pub mod listings;
pub mod orders;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid decimal format
    #[error("Invalid decimal format: {0}")]
    InvalidDecimal(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unknown listing state label
    #[error("Unknown listing status: {0}")]
    UnknownListingStatus(String),

    /// Unknown order type label
    #[error("Unknown order type: {0}")]
    UnknownOrderKind(String),

    /// Unknown order source label
    #[error("Unknown order source: {0}")]
    UnknownOrderSource(String),

    /// Order construction error
    #[error("Invalid order: {0}")]
    Order(#[from] OrderError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Listings paired with their analytics
    listings: Vec<(ListingRecord<'static>, ListingAnalytics<'static>)>,

    /// Orders
    orders: Vec<OrderRecord<'static>>,
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
            listings: Vec::new(),
            orders: Vec::new(),
        }
    }

    /// Load listings and orders from a named fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_listings(name)?.load_orders(name)?;

        Ok(fixture)
    }

    /// Load listings from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value is invalid.
    pub fn load_listings(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("listings").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ListingsFixture = serde_norway::from_str(&contents)?;

        for listing_fixture in fixture.listings {
            self.listings.push(listing_fixture.try_into_records()?);
        }

        Ok(self)
    }

    /// Load orders from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an order is invalid.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrdersFixture = serde_norway::from_str(&contents)?;

        for order_fixture in fixture.orders {
            self.orders.push(order_fixture.try_into()?);
        }

        Ok(self)
    }

    /// Loaded listings with their analytics, in file order
    pub fn listings(&self) -> &[(ListingRecord<'static>, ListingAnalytics<'static>)] {
        &self.listings
    }

    /// Loaded orders, in file order
    pub fn orders(&self) -> &[OrderRecord<'static>] {
        &self.orders
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse price string (e.g., "2.99 EUR") into money
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount
/// cannot be parsed as a decimal or has sub-cent precision, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.normalize().scale() > 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "More than two decimal places in: {s}"
        )));
    }

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .as_ref()
        .and_then(ToPrimitive::to_i64)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse a signed decimal such as a trend figure ("-3.5").
///
/// # Errors
///
/// Returns an error if the string is not a decimal.
pub fn parse_decimal(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidDecimal(s.to_string()))
}
