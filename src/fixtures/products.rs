//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, products::Product};

/// Wrapper for products in YAML, keyed by product id.
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product id -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Product price (e.g., "1.25 USD")
    pub price: String,

    /// Star rating, 1-5
    pub rating: f32,

    /// Days until expiration
    pub expiration_days: u32,

    /// Whether the product participates in coupon promotions
    #[serde(default)]
    pub coupon_eligible: bool,

    /// Whether the product is currently on sale
    #[serde(default)]
    pub on_sale: bool,

    /// Whether the product is SNAP-eligible
    #[serde(default)]
    pub snap_eligible: bool,
}

impl ProductFixture {
    /// Build a [`Product`] with the given id.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the price string cannot be parsed.
    pub fn into_product(self, id: &str) -> Result<Product<'static>, FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;

        Ok(Product {
            id: id.to_string(),
            name: self.name,
            brand: self.brand,
            price: Money::from_minor(minor_units, currency),
            rating: self.rating,
            expiration_days: self.expiration_days,
            coupon_eligible: self.coupon_eligible,
            on_sale: self.on_sale,
            snap_eligible: self.snap_eligible,
        })
    }
}

/// Parse a price string (e.g., "1.25 USD") into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code is
/// not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
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

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = iso::find(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency((*currency_code).to_string()))?;

    Ok((minor_units, currency))
}
