//! Coupon Fixtures

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    coupons::{Coupon, CouponDiscount, CouponScope},
    fixtures::{FixtureError, products::parse_price},
    tags::TagSet,
};

/// Wrapper for coupons in YAML, keyed by coupon code.
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Map of coupon code -> coupon fixture
    pub coupons: FxHashMap<String, CouponFixture>,
}

/// Coupon Fixture
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Display title
    pub title: String,

    /// Display description
    pub description: String,

    /// Discount type: "percentage" or "fixed"
    #[serde(rename = "type")]
    pub discount_type: String,

    /// Discount value: a fraction for percentage (e.g., "0.10"), a price
    /// string for fixed (e.g., "5.00 USD")
    pub value: String,

    /// Eligible brand names; empty means no brand restriction
    #[serde(default)]
    pub eligible_brands: Vec<String>,

    /// Eligible item names; empty means no item-name restriction
    #[serde(default)]
    pub eligible_item_names: Vec<String>,
}

impl CouponFixture {
    /// Build a [`Coupon`] with the given code.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the discount type is unsupported or
    /// the value cannot be parsed.
    pub fn into_coupon(self, code: &str) -> Result<Coupon<'static>, FixtureError> {
        let discount = match self.discount_type.as_str() {
            "percentage" => CouponDiscount::Percentage(parse_percentage(&self.value)?),
            "fixed" => {
                let (minor_units, currency) = parse_price(&self.value)?;

                CouponDiscount::Fixed(Money::from_minor(minor_units, currency))
            }
            other => return Err(FixtureError::UnsupportedCouponType(other.to_string())),
        };

        let brand_refs: Vec<&str> = self.eligible_brands.iter().map(String::as_str).collect();
        let name_refs: Vec<&str> = self
            .eligible_item_names
            .iter()
            .map(String::as_str)
            .collect();

        let scope = CouponScope::new(TagSet::from_strs(&brand_refs), TagSet::from_strs(&name_refs));

        Ok(Coupon::new(
            code,
            self.title,
            self.description,
            discount,
            scope,
        ))
    }
}

/// Parse a percentage fraction string (e.g., "0.10") into a [`Percentage`].
///
/// # Errors
///
/// Returns a [`FixtureError::InvalidPercentage`] if the string is not a
/// valid decimal fraction.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    Percentage::try_from(s).map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))
}
