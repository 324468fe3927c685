//! Pricing
//!
//! Derived-value computations over cart lines: subtotal, per-coupon
//! applicable base and discount, and the clamped grand total. Everything is
//! a pure function of the current lines and applied coupons; nothing is
//! memoized. All arithmetic happens in minor units (cents) with decimal
//! rounding for percentages.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive, prelude::ToPrimitive};
use thiserror::Error;

use crate::{
    cart::LineItem,
    catalog::Catalog,
    coupons::{Coupon, CouponDiscount},
};

/// Errors that can occur while computing cart totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A cart line references a product the catalog does not contain.
    #[error("Cart line references a product missing from the catalog")]
    MissingProduct,

    /// A line total or running sum overflowed the minor-unit range.
    #[error("Amount overflowed minor-unit arithmetic")]
    AmountOverflow,

    /// Percentage calculation overflowed or was not finite.
    #[error("Percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Calculate a percentage of an amount in minor units, rounding midpoint
/// away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows
/// the decimal range or cannot be represented as an `i64`.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// The value of a single line in minor units: unit price × quantity.
///
/// # Errors
///
/// Returns a [`PricingError`] if the product is missing from the catalog or
/// the multiplication overflows.
pub fn line_total_minor(catalog: &Catalog<'_>, line: &LineItem) -> Result<i64, PricingError> {
    let product = catalog
        .product(line.product())
        .ok_or(PricingError::MissingProduct)?;

    product
        .price
        .to_minor_units()
        .checked_mul(i64::from(line.quantity()))
        .ok_or(PricingError::AmountOverflow)
}

/// Subtotal of the given lines in minor units.
///
/// # Errors
///
/// Returns a [`PricingError`] if any line total cannot be computed or the
/// running sum overflows.
pub fn subtotal_minor(catalog: &Catalog<'_>, lines: &[LineItem]) -> Result<i64, PricingError> {
    lines.iter().try_fold(0i64, |acc, line| {
        acc.checked_add(line_total_minor(catalog, line)?)
            .ok_or(PricingError::AmountOverflow)
    })
}

/// The portion of cart value a coupon's discount is computed against.
///
/// Generic coupons use the full subtotal. Scoped coupons sum only the lines
/// whose product matches the coupon's brand or item-name sets; every other
/// line contributes zero, regardless of what other coupons are applied.
///
/// # Errors
///
/// Returns a [`PricingError`] if any line total cannot be computed or the
/// running sum overflows.
pub fn applicable_base_minor(
    catalog: &Catalog<'_>,
    lines: &[LineItem],
    coupon: &Coupon<'_>,
) -> Result<i64, PricingError> {
    if coupon.scope.is_generic() {
        return subtotal_minor(catalog, lines);
    }

    lines.iter().try_fold(0i64, |acc, line| {
        let product = catalog
            .product(line.product())
            .ok_or(PricingError::MissingProduct)?;

        if !coupon.scope.matches(product) {
            return Ok(acc);
        }

        acc.checked_add(line_total_minor(catalog, line)?)
            .ok_or(PricingError::AmountOverflow)
    })
}

/// A single coupon's discount in minor units.
///
/// Percentage coupons take their fraction of the applicable base; fixed
/// coupons are capped at the base so they never exceed the value of the
/// eligible items.
///
/// # Errors
///
/// Returns a [`PricingError`] if the applicable base or percentage
/// calculation fails.
pub fn coupon_discount_minor(
    catalog: &Catalog<'_>,
    lines: &[LineItem],
    coupon: &Coupon<'_>,
) -> Result<i64, PricingError> {
    let base = applicable_base_minor(catalog, lines, coupon)?;

    match &coupon.discount {
        CouponDiscount::Percentage(percent) => percent_of_minor(percent, base),
        CouponDiscount::Fixed(amount) => Ok(base.min(amount.to_minor_units())),
    }
}

/// Combined discount of all applied coupons in minor units.
///
/// Coupons stack additively: each coupon's base is computed independently
/// against the full cart, never against a running discounted remainder.
///
/// # Errors
///
/// Returns a [`PricingError`] if any per-coupon discount fails or the sum
/// overflows.
pub fn discount_minor(
    catalog: &Catalog<'_>,
    lines: &[LineItem],
    coupons: &[Coupon<'_>],
) -> Result<i64, PricingError> {
    coupons.iter().try_fold(0i64, |acc, coupon| {
        acc.checked_add(coupon_discount_minor(catalog, lines, coupon)?)
            .ok_or(PricingError::AmountOverflow)
    })
}

/// Grand total in minor units, clamped so it is never negative.
#[must_use]
pub fn total_minor(subtotal: i64, discount: i64) -> i64 {
    subtotal.saturating_sub(discount).max(0)
}
