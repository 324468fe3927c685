//! Receipt
//!
//! Snapshot of a cart's priced totals for the checkout surface, plus a
//! formatted terminal rendering of the line items and applied coupons.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::{self, PricingError},
};

/// Errors that can occur when building or rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Totals could not be computed from the cart.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error while writing the rendered receipt.
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Priced totals for a cart: what the checkout page displays.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Compute a receipt from the cart's current state.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any line or coupon cannot be priced.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, PricingError> {
        let catalog = cart.catalog();
        let currency = cart.currency();

        let subtotal = pricing::subtotal_minor(catalog, cart.items())?;
        let discount = pricing::discount_minor(catalog, cart.items(), cart.applied_coupons())?;
        let total = pricing::total_minor(subtotal, discount);

        Ok(Self {
            subtotal: Money::from_minor(subtotal, currency),
            discount: Money::from_minor(discount, currency),
            total: Money::from_minor(total, currency),
            currency,
        })
    }

    /// Total cost before coupon discounts.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Combined coupon discount.
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Amount payable: `max(0, subtotal - discount)`.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The discount as a fraction of the pre-discount subtotal.
    #[must_use]
    pub fn savings_percent(&self) -> Percentage {
        let discount_minor = self.discount.to_minor_units();
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Percentage::from(0.0);
        }

        let discount_dec = Decimal::from_i64(discount_minor).unwrap_or(Decimal::ZERO);
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);

        Percentage::from(discount_dec / subtotal_dec)
    }

    /// Render the cart's line items, applied coupons and totals as a table.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line cannot be priced or the output
    /// cannot be written.
    pub fn write_to(&self, mut out: impl io::Write, cart: &Cart<'a>) -> Result<(), ReceiptError> {
        let catalog = cart.catalog();
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Item", "Brand", "Unit Price", "Line Total"]);

        for line in cart.items() {
            let product = catalog
                .product(line.product())
                .ok_or(PricingError::MissingProduct)?;

            let line_total = pricing::line_total_minor(catalog, line)?;

            builder.push_record([
                line.quantity().to_string(),
                product.name.clone(),
                product.brand.clone(),
                product.price.to_string(),
                Money::from_minor(line_total, self.currency).to_string(),
            ]);
        }

        let mut table = builder.build();

        table
            .with(Style::sharp())
            .modify(Columns::new(3..), Alignment::right());

        writeln!(out, "{table}")?;

        for coupon in cart.applied_coupons() {
            let discount = pricing::coupon_discount_minor(catalog, cart.items(), coupon)?;

            writeln!(
                out,
                "  {}: -{}",
                coupon.code,
                Money::from_minor(discount, self.currency)
            )?;
        }

        writeln!(out, "  Subtotal: {}", self.subtotal)?;
        writeln!(out, "  Discount: -{}", self.discount)?;
        writeln!(out, "  Total:    {}", self.total)?;

        Ok(())
    }
}
