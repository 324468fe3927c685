//! Catalog
//!
//! The read-only configuration object holding every product and coupon
//! definition. Built once at startup by the catalog provider (see
//! [`crate::fixtures`]) and injected into carts by reference, never held as
//! process-wide state.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    coupons::{Coupon, CouponDiscount},
    products::{Product, ProductKey},
};

/// Errors raised while seeding a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product with the same id was already added.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A coupon with the same code was already added.
    #[error("Duplicate coupon code: {0}")]
    DuplicateCoupon(String),

    /// A price's currency differs from the catalog currency.
    #[error("Currency mismatch: expected {expected}, found {actual}")]
    CurrencyMismatch {
        /// Catalog currency code
        expected: &'static str,
        /// Offending currency code
        actual: &'static str,
    },
}

/// Immutable product and coupon definitions for a storefront.
///
/// All prices share a single currency, fixed when the first priced entry is
/// added. Products are keyed by generational [`ProductKey`] with a
/// string-id index for lookups; coupons keep their load order for display.
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    product_ids: FxHashMap<String, ProductKey>,
    coupons: Vec<Coupon<'a>>,
    coupon_codes: FxHashMap<String, usize>,
    currency: Option<&'a Currency>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, returning its key.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the product id is already present or
    /// its price currency differs from the catalog currency.
    pub fn add_product(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        if self.product_ids.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        self.check_currency(product.price.currency())?;

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.product_ids.insert(id, key);

        Ok(key)
    }

    /// Add a coupon definition.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the coupon code is already present or a
    /// fixed discount's currency differs from the catalog currency.
    pub fn add_coupon(&mut self, coupon: Coupon<'a>) -> Result<(), CatalogError> {
        if self.coupon_codes.contains_key(&coupon.code) {
            return Err(CatalogError::DuplicateCoupon(coupon.code));
        }

        if let CouponDiscount::Fixed(amount) = &coupon.discount {
            self.check_currency(amount.currency())?;
        }

        self.coupon_codes
            .insert(coupon.code.clone(), self.coupons.len());

        self.coupons.push(coupon);

        Ok(())
    }

    /// Look up a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Look up a product key by string id.
    pub fn key_for_id(&self, id: &str) -> Option<ProductKey> {
        self.product_ids.get(id).copied()
    }

    /// Look up a product by string id.
    pub fn product_by_id(&self, id: &str) -> Option<&Product<'a>> {
        self.key_for_id(id).and_then(|key| self.products.get(key))
    }

    /// Iterate over all products.
    pub fn products(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.products.iter()
    }

    /// All coupon definitions, in load order.
    pub fn coupons(&self) -> &[Coupon<'a>] {
        &self.coupons
    }

    /// Look up a coupon by code.
    pub fn coupon(&self, code: &str) -> Option<&Coupon<'a>> {
        self.coupon_codes
            .get(code)
            .and_then(|idx| self.coupons.get(*idx))
    }

    /// The catalog currency, if any priced entry has been added.
    pub fn currency(&self) -> Option<&'a Currency> {
        self.currency
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn check_currency(&mut self, currency: &'a Currency) -> Result<(), CatalogError> {
        match self.currency {
            Some(existing) if existing != currency => Err(CatalogError::CurrencyMismatch {
                expected: existing.iso_alpha_code,
                actual: currency.iso_alpha_code,
            }),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);
                Ok(())
            }
        }
    }
}
