//! Coupons
//!
//! A coupon is a named discount rule: either a percentage of its applicable
//! base or a fixed amount capped at that base, optionally scoped to specific
//! brands or item names.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::{products::Product, tags::TagSet};

/// The discount a coupon grants against its applicable base.
#[derive(Debug, Clone)]
pub enum CouponDiscount<'a> {
    /// A fraction of the applicable base, e.g. `0.10` for 10% off.
    Percentage(Percentage),

    /// A fixed amount, capped at the applicable base so the discount never
    /// exceeds the value of the eligible items.
    Fixed(Money<'a, Currency>),
}

/// Which cart lines a coupon's discount is computed against.
///
/// A scope with both sets empty is *generic* and covers the whole cart.
/// Otherwise a line qualifies when its product name is in `item_names` or
/// its brand is in `brands`.
#[derive(Debug, Clone, Default)]
pub struct CouponScope {
    brands: TagSet,
    item_names: TagSet,
}

impl CouponScope {
    /// Scope covering the entire cart.
    #[must_use]
    pub fn generic() -> Self {
        Self::default()
    }

    /// Scope restricted to the given brand and item-name sets.
    #[must_use]
    pub fn new(brands: TagSet, item_names: TagSet) -> Self {
        Self { brands, item_names }
    }

    /// Scope restricted to the given brands only.
    #[must_use]
    pub fn for_brands(brands: TagSet) -> Self {
        Self {
            brands,
            item_names: TagSet::empty(),
        }
    }

    /// Scope restricted to the given item names only.
    #[must_use]
    pub fn for_item_names(item_names: TagSet) -> Self {
        Self {
            brands: TagSet::empty(),
            item_names,
        }
    }

    /// Whether the scope covers the whole cart.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.brands.is_empty() && self.item_names.is_empty()
    }

    /// Whether a product falls inside the scope.
    ///
    /// Generic scopes match every product; restricted scopes match on item
    /// name or brand.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        if self.is_generic() {
            return true;
        }

        self.item_names.contains(&product.name) || self.brands.contains(&product.brand)
    }

    /// Eligible brand set.
    pub fn brands(&self) -> &TagSet {
        &self.brands
    }

    /// Eligible item-name set.
    pub fn item_names(&self) -> &TagSet {
        &self.item_names
    }
}

/// A coupon definition. The `code` is its identity.
#[derive(Debug, Clone)]
pub struct Coupon<'a> {
    /// Unique coupon code (e.g. `SAVE10`)
    pub code: String,

    /// Display title
    pub title: String,

    /// Display description
    pub description: String,

    /// Discount rule
    pub discount: CouponDiscount<'a>,

    /// Which cart lines the discount applies to
    pub scope: CouponScope,
}

impl<'a> Coupon<'a> {
    /// Create a coupon with the given code, discount and scope.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        discount: CouponDiscount<'a>,
        scope: CouponScope,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
            discount,
            scope,
        }
    }
}
