//! Cart
//!
//! The mutable per-session cart: active line items, a saved-for-later list,
//! and the applied coupon set. Every state transition is total: unknown
//! products or codes are silent no-ops, and an update that would drive a
//! quantity to zero removes the line instead. Derived values (subtotal,
//! discount, total) are recomputed from current state on demand.

use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::Catalog,
    coupons::Coupon,
    pricing::{self, PricingError},
    products::ProductKey,
    receipt::Receipt,
};

/// A product/quantity pair in the cart or the saved-for-later list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    product: ProductKey,
    quantity: u32,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub fn new(product: ProductKey, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The product this line refers to.
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Units of the product in this line. Always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A shopping cart bound to a read-only catalog.
///
/// Created empty at session start and mutated only through the transition
/// methods below. At most one line per product exists in each list, and
/// `applied_coupons` never holds two coupons with the same code.
#[derive(Debug)]
pub struct Cart<'a> {
    catalog: &'a Catalog<'a>,
    currency: &'static Currency,
    items: Vec<LineItem>,
    saved_for_later: Vec<LineItem>,
    applied_coupons: Vec<Coupon<'a>>,
}

impl<'a> Cart<'a> {
    /// Create an empty cart over the given catalog.
    #[must_use]
    pub fn new(catalog: &'a Catalog<'a>, currency: &'static Currency) -> Self {
        Self {
            catalog,
            currency,
            items: Vec::new(),
            saved_for_later: Vec::new(),
            applied_coupons: Vec::new(),
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the quantity if the product is already in the cart,
    /// otherwise appends a new line with quantity 1. Products the catalog
    /// does not know are ignored.
    pub fn add(&mut self, product: ProductKey) {
        if self.catalog.product(product).is_none() {
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|line| line.product == product) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem::new(product, 1));
        }
    }

    /// Add one unit of a product by its string id. Unknown ids are ignored.
    pub fn add_by_id(&mut self, id: &str) {
        if let Some(key) = self.catalog.key_for_id(id) {
            self.add(key);
        }
    }

    /// Remove a product's line from the cart entirely.
    pub fn remove(&mut self, product: ProductKey) {
        self.items.retain(|line| line.product != product);
    }

    /// Set the quantity of a product's line.
    ///
    /// A quantity of 0 removes the line; updates to products not in the
    /// cart are ignored.
    pub fn set_quantity(&mut self, product: ProductKey, quantity: u32) {
        if quantity == 0 {
            self.remove(product);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|line| line.product == product) {
            line.quantity = quantity;
        }
    }

    /// Move a product's line from the cart to the saved-for-later list.
    ///
    /// Quantities merge if the product was already saved. No-op if the
    /// product is not in the cart.
    pub fn save_for_later(&mut self, product: ProductKey) {
        if let Some(line) = take_line(&mut self.items, product) {
            merge_line(&mut self.saved_for_later, line);
        }
    }

    /// Move a product's line from the saved-for-later list back to the cart
    /// with its original quantity.
    ///
    /// Quantities merge if the product is already in the cart. No-op if the
    /// product is not saved.
    pub fn move_to_cart(&mut self, product: ProductKey) {
        if let Some(line) = take_line(&mut self.saved_for_later, product) {
            merge_line(&mut self.items, line);
        }
    }

    /// Remove a product's line from the saved-for-later list.
    pub fn remove_saved(&mut self, product: ProductKey) {
        self.saved_for_later.retain(|line| line.product != product);
    }

    /// Apply the coupon if it is not applied, remove it if it is.
    ///
    /// Identity is the coupon code. Applying never checks offerability: a
    /// coupon whose matching items are later removed stays applied and
    /// simply contributes a zero discount.
    pub fn toggle_coupon(&mut self, coupon: &Coupon<'a>) {
        if let Some(pos) = self
            .applied_coupons
            .iter()
            .position(|applied| applied.code == coupon.code)
        {
            self.applied_coupons.remove(pos);
        } else {
            self.applied_coupons.push(coupon.clone());
        }
    }

    /// Empty the cart and clear applied coupons.
    ///
    /// The saved-for-later list is untouched.
    pub fn clear(&mut self) {
        self.items.clear();
        self.applied_coupons.clear();
    }

    /// Compute the final receipt and reset the cart, as the checkout
    /// surface does on order placement.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the receipt cannot be computed; the
    /// cart is left unchanged in that case.
    pub fn place_order(&mut self) -> Result<Receipt<'a>, PricingError> {
        let receipt = self.receipt()?;

        self.clear();

        Ok(receipt)
    }

    /// Active line items, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Saved-for-later line items, in insertion order.
    pub fn saved_for_later(&self) -> &[LineItem] {
        &self.saved_for_later
    }

    /// Applied coupons, in application order.
    pub fn applied_coupons(&self) -> &[Coupon<'a>] {
        &self.applied_coupons
    }

    /// Coupons from the catalog worth offering for this cart: generic
    /// coupons, plus scoped coupons matching at least one active line.
    pub fn offerable_coupons(&self) -> Vec<&'a Coupon<'a>> {
        self.catalog
            .coupons()
            .iter()
            .filter(|coupon| self.is_offerable(coupon))
            .collect()
    }

    /// The catalog this cart prices against.
    pub fn catalog(&self) -> &'a Catalog<'a> {
        self.catalog
    }

    /// The cart currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of active lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no active lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all active lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of unit price × quantity over the active lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line cannot be priced.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor = pricing::subtotal_minor(self.catalog, &self.items)?;

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Combined discount of all applied coupons.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a per-coupon discount cannot be
    /// computed.
    pub fn discount(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor = pricing::discount_minor(self.catalog, &self.items, &self.applied_coupons)?;

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Grand total: `max(0, subtotal - discount)`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the subtotal or discount cannot be
    /// computed.
    pub fn total(&self) -> Result<Money<'a, Currency>, PricingError> {
        let subtotal = pricing::subtotal_minor(self.catalog, &self.items)?;
        let discount = pricing::discount_minor(self.catalog, &self.items, &self.applied_coupons)?;

        Ok(Money::from_minor(
            pricing::total_minor(subtotal, discount),
            self.currency,
        ))
    }

    /// Build a receipt snapshot of the current totals.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the totals cannot be computed.
    pub fn receipt(&self) -> Result<Receipt<'a>, PricingError> {
        Receipt::from_cart(self)
    }

    fn is_offerable(&self, coupon: &Coupon<'_>) -> bool {
        if coupon.scope.is_generic() {
            return true;
        }

        self.items.iter().any(|line| {
            self.catalog
                .product(line.product)
                .is_some_and(|product| coupon.scope.matches(product))
        })
    }
}

/// Remove and return the line for a product, if present.
fn take_line(lines: &mut Vec<LineItem>, product: ProductKey) -> Option<LineItem> {
    let pos = lines.iter().position(|line| line.product == product)?;

    Some(lines.remove(pos))
}

/// Append a line, merging quantities when the product already has one.
fn merge_line(lines: &mut Vec<LineItem>, incoming: LineItem) {
    if let Some(line) = lines
        .iter_mut()
        .find(|line| line.product == incoming.product)
    {
        line.quantity = line.quantity.saturating_add(incoming.quantity);
    } else {
        lines.push(incoming);
    }
}
