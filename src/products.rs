//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A catalog product. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Unique product id (e.g. `prod_1`)
    pub id: String,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Star rating, 1-5
    pub rating: f32,

    /// Days until expiration
    pub expiration_days: u32,

    /// Whether the product participates in coupon promotions
    pub coupon_eligible: bool,

    /// Whether the product is currently on sale
    pub on_sale: bool,

    /// Whether the product is SNAP-eligible
    pub snap_eligible: bool,
}
