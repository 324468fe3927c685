//! SpendWise
//!
//! SpendWise is a grocery cart pricing engine: a product catalog, a cart with
//! stacking coupon discounts and a save-for-later list, coupon offerability
//! filtering, and a seam for an external repeat-order suggestion service.

pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod suggestions;
pub mod tags;
pub mod utils;
