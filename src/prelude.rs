//! SpendWise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, LineItem},
    catalog::{Catalog, CatalogError},
    coupons::{Coupon, CouponDiscount, CouponScope},
    fixtures::{Fixture, FixtureError},
    pricing::PricingError,
    products::{Product, ProductKey},
    receipt::{Receipt, ReceiptError},
    suggestions::{
        RepeatOrderQuery, RepeatOrderSuggestion, SuggestionError, SuggestionService,
        accept_repeat_order, fetch_repeat_order_suggestion,
    },
    tags::TagSet,
};
