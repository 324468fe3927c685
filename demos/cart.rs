//! Cart Example
//!
//! This example demonstrates a shopping session: a catalog loaded from
//! fixtures, a repeat-order suggestion, coupon stacking and a receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-n` to specify the quantity added for each item

use std::io;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use spendwise::{
    fixtures::Fixture,
    suggestions::{
        RepeatOrderQuery, RepeatOrderSuggestion, SuggestionError, SuggestionService,
        accept_repeat_order, fetch_repeat_order_suggestion,
    },
    utils::ExampleCartArgs,
};

/// A canned stand-in for the remote suggestion service.
struct CannedService;

impl SuggestionService for CannedService {
    fn suggest_repeat_order(
        &self,
        query: &RepeatOrderQuery,
    ) -> Result<RepeatOrderSuggestion, SuggestionError> {
        Ok(RepeatOrderSuggestion {
            should_suggest: true,
            reason: Some(format!(
                "The user previously ordered {} items.",
                query.previous_order_items.len()
            )),
        })
    }
}

/// Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = ExampleCartArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let mut cart = fixture.cart()?;

    let query = RepeatOrderQuery::new("guest-user-123", fixture.previous_order().to_vec());
    let suggestion = fetch_repeat_order_suggestion(&CannedService, &query);

    if suggestion.should_suggest {
        println!("Suggestion: repeat your last order?");

        accept_repeat_order(&mut cart, fixture.previous_order());
    }

    for (_, product) in fixture.catalog().products() {
        cart.add_by_id(&product.id);
    }

    if let Some(n) = args.n {
        let keys: Vec<_> = cart.items().iter().map(|line| line.product()).collect();

        for key in keys {
            cart.set_quantity(key, n);
        }
    }

    for coupon in cart.offerable_coupons() {
        println!("Offer: {} ({})", coupon.title, coupon.code);
    }

    for code in ["SAVE10", "FARMFIVE"] {
        if let Some(coupon) = fixture.catalog().coupon(code) {
            cart.toggle_coupon(coupon);
        }
    }

    let receipt = cart.receipt()?;

    receipt.write_to(io::stdout(), &cart)?;

    // `savings_percent` is a fraction, so multiply by 100 to print percent points.
    let savings_points = ((receipt.savings_percent() * Decimal::ONE) * Decimal::new(100, 0)).round_dp(2);

    println!("You saved {savings_points}%");

    Ok(())
}
