//! Integration tests for complete shopping sessions over the bundled
//! fixture set.
//!
//! The `spendwise` fixtures ship six products and three coupons:
//!
//! - SAVE10: 10% off the whole cart
//! - FRESHFRUIT: $5.00 off SunHarvest and GreenLeaf produce
//! - FARMFIVE: $5.00 off FarmCo products
//!
//! Each test walks a realistic session end to end: load the catalog, mutate
//! the cart, apply coupons and check the priced outcome in minor units.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use spendwise::{
    fixtures::Fixture,
    suggestions::{
        RepeatOrderQuery, RepeatOrderSuggestion, SuggestionError, SuggestionService,
        accept_repeat_order, fetch_repeat_order_suggestion,
    },
};

/// Service stub that always suggests repeating the order.
struct AlwaysSuggest;

impl SuggestionService for AlwaysSuggest {
    fn suggest_repeat_order(
        &self,
        _query: &RepeatOrderQuery,
    ) -> Result<RepeatOrderSuggestion, SuggestionError> {
        Ok(RepeatOrderSuggestion {
            should_suggest: true,
            reason: None,
        })
    }
}

/// Service stub that always fails.
struct AlwaysFail;

impl SuggestionService for AlwaysFail {
    fn suggest_repeat_order(
        &self,
        _query: &RepeatOrderQuery,
    ) -> Result<RepeatOrderSuggestion, SuggestionError> {
        Err(SuggestionError::Unavailable("connection refused".to_string()))
    }
}

#[test]
fn coupons_stack_against_the_full_applicable_base() -> TestResult {
    let fixture = Fixture::from_set("spendwise")?;
    let mut cart = fixture.cart()?;

    // Chicken Breast: 8.75 USD, FarmCo.
    cart.add_by_id("prod_5");

    let save_ten = fixture.catalog().coupon("SAVE10").expect("coupon in catalog");
    let farm_five = fixture.catalog().coupon("FARMFIVE").expect("coupon in catalog");

    cart.toggle_coupon(save_ten);
    cart.toggle_coupon(farm_five);

    // Each coupon discounts the full base: 10% of 875 is 88 (rounded), plus
    // the flat 500. Never 10% of an already-discounted amount.
    assert_eq!(cart.subtotal()?, Money::from_minor(875, USD));
    assert_eq!(cart.discount()?, Money::from_minor(588, USD));
    assert_eq!(cart.total()?, Money::from_minor(287, USD));

    Ok(())
}

#[test]
fn fixed_coupon_is_capped_at_its_applicable_base() -> TestResult {
    let fixture = Fixture::from_set("spendwise")?;
    let mut cart = fixture.cart()?;

    // Organic Bananas: 1.25 USD, SunHarvest. FRESHFRUIT is worth 5.00 but
    // only 1.25 of the cart matches it.
    cart.add_by_id("prod_1");

    let fresh_fruit = fixture
        .catalog()
        .coupon("FRESHFRUIT")
        .expect("coupon in catalog");

    cart.toggle_coupon(fresh_fruit);

    assert_eq!(cart.discount()?, Money::from_minor(125, USD));
    assert_eq!(cart.total()?, Money::from_minor(0, USD));

    Ok(())
}

#[test]
fn total_is_clamped_at_zero_when_discounts_exceed_the_subtotal() -> TestResult {
    let fixture = Fixture::from_set("spendwise")?;
    let mut cart = fixture.cart()?;

    cart.add_by_id("prod_1");

    let save_ten = fixture.catalog().coupon("SAVE10").expect("coupon in catalog");
    let fresh_fruit = fixture
        .catalog()
        .coupon("FRESHFRUIT")
        .expect("coupon in catalog");

    cart.toggle_coupon(save_ten);
    cart.toggle_coupon(fresh_fruit);

    // 13 (10% of 125, rounded) + 125 (capped) exceeds the 125 subtotal.
    assert_eq!(cart.subtotal()?, Money::from_minor(125, USD));
    assert_eq!(cart.discount()?, Money::from_minor(138, USD));
    assert_eq!(cart.total()?, Money::from_minor(0, USD));

    Ok(())
}

#[test]
fn scoped_coupons_are_only_offered_when_an_item_matches() -> TestResult {
    let fixture = Fixture::from_set("spendwise")?;
    let mut cart = fixture.cart()?;

    // Catalog order follows the fixture map, so compare sorted codes.
    let codes = |cart: &spendwise::cart::Cart<'_>| -> Vec<String> {
        let mut codes: Vec<String> = cart
            .offerable_coupons()
            .iter()
            .map(|coupon| coupon.code.clone())
            .collect();
        codes.sort_unstable();
        codes
    };

    // Empty cart: only the generic coupon.
    assert_eq!(codes(&cart), vec!["SAVE10"]);

    // Romaine Lettuce is GreenLeaf, so FRESHFRUIT becomes offerable.
    cart.add_by_id("prod_6");
    assert_eq!(codes(&cart), vec!["FRESHFRUIT", "SAVE10"]);

    // Chicken Breast brings FARMFIVE in as well.
    cart.add_by_id("prod_5");
    assert_eq!(codes(&cart), vec!["FARMFIVE", "FRESHFRUIT", "SAVE10"]);

    // Removing the lettuce drops FRESHFRUIT again.
    let lettuce = fixture
        .catalog()
        .key_for_id("prod_6")
        .expect("product in catalog");
    cart.remove(lettuce);
    assert_eq!(codes(&cart), vec!["FARMFIVE", "SAVE10"]);

    Ok(())
}

#[test]
fn repeat_order_flow_fills_the_cart_from_history() -> TestResult {
    let fixture = Fixture::from_set("spendwise")?;
    let mut cart = fixture.cart()?;

    let query = RepeatOrderQuery::new("guest-user-123", fixture.previous_order().to_vec());
    let suggestion = fetch_repeat_order_suggestion(&AlwaysSuggest, &query);

    assert!(suggestion.should_suggest);

    accept_repeat_order(&mut cart, fixture.previous_order());

    // Whole Milk (3.50) and Sourdough Bread (4.99), one unit each.
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.subtotal()?, Money::from_minor(849, USD));

    Ok(())
}

#[test]
fn failing_suggestion_service_does_not_break_the_session() -> TestResult {
    let fixture = Fixture::from_set("spendwise")?;
    let mut cart = fixture.cart()?;

    let query = RepeatOrderQuery::new("guest-user-123", fixture.previous_order().to_vec());
    let suggestion = fetch_repeat_order_suggestion(&AlwaysFail, &query);

    // The outage is absorbed; the shopper just gets no suggestion.
    assert!(!suggestion.should_suggest);

    cart.add_by_id("prod_2");

    assert_eq!(cart.subtotal()?, Money::from_minor(350, USD));

    Ok(())
}

#[test]
fn save_for_later_keeps_items_out_of_the_totals() -> TestResult {
    let fixture = Fixture::from_set("spendwise")?;
    let mut cart = fixture.cart()?;

    cart.add_by_id("prod_2");
    cart.add_by_id("prod_3");

    let milk = fixture
        .catalog()
        .key_for_id("prod_2")
        .expect("product in catalog");

    cart.save_for_later(milk);

    assert_eq!(cart.subtotal()?, Money::from_minor(499, USD));
    assert_eq!(cart.saved_for_later().len(), 1);

    cart.move_to_cart(milk);

    assert_eq!(cart.subtotal()?, Money::from_minor(849, USD));
    assert!(cart.saved_for_later().is_empty());

    Ok(())
}

#[test]
fn placing_an_order_produces_a_receipt_and_an_empty_cart() -> TestResult {
    let fixture = Fixture::from_set("spendwise")?;
    let mut cart = fixture.cart()?;

    cart.add_by_id("prod_2");
    cart.add_by_id("prod_4");

    let save_ten = fixture.catalog().coupon("SAVE10").expect("coupon in catalog");
    cart.toggle_coupon(save_ten);

    let milk = fixture
        .catalog()
        .key_for_id("prod_2")
        .expect("product in catalog");
    cart.save_for_later(milk);

    let receipt = cart.place_order()?;

    // Only the apples (2.99) were checked out; 10% off is 30 minor units.
    assert_eq!(receipt.subtotal(), Money::from_minor(299, USD));
    assert_eq!(receipt.discount(), Money::from_minor(30, USD));
    assert_eq!(receipt.total(), Money::from_minor(269, USD));

    assert!(cart.is_empty());
    assert!(cart.applied_coupons().is_empty());
    assert_eq!(cart.saved_for_later().len(), 1);

    let mut rendered = Vec::new();
    receipt.write_to(&mut rendered, &cart)?;

    let rendered = String::from_utf8(rendered)?;
    assert!(rendered.contains("Subtotal"));

    Ok(())
}
