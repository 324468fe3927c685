//! Order History Fixtures

use serde::Deserialize;

/// Wrapper for a user's previous order in YAML.
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Product ids from the previous order, in order.
    pub previous_order: Vec<String>,
}
