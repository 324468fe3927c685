//! Repeat-Order Suggestions
//!
//! Seam for the external recommendation service that decides whether to
//! offer a one-click "repeat your last order" affordance. The service is an
//! external collaborator; this module only defines the wire types, the
//! trait, and the local-recovery policy: a failing or unavailable service
//! suppresses the suggestion instead of surfacing an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;

/// Errors a suggestion service implementation can report.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// The service could not be reached or returned an invalid response.
    #[error("Suggestion service unavailable: {0}")]
    Unavailable(String),
}

/// Query sent to the suggestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatOrderQuery {
    /// Id of the user the purchase history belongs to.
    pub user_id: String,

    /// Whether the user has a previous order at all.
    pub has_previous_order: bool,

    /// Product ids from the previous order, in order.
    pub previous_order_items: Vec<String>,
}

impl RepeatOrderQuery {
    /// Build a query from a user id and their previous order, if any.
    pub fn new(user_id: impl Into<String>, previous_order_items: Vec<String>) -> Self {
        Self {
            user_id: user_id.into(),
            has_previous_order: !previous_order_items.is_empty(),
            previous_order_items,
        }
    }
}

/// The service's verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatOrderSuggestion {
    /// Whether to surface the repeat-order affordance.
    pub should_suggest: bool,

    /// Optional human-readable reason for the verdict.
    pub reason: Option<String>,
}

impl RepeatOrderSuggestion {
    /// A suppressed suggestion with the given reason.
    pub fn suppressed(reason: impl Into<String>) -> Self {
        Self {
            should_suggest: false,
            reason: Some(reason.into()),
        }
    }
}

/// A remote text-generation service asked whether to suggest repeating the
/// previous order.
pub trait SuggestionService {
    /// Ask the service for a verdict on the given purchase history.
    ///
    /// # Errors
    ///
    /// Returns a [`SuggestionError`] if the service is unavailable or
    /// responds with something unusable.
    fn suggest_repeat_order(
        &self,
        query: &RepeatOrderQuery,
    ) -> Result<RepeatOrderSuggestion, SuggestionError>;
}

/// Fetch a repeat-order suggestion, never failing.
///
/// Users without a previous order are handled locally, without calling the
/// service. A service error is converted into a suppressed suggestion so no
/// error ever reaches the cart or the checkout surface.
pub fn fetch_repeat_order_suggestion(
    service: &impl SuggestionService,
    query: &RepeatOrderQuery,
) -> RepeatOrderSuggestion {
    if !query.has_previous_order {
        return RepeatOrderSuggestion::suppressed("The user does not have a previous order.");
    }

    match service.suggest_repeat_order(query) {
        Ok(suggestion) => suggestion,
        Err(_err) => {
            RepeatOrderSuggestion::suppressed("An error occurred while fetching the suggestion.")
        }
    }
}

/// Add every item of the previous order to the cart, one unit each, in
/// list order. Unknown product ids are skipped, like any other add.
pub fn accept_repeat_order(cart: &mut Cart<'_>, previous_order_items: &[String]) {
    for id in previous_order_items {
        cart.add_by_id(id);
    }
}
