//! Cart store: the owned, mutable cart of a session.

use catalog::{Money, Product, ProductId};
use common::Version;
use serde::Serialize;

use crate::aggregate::{Aggregate, DomainEvent};

use super::{Cart, CartEvent, CartLine, CartRejection};

/// Result of a cart request.
///
/// Rejections leave the cart exactly as it was.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The request changed the cart.
    Applied,

    /// The request was a no-op for the given reason.
    Rejected(CartRejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    /// Returns the rejection reason, if any.
    pub fn rejection(&self) -> Option<&CartRejection> {
        match self {
            Outcome::Applied => None,
            Outcome::Rejected(reason) => Some(reason),
        }
    }
}

/// Owns a [`Cart`] and applies the events its decisions produce.
///
/// Every mutation is synchronous and either fully applies or is rejected.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Cart,
}

impl CartStore {
    /// Creates an empty cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product or bumps its quantity. Always applied.
    pub fn add_to_cart(&mut self, product: &Product) -> Outcome {
        let decision = self.cart.add_to_cart(product);
        self.execute(decision)
    }

    /// Increments a line's quantity by one.
    pub fn increment_quantity(&mut self, product_id: &ProductId) -> Outcome {
        let decision = self.cart.increment_quantity(product_id);
        self.execute(decision)
    }

    /// Decrements a line's quantity by one, stopping at 1.
    pub fn decrement_quantity(&mut self, product_id: &ProductId) -> Outcome {
        let decision = self.cart.decrement_quantity(product_id);
        self.execute(decision)
    }

    /// Deletes a line regardless of quantity.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Outcome {
        let decision = self.cart.remove_from_cart(product_id);
        self.execute(decision)
    }

    /// Deletes every line.
    pub fn clear_cart(&mut self) -> Outcome {
        let decision = self.cart.clear_cart();
        self.execute(decision)
    }

    /// Returns the sum of `price * quantity` over all lines.
    pub fn compute_total(&self) -> Money {
        self.cart.total()
    }

    /// Returns the underlying cart for read access.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn version(&self) -> Version {
        self.cart.version()
    }

    fn execute(&mut self, decision: Result<Vec<CartEvent>, CartRejection>) -> Outcome {
        match decision {
            Ok(events) => {
                for event in events {
                    let event_type = event.event_type();
                    self.cart.apply(event);
                    self.cart.set_version(self.cart.version().next());
                    metrics::counter!("cart_events_total", "event" => event_type).increment(1);
                    tracing::debug!(
                        event = event_type,
                        version = %self.cart.version(),
                        lines = self.cart.line_count(),
                        "cart event applied"
                    );
                }
                Outcome::Applied
            }
            Err(reason) => {
                metrics::counter!("cart_rejections_total", "reason" => reason.code()).increment(1);
                tracing::debug!(%reason, "cart request rejected");
                Outcome::Rejected(reason)
            }
        }
    }
}
