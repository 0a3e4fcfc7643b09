//! Checkout error types.

use catalog::ProductId;
use thiserror::Error;

use crate::state::CheckoutState;

/// Errors that can occur while driving a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Another checkout attempt is still pending.
    #[error("A checkout is already in progress (state: {state})")]
    AlreadyInProgress { state: CheckoutState },

    /// Details were submitted while nothing was waiting for them.
    #[error("Checkout is not collecting delivery details (state: {state})")]
    NotCollectingDetails { state: CheckoutState },

    /// Cancel was requested with no pending attempt.
    #[error("No checkout in progress")]
    NoCheckoutInProgress,

    /// Buy-now was asked for zero units.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// Buy-now of a cart line named a product that is not in the cart.
    #[error("Product not in cart: {product_id}")]
    LineNotInCart { product_id: ProductId },

    /// The selection's total does not fit in the money range.
    #[error("Checkout total is too large")]
    TotalOverflow,
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
