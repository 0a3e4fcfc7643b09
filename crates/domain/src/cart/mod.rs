//! Shopping cart aggregate and store.

mod aggregate;
mod events;
mod line;
mod store;

pub use aggregate::Cart;
pub use events::{
    CartClearedData, CartEvent, ItemAddedData, ItemRemovedData, QuantityChangedData,
};
pub use line::CartLine;
pub use store::{CartStore, Outcome};

use catalog::ProductId;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

/// Why a cart request was turned down without changing the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartRejection {
    /// No line exists for the product.
    #[error("No cart line for product {product_id}")]
    LineNotFound { product_id: ProductId },

    /// Decrement would take the quantity below 1.
    #[error("Quantity of {product_id} is already at the minimum of 1")]
    QuantityAtFloor { product_id: ProductId },

    /// Nothing to clear.
    #[error("Cart is empty")]
    CartEmpty,
}

impl CartRejection {
    /// Stable machine-readable code for the rejection.
    pub fn code(&self) -> &'static str {
        match self {
            CartRejection::LineNotFound { .. } => "line_not_found",
            CartRejection::QuantityAtFloor { .. } => "quantity_at_floor",
            CartRejection::CartEmpty => "cart_empty",
        }
    }
}

impl Serialize for CartRejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut reason = serializer.serialize_struct("CartRejection", 2)?;
        reason.serialize_field("code", self.code())?;
        reason.serialize_field("message", &self.to_string())?;
        reason.end()
    }
}
