//! Cart lines.

use catalog::{Money, Product, ProductId};
use serde::{Deserialize, Serialize};

/// A product-quantity pairing inside the cart.
///
/// The quantity is always at least 1; a line with nothing left in it is
/// removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    pub(crate) fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity >= 1, "cart line quantity must stay at least 1");
        self.quantity = quantity;
    }

    /// Returns the product snapshot taken when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> &ProductId {
        self.product.id()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns `price * quantity` for this line.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply(self.quantity)
    }
}
