//! Cart domain events.

use catalog::{Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

/// Events that can occur on a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    /// A new line was created with quantity 1.
    ItemAdded(ItemAddedData),

    /// A line's quantity went up by one.
    QuantityIncremented(QuantityChangedData),

    /// A line's quantity went down by one.
    QuantityDecremented(QuantityChangedData),

    /// A line was deleted.
    ItemRemoved(ItemRemovedData),

    /// Every line was deleted.
    CartCleared(CartClearedData),
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "ItemAdded",
            CartEvent::QuantityIncremented(_) => "QuantityIncremented",
            CartEvent::QuantityDecremented(_) => "QuantityDecremented",
            CartEvent::ItemRemoved(_) => "ItemRemoved",
            CartEvent::CartCleared(_) => "CartCleared",
        }
    }
}

/// Data for ItemAdded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAddedData {
    /// Snapshot of the product at the time of adding.
    pub product: Product,
}

/// Data for QuantityIncremented and QuantityDecremented events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChangedData {
    pub product_id: ProductId,
    pub old_quantity: u32,
    pub new_quantity: u32,
}

/// Data for ItemRemoved event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemovedData {
    pub product_id: ProductId,

    /// Quantity the line held when it was removed.
    pub quantity: u32,
}

/// Data for CartCleared event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartClearedData {
    /// Number of lines that were removed.
    pub lines_removed: usize,
}

// Convenience constructors for events
impl CartEvent {
    /// Creates an ItemAdded event.
    pub fn item_added(product: &Product) -> Self {
        CartEvent::ItemAdded(ItemAddedData {
            product: product.clone(),
        })
    }

    /// Creates a QuantityIncremented event.
    pub fn quantity_incremented(product_id: ProductId, old_quantity: u32) -> Self {
        CartEvent::QuantityIncremented(QuantityChangedData {
            product_id,
            old_quantity,
            new_quantity: old_quantity + 1,
        })
    }

    /// Creates a QuantityDecremented event.
    pub fn quantity_decremented(product_id: ProductId, old_quantity: u32) -> Self {
        CartEvent::QuantityDecremented(QuantityChangedData {
            product_id,
            old_quantity,
            new_quantity: old_quantity - 1,
        })
    }

    /// Creates an ItemRemoved event.
    pub fn item_removed(product_id: ProductId, quantity: u32) -> Self {
        CartEvent::ItemRemoved(ItemRemovedData {
            product_id,
            quantity,
        })
    }

    /// Creates a CartCleared event.
    pub fn cart_cleared(lines_removed: usize) -> Self {
        CartEvent::CartCleared(CartClearedData { lines_removed })
    }
}
