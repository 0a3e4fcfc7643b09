//! Cart aggregate implementation.

use catalog::{Money, Product, ProductId};
use common::Version;
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;

use super::{CartEvent, CartLine, CartRejection, events::QuantityChangedData};

/// Cart aggregate root.
///
/// Holds one line per product identity, in the order the products were first
/// added. Decision methods never mutate; they return the events a request
/// would cause, or the reason it is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Current version (number of applied events).
    #[serde(default)]
    version: Version,

    /// Lines in insertion order.
    lines: Vec<CartLine>,
}

impl Aggregate for Cart {
    type Event = CartEvent;
    type Error = CartRejection;

    fn aggregate_type() -> &'static str {
        "Cart"
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            CartEvent::ItemAdded(data) => self.lines.push(CartLine::new(data.product)),
            CartEvent::QuantityIncremented(data) | CartEvent::QuantityDecremented(data) => {
                self.apply_quantity_changed(data)
            }
            CartEvent::ItemRemoved(data) => {
                self.lines.retain(|line| line.product_id() != &data.product_id)
            }
            CartEvent::CartCleared(_) => self.lines.clear(),
        }
    }
}

// Query methods
impl Cart {
    /// Returns all lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for a product, if any.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    /// Returns true if the product has a line in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the sum of all line quantities.
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity()))
    }

    /// Returns the sum of `price * quantity` over all lines.
    ///
    /// Derived on every call, never stored. Saturates instead of wrapping
    /// when the lines add up past the money range.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// Decision methods (return events)
impl Cart {
    /// Adds a product, or bumps its quantity if a line already exists.
    ///
    /// Never rejected.
    pub fn add_to_cart(&self, product: &Product) -> Result<Vec<CartEvent>, CartRejection> {
        match self.line(product.id()) {
            Some(existing) => Ok(vec![CartEvent::quantity_incremented(
                product.id().clone(),
                existing.quantity(),
            )]),
            None => Ok(vec![CartEvent::item_added(product)]),
        }
    }

    /// Increments an existing line by one.
    pub fn increment_quantity(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<CartEvent>, CartRejection> {
        let existing = self.require_line(product_id)?;
        Ok(vec![CartEvent::quantity_incremented(
            product_id.clone(),
            existing.quantity(),
        )])
    }

    /// Decrements an existing line by one, never below 1.
    pub fn decrement_quantity(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<CartEvent>, CartRejection> {
        let existing = self.require_line(product_id)?;
        if existing.quantity() <= 1 {
            return Err(CartRejection::QuantityAtFloor {
                product_id: product_id.clone(),
            });
        }

        Ok(vec![CartEvent::quantity_decremented(
            product_id.clone(),
            existing.quantity(),
        )])
    }

    /// Removes a line regardless of its quantity.
    pub fn remove_from_cart(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<CartEvent>, CartRejection> {
        let existing = self.require_line(product_id)?;
        Ok(vec![CartEvent::item_removed(
            product_id.clone(),
            existing.quantity(),
        )])
    }

    /// Removes every line.
    pub fn clear_cart(&self) -> Result<Vec<CartEvent>, CartRejection> {
        if self.is_empty() {
            return Err(CartRejection::CartEmpty);
        }

        Ok(vec![CartEvent::cart_cleared(self.lines.len())])
    }

    fn require_line(&self, product_id: &ProductId) -> Result<&CartLine, CartRejection> {
        self.line(product_id)
            .ok_or_else(|| CartRejection::LineNotFound {
                product_id: product_id.clone(),
            })
    }
}

// Apply event helpers
impl Cart {
    fn apply_quantity_changed(&mut self, data: QuantityChangedData) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == &data.product_id)
        {
            line.set_quantity(data.new_quantity);
        }
    }
}
