//! Purchase records.

use catalog::{Money, Product, ProductId};
use chrono::{DateTime, Utc};
use common::{CheckoutId, Version};
use serde::Serialize;

use crate::cart::CartLine;

use super::DeliveryDetails;

/// One product selected for purchase, with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseItem {
    pub product: Product,
    pub quantity: u32,
}

impl PurchaseItem {
    /// Creates a purchase item for a single unit of a product.
    pub fn single(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Returns `price * quantity`.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply(self.quantity)
    }
}

impl From<&CartLine> for PurchaseItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product: line.product().clone(),
            quantity: line.quantity(),
        }
    }
}

/// An entry in the purchase log.
///
/// Immutable once written. Its identity is its 1-based position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseRecord {
    sequence: Version,
    checkout_id: CheckoutId,
    product: Product,
    quantity: u32,
    delivery: DeliveryDetails,
    purchased_at: DateTime<Utc>,
}

impl PurchaseRecord {
    pub(crate) fn new(
        sequence: Version,
        checkout_id: CheckoutId,
        item: PurchaseItem,
        delivery: DeliveryDetails,
        purchased_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sequence,
            checkout_id,
            product: item.product,
            quantity: item.quantity,
            delivery,
            purchased_at,
        }
    }

    /// Position in the log, starting at 1.
    pub fn sequence(&self) -> Version {
        self.sequence
    }

    /// The checkout that produced this record.
    pub fn checkout_id(&self) -> CheckoutId {
        self.checkout_id
    }

    /// Snapshot of the product at purchase time.
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> &ProductId {
        self.product.id()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn delivery(&self) -> &DeliveryDetails {
        &self.delivery
    }

    pub fn purchased_at(&self) -> DateTime<Utc> {
        self.purchased_at
    }

    /// Returns `price * quantity` at purchase time.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply(self.quantity)
    }
}
