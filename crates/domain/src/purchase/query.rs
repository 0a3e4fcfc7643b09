use catalog::ProductId;
use chrono::{DateTime, Utc};
use common::CheckoutId;

use super::PurchaseRecord;

/// Builder for filtering the purchase log.
///
/// Every criterion is optional; an empty query matches all records.
#[derive(Debug, Clone, Default)]
pub struct PurchaseQuery {
    /// Filter by product.
    pub product_id: Option<ProductId>,

    /// Filter by the checkout that wrote the record.
    pub checkout_id: Option<CheckoutId>,

    /// Records purchased at or after this time.
    pub from_timestamp: Option<DateTime<Utc>>,

    /// Records purchased at or before this time.
    pub to_timestamp: Option<DateTime<Utc>>,

    /// Maximum number of records to return.
    pub limit: Option<usize>,
}

impl PurchaseQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for the records of one checkout.
    pub fn for_checkout(checkout_id: CheckoutId) -> Self {
        Self {
            checkout_id: Some(checkout_id),
            ..Default::default()
        }
    }

    pub fn product_id(mut self, product_id: impl Into<ProductId>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn from_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.from_timestamp = Some(timestamp);
        self
    }

    pub fn to_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.to_timestamp = Some(timestamp);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the record satisfies every set criterion.
    pub fn matches(&self, record: &PurchaseRecord) -> bool {
        if let Some(ref product_id) = self.product_id
            && record.product_id() != product_id
        {
            return false;
        }
        if let Some(checkout_id) = self.checkout_id
            && record.checkout_id() != checkout_id
        {
            return false;
        }
        if let Some(from) = self.from_timestamp
            && record.purchased_at() < from
        {
            return false;
        }
        if let Some(to) = self.to_timestamp
            && record.purchased_at() > to
        {
            return false;
        }
        true
    }
}
