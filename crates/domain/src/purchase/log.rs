use chrono::{DateTime, Utc};
use common::{CheckoutId, Version};

use super::{DeliveryDetails, PurchaseItem, PurchaseQuery, PurchaseRecord};

/// Append-only log of completed purchases.
///
/// Records are only ever pushed to the end. There is no update, delete or
/// deduplication; the log lives as long as the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct PurchaseLog {
    records: Vec<PurchaseRecord>,
}

impl PurchaseLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record and returns a copy of it.
    pub fn record_purchase(
        &mut self,
        checkout_id: CheckoutId,
        item: PurchaseItem,
        delivery: &DeliveryDetails,
        purchased_at: DateTime<Utc>,
    ) -> PurchaseRecord {
        let sequence = Version::new(self.records.len() as u64).next();
        tracing::debug!(
            %sequence,
            %checkout_id,
            product_id = %item.product.id(),
            quantity = item.quantity,
            "purchase recorded"
        );
        metrics::counter!("purchases_recorded_total").increment(1);

        let record = PurchaseRecord::new(sequence, checkout_id, item, delivery.clone(), purchased_at);
        self.records.push(record.clone());
        record
    }

    /// Returns every record, oldest first.
    pub fn list_purchases(&self) -> &[PurchaseRecord] {
        &self.records
    }

    /// Returns the record at a 1-based sequence position.
    pub fn get(&self, sequence: Version) -> Option<&PurchaseRecord> {
        let index = usize::try_from(sequence.as_u64()).ok()?.checked_sub(1)?;
        self.records.get(index)
    }

    /// Returns the records written by one checkout, in log order.
    pub fn by_checkout(&self, checkout_id: CheckoutId) -> Vec<&PurchaseRecord> {
        self.query(&PurchaseQuery::for_checkout(checkout_id))
    }

    /// Returns the records matching a query, in log order.
    pub fn query(&self, query: &PurchaseQuery) -> Vec<&PurchaseRecord> {
        let matching = self.records.iter().filter(|r| query.matches(r));
        match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
