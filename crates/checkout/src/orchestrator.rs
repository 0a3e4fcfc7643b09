//! Checkout orchestrator.

use std::time::Instant;

use catalog::{Money, Product, ProductId};
use chrono::{DateTime, Utc};
use common::CheckoutId;
use domain::{CartStore, DeliveryDetails, PurchaseItem, PurchaseLog, PurchaseRecord};
use serde::Serialize;

use crate::config::{CheckoutConfig, ClearScope};
use crate::error::{CheckoutError, Result};
use crate::state::CheckoutState;

/// How the pending selection was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutKind {
    /// One product, bought directly without going through the cart.
    BuyNow,

    /// One cart line, at the quantity it has in the cart.
    BuyLine,

    /// Every line in the cart.
    BuyAll,
}

impl CheckoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutKind::BuyNow => "buy_now",
            CheckoutKind::BuyLine => "buy_line",
            CheckoutKind::BuyAll => "buy_all",
        }
    }
}

impl std::fmt::Display for CheckoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selection waiting for delivery details.
///
/// The items are a snapshot taken when the attempt started. Later cart edits
/// do not change what gets recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingCheckout {
    checkout_id: CheckoutId,
    kind: CheckoutKind,
    items: Vec<PurchaseItem>,
    total: Money,
}

impl PendingCheckout {
    fn new(kind: CheckoutKind, items: Vec<PurchaseItem>) -> Result<Self> {
        let total = items
            .iter()
            .try_fold(Money::zero(), |acc, item| {
                item.product
                    .price()
                    .checked_multiply(item.quantity)
                    .and_then(|line| acc.checked_add(line))
            })
            .ok_or(CheckoutError::TotalOverflow)?;

        Ok(Self {
            checkout_id: CheckoutId::new(),
            kind,
            items,
            total,
        })
    }

    pub fn checkout_id(&self) -> CheckoutId {
        self.checkout_id
    }

    pub fn kind(&self) -> CheckoutKind {
        self.kind
    }

    pub fn items(&self) -> &[PurchaseItem] {
        &self.items
    }

    /// Returns the sum of `price * quantity` over the selection.
    ///
    /// Checked when the attempt started, so a pending checkout always has a
    /// representable total.
    pub fn total(&self) -> Money {
        self.total
    }
}

/// Result of asking to buy everything in the cart.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "checkout_id", rename_all = "snake_case")]
pub enum Started {
    /// A checkout is now collecting delivery details.
    Pending(CheckoutId),

    /// The cart was empty; nothing changed.
    NothingToPurchase,
}

impl Started {
    /// Returns the new checkout ID, if one was started.
    pub fn checkout_id(&self) -> Option<CheckoutId> {
        match self {
            Started::Pending(id) => Some(*id),
            Started::NothingToPurchase => None,
        }
    }
}

/// What a completed checkout wrote to the purchase log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub checkout_id: CheckoutId,
    pub kind: CheckoutKind,
    pub records: Vec<PurchaseRecord>,
    pub purchased_at: DateTime<Utc>,
    pub total: Money,
}

/// Drives a checkout from selection to committed purchase records.
///
/// Only one attempt can be pending at a time. The orchestrator does not own
/// the cart or the purchase log; they are passed to [`submit`](Self::submit)
/// so the commit can update both in one step.
#[derive(Debug, Default)]
pub struct CheckoutOrchestrator {
    config: CheckoutConfig,
    state: CheckoutState,
    pending: Option<PendingCheckout>,
}

impl CheckoutOrchestrator {
    /// Creates an idle orchestrator with the given policy.
    pub fn new(config: CheckoutConfig) -> Self {
        Self {
            config,
            state: CheckoutState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Returns the pending selection, if any.
    pub fn pending(&self) -> Option<&PendingCheckout> {
        self.pending.as_ref()
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Starts a checkout for a single product.
    ///
    /// The product does not need to be in the cart.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    pub fn buy_now(&mut self, product: &Product, quantity: u32) -> Result<CheckoutId> {
        if quantity == 0 {
            return Err(CheckoutError::InvalidQuantity);
        }
        self.ensure_can_start()?;

        let items = vec![PurchaseItem::new(product.clone(), quantity)];
        self.begin(CheckoutKind::BuyNow, items)
    }

    /// Starts a checkout for one cart line at its current cart quantity.
    ///
    /// The cart is left as is until the purchase is submitted.
    #[tracing::instrument(skip(self, cart), fields(product_id = %product_id))]
    pub fn buy_line(&mut self, cart: &CartStore, product_id: &ProductId) -> Result<CheckoutId> {
        self.ensure_can_start()?;

        let line = cart
            .cart()
            .line(product_id)
            .ok_or_else(|| CheckoutError::LineNotInCart {
                product_id: product_id.clone(),
            })?;
        self.begin(CheckoutKind::BuyLine, vec![PurchaseItem::from(line)])
    }

    /// Starts a checkout for every line currently in the cart.
    ///
    /// An empty cart starts nothing and is not an error.
    #[tracing::instrument(skip_all, fields(lines = cart.lines().len()))]
    pub fn buy_all(&mut self, cart: &CartStore) -> Result<Started> {
        self.ensure_can_start()?;

        if cart.is_empty() {
            tracing::debug!("buy all requested on an empty cart");
            return Ok(Started::NothingToPurchase);
        }

        let items = cart.lines().iter().map(PurchaseItem::from).collect();
        self.begin(CheckoutKind::BuyAll, items).map(Started::Pending)
    }

    /// Commits the pending selection using the current time.
    pub fn submit(
        &mut self,
        details: DeliveryDetails,
        cart: &mut CartStore,
        log: &mut PurchaseLog,
    ) -> Result<CheckoutReceipt> {
        self.submit_at(details, cart, log, Utc::now())
    }

    /// Commits the pending selection with an explicit purchase timestamp.
    ///
    /// Writes one record per selected product, all sharing `purchased_at` and
    /// `details`, then clears the cart according to the configured
    /// [`ClearScope`].
    #[tracing::instrument(skip_all, fields(state = %self.state))]
    pub fn submit_at(
        &mut self,
        details: DeliveryDetails,
        cart: &mut CartStore,
        log: &mut PurchaseLog,
        purchased_at: DateTime<Utc>,
    ) -> Result<CheckoutReceipt> {
        if !self.state.can_submit() {
            return Err(CheckoutError::NotCollectingDetails { state: self.state });
        }
        let Some(pending) = self.pending.take() else {
            self.state = CheckoutState::Idle;
            return Err(CheckoutError::NoCheckoutInProgress);
        };

        let total = pending.total();
        let commit_start = Instant::now();
        self.state = CheckoutState::Committing;

        let mut records = Vec::with_capacity(pending.items.len());
        for item in &pending.items {
            records.push(log.record_purchase(
                pending.checkout_id,
                item.clone(),
                &details,
                purchased_at,
            ));
        }

        self.clear_purchased(cart, &pending.items);
        self.state = CheckoutState::Idle;

        metrics::counter!("checkout_completed_total", "kind" => pending.kind.as_str())
            .increment(1);
        metrics::histogram!("checkout_commit_duration_seconds")
            .record(commit_start.elapsed().as_secs_f64());
        tracing::info!(
            checkout_id = %pending.checkout_id,
            kind = %pending.kind,
            records = records.len(),
            %total,
            "checkout completed"
        );

        Ok(CheckoutReceipt {
            checkout_id: pending.checkout_id,
            kind: pending.kind,
            records,
            purchased_at,
            total,
        })
    }

    /// Abandons the pending selection. Cart and log are untouched.
    #[tracing::instrument(skip(self))]
    pub fn cancel(&mut self) -> Result<PendingCheckout> {
        if !self.state.can_cancel() {
            return Err(CheckoutError::NoCheckoutInProgress);
        }
        let pending = self.pending.take().ok_or(CheckoutError::NoCheckoutInProgress)?;
        self.state = CheckoutState::Idle;

        metrics::counter!("checkout_cancelled_total", "kind" => pending.kind.as_str())
            .increment(1);
        tracing::info!(checkout_id = %pending.checkout_id, "checkout cancelled");
        Ok(pending)
    }

    fn ensure_can_start(&self) -> Result<()> {
        if self.state.can_start() {
            Ok(())
        } else {
            Err(CheckoutError::AlreadyInProgress { state: self.state })
        }
    }

    fn begin(&mut self, kind: CheckoutKind, items: Vec<PurchaseItem>) -> Result<CheckoutId> {
        let pending = PendingCheckout::new(kind, items).inspect_err(|_| {
            tracing::warn!(%kind, "checkout total overflows, not starting");
        })?;
        let checkout_id = pending.checkout_id;
        tracing::info!(
            %checkout_id,
            %kind,
            items = pending.items.len(),
            total = %pending.total,
            "checkout started"
        );
        metrics::counter!("checkout_started_total", "kind" => kind.as_str()).increment(1);

        self.pending = Some(pending);
        self.state = CheckoutState::CollectingDetails;
        Ok(checkout_id)
    }

    fn clear_purchased(&self, cart: &mut CartStore, items: &[PurchaseItem]) {
        match self.config.clear_scope {
            ClearScope::EntireCart => {
                // An already empty cart is fine here.
                let _ = cart.clear_cart();
            }
            ClearScope::PurchasedItems => {
                for item in items {
                    let _ = cart.remove_from_cart(item.product.id());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_cents(cents), "", "misc")
    }

    fn details() -> DeliveryDetails {
        DeliveryDetails::new("Ann", "1 Rd", "555", "2024-01-01")
    }

    #[test]
    fn test_buy_now_enters_collecting_details() {
        let mut orchestrator = CheckoutOrchestrator::default();
        let id = orchestrator.buy_now(&product("A", 100), 1).unwrap();

        assert_eq!(orchestrator.state(), CheckoutState::CollectingDetails);
        let pending = orchestrator.pending().unwrap();
        assert_eq!(pending.checkout_id(), id);
        assert_eq!(pending.kind(), CheckoutKind::BuyNow);
        assert_eq!(pending.items().len(), 1);
    }

    #[test]
    fn test_buy_now_zero_quantity_rejected() {
        let mut orchestrator = CheckoutOrchestrator::default();
        assert_eq!(
            orchestrator.buy_now(&product("A", 100), 0),
            Err(CheckoutError::InvalidQuantity)
        );
        assert_eq!(orchestrator.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_second_start_rejected() {
        let mut orchestrator = CheckoutOrchestrator::default();
        let first = orchestrator.buy_now(&product("A", 100), 1).unwrap();

        let result = orchestrator.buy_now(&product("B", 100), 1);
        assert_eq!(
            result,
            Err(CheckoutError::AlreadyInProgress {
                state: CheckoutState::CollectingDetails
            })
        );
        assert_eq!(orchestrator.pending().map(PendingCheckout::checkout_id), Some(first));
    }

    #[test]
    fn test_submit_without_pending_rejected() {
        let mut orchestrator = CheckoutOrchestrator::default();
        let mut cart = CartStore::new();
        let mut log = PurchaseLog::new();

        let result = orchestrator.submit(details(), &mut cart, &mut log);
        assert_eq!(
            result,
            Err(CheckoutError::NotCollectingDetails {
                state: CheckoutState::Idle
            })
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_cancel_without_pending_rejected() {
        let mut orchestrator = CheckoutOrchestrator::default();
        assert_eq!(orchestrator.cancel(), Err(CheckoutError::NoCheckoutInProgress));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut orchestrator = CheckoutOrchestrator::default();
        orchestrator.buy_now(&product("A", 100), 2).unwrap();

        let pending = orchestrator.cancel().unwrap();
        assert_eq!(pending.total(), Money::from_cents(200));
        assert_eq!(orchestrator.state(), CheckoutState::Idle);
        assert!(orchestrator.pending().is_none());
    }

    #[test]
    fn test_overflowing_total_rejected_and_stays_idle() {
        let mut orchestrator = CheckoutOrchestrator::default();
        let huge = product("A", i64::MAX / 2);

        assert_eq!(orchestrator.buy_now(&huge, 3), Err(CheckoutError::TotalOverflow));
        assert_eq!(orchestrator.state(), CheckoutState::Idle);
        assert!(orchestrator.pending().is_none());

        // Nothing is left half-started, so the next attempt goes through.
        orchestrator.buy_now(&product("B", 100), 1).unwrap();
        let mut cart = CartStore::new();
        let mut log = PurchaseLog::new();
        let receipt = orchestrator.submit(details(), &mut cart, &mut log).unwrap();
        assert_eq!(receipt.total, Money::from_cents(100));
        assert_eq!(orchestrator.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_buy_all_overflowing_cart_rejected() {
        let mut orchestrator = CheckoutOrchestrator::default();
        let mut cart = CartStore::new();
        let _ = cart.add_to_cart(&product("A", i64::MAX / 2));
        let _ = cart.add_to_cart(&product("B", i64::MAX / 2));
        let _ = cart.add_to_cart(&product("C", i64::MAX / 2));

        assert_eq!(orchestrator.buy_all(&cart), Err(CheckoutError::TotalOverflow));
        assert_eq!(orchestrator.state(), CheckoutState::Idle);
        assert_eq!(cart.lines().len(), 3);
    }

    #[test]
    fn test_buy_line_uses_cart_quantity() {
        let mut orchestrator = CheckoutOrchestrator::default();
        let mut cart = CartStore::new();
        let a = product("A", 250);
        let _ = cart.add_to_cart(&a);
        let _ = cart.add_to_cart(&a);

        orchestrator.buy_line(&cart, a.id()).unwrap();
        let pending = orchestrator.pending().unwrap();
        assert_eq!(pending.kind(), CheckoutKind::BuyLine);
        assert_eq!(pending.items()[0].quantity, 2);
        assert_eq!(pending.total(), Money::from_cents(500));
    }

    #[test]
    fn test_buy_line_missing_from_cart_rejected() {
        let mut orchestrator = CheckoutOrchestrator::default();
        let cart = CartStore::new();

        let result = orchestrator.buy_line(&cart, &ProductId::new("A"));
        assert_eq!(
            result,
            Err(CheckoutError::LineNotInCart {
                product_id: ProductId::new("A")
            })
        );
        assert_eq!(orchestrator.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_started_serialization() {
        let json = serde_json::to_value(Started::NothingToPurchase).unwrap();
        assert_eq!(json["status"], "nothing_to_purchase");

        let id = CheckoutId::new();
        let json = serde_json::to_value(Started::Pending(id)).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["checkout_id"], id.to_string());
    }
}
