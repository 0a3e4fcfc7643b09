//! Checkout orchestration for the storefront.
//!
//! A checkout moves through three states:
//! 1. `Idle`: nothing selected
//! 2. `CollectingDetails`: a selection is pending delivery details
//! 3. `Committing`: records are written and the cart is cleared
//!
//! Committing runs to completion inside a single call, so callers only ever
//! observe `Idle` or `CollectingDetails` between requests.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod state;

pub use config::{CheckoutConfig, ClearScope, ParseClearScopeError};
pub use error::{CheckoutError, Result};
pub use orchestrator::{
    CheckoutKind, CheckoutOrchestrator, CheckoutReceipt, PendingCheckout, Started,
};
pub use state::CheckoutState;
