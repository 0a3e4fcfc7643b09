//! Checkout state machine.

use serde::{Deserialize, Serialize};

/// The state of the checkout flow.
///
/// State transitions:
/// ```text
/// Idle ──► CollectingDetails ──┬──► Committing ──► Idle
///                              └──► Idle (cancel)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// No checkout attempt is pending.
    #[default]
    Idle,

    /// A selection is waiting for delivery details.
    CollectingDetails,

    /// Records are being written for the pending selection.
    Committing,
}

impl CheckoutState {
    /// Returns true if a new checkout attempt can start.
    pub fn can_start(&self) -> bool {
        matches!(self, CheckoutState::Idle)
    }

    /// Returns true if delivery details can be submitted.
    pub fn can_submit(&self) -> bool {
        matches!(self, CheckoutState::CollectingDetails)
    }

    /// Returns true if the pending attempt can be abandoned.
    pub fn can_cancel(&self) -> bool {
        matches!(self, CheckoutState::CollectingDetails)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "Idle",
            CheckoutState::CollectingDetails => "CollectingDetails",
            CheckoutState::Committing => "Committing",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
