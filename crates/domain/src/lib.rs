//! Domain layer for the storefront.
//!
//! This crate provides the session-owned state of the storefront:
//! - Aggregate and DomainEvent traits for event-applying state
//! - The cart aggregate and its [`CartStore`], which reports an explicit
//!   [`Outcome`] for every request
//! - The append-only [`PurchaseLog`] and the delivery details it records

pub mod aggregate;
pub mod cart;
pub mod purchase;

pub use aggregate::{Aggregate, DomainEvent};
pub use cart::{Cart, CartEvent, CartLine, CartRejection, CartStore, Outcome};
pub use purchase::{
    DeliveryDetails, DeliveryForm, DeliveryFormError, PurchaseItem, PurchaseLog, PurchaseQuery,
    PurchaseRecord,
};
