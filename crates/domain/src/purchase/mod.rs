//! Append-only purchase history.

mod delivery;
mod log;
mod query;
mod record;

pub use delivery::{DeliveryDetails, DeliveryForm, DeliveryFormError};
pub use log::PurchaseLog;
pub use query::PurchaseQuery;
pub use record::{PurchaseItem, PurchaseRecord};
