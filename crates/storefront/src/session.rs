//! A shopper's session: catalog, cart, checkout and purchase history.
//!
//! All state changes go through [`Session::handle`], one command at a time.
//! The HTTP layer only translates requests into [`SessionCommand`]s.

use catalog::{Catalog, CatalogFilter, Product, ProductId};
use checkout::{
    CheckoutConfig, CheckoutError, CheckoutOrchestrator, CheckoutReceipt, PendingCheckout,
    Started,
};
use domain::{CartStore, DeliveryForm, DeliveryFormError, Outcome, PurchaseLog};
use thiserror::Error;

/// A request that changes session state.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    AddToCart { product_id: ProductId },
    IncrementQuantity { product_id: ProductId },
    DecrementQuantity { product_id: ProductId },
    RemoveFromCart { product_id: ProductId },
    ClearCart,
    BuyNow { product_id: ProductId, quantity: u32 },
    BuyNowLine { product_id: ProductId },
    BuyAll,
    SubmitDetails { form: DeliveryForm },
    CancelCheckout,
}

impl SessionCommand {
    /// Returns the command name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::AddToCart { .. } => "AddToCart",
            SessionCommand::IncrementQuantity { .. } => "IncrementQuantity",
            SessionCommand::DecrementQuantity { .. } => "DecrementQuantity",
            SessionCommand::RemoveFromCart { .. } => "RemoveFromCart",
            SessionCommand::ClearCart => "ClearCart",
            SessionCommand::BuyNow { .. } => "BuyNow",
            SessionCommand::BuyNowLine { .. } => "BuyNowLine",
            SessionCommand::BuyAll => "BuyAll",
            SessionCommand::SubmitDetails { .. } => "SubmitDetails",
            SessionCommand::CancelCheckout => "CancelCheckout",
        }
    }
}

/// What a successfully handled command produced.
#[derive(Debug, Clone)]
pub enum SessionReply {
    /// A cart request was applied or rejected.
    Cart(Outcome),

    /// A checkout attempt was asked to start.
    CheckoutStarted(Started),

    /// Delivery details were accepted and the purchase recorded.
    Purchased(CheckoutReceipt),

    /// The pending checkout was abandoned.
    Cancelled(PendingCheckout),
}

/// Errors that can occur while handling a session command.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The product is not in the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    /// The checkout flow turned the request down.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The delivery form was incomplete.
    #[error(transparent)]
    Delivery(#[from] DeliveryFormError),
}

/// Single-shopper session state.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cart: CartStore,
    purchases: PurchaseLog,
    checkout: CheckoutOrchestrator,
}

impl Session {
    /// Creates a session over a loaded catalog with an empty cart and history.
    pub fn new(catalog: Catalog, config: CheckoutConfig) -> Self {
        Self {
            catalog,
            cart: CartStore::new(),
            purchases: PurchaseLog::new(),
            checkout: CheckoutOrchestrator::new(config),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn purchases(&self) -> &PurchaseLog {
        &self.purchases
    }

    pub fn checkout(&self) -> &CheckoutOrchestrator {
        &self.checkout
    }

    /// Returns catalog products matching a filter.
    pub fn products(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.catalog.filter(filter)
    }

    /// Handles one command to completion.
    #[tracing::instrument(skip(self, command), fields(command = command.name()))]
    pub fn handle(&mut self, command: SessionCommand) -> Result<SessionReply, SessionError> {
        match command {
            SessionCommand::AddToCart { product_id } => {
                let product = self.lookup(&product_id)?.clone();
                Ok(SessionReply::Cart(self.cart.add_to_cart(&product)))
            }
            SessionCommand::IncrementQuantity { product_id } => Ok(SessionReply::Cart(
                self.cart.increment_quantity(&product_id),
            )),
            SessionCommand::DecrementQuantity { product_id } => Ok(SessionReply::Cart(
                self.cart.decrement_quantity(&product_id),
            )),
            SessionCommand::RemoveFromCart { product_id } => {
                Ok(SessionReply::Cart(self.cart.remove_from_cart(&product_id)))
            }
            SessionCommand::ClearCart => Ok(SessionReply::Cart(self.cart.clear_cart())),
            SessionCommand::BuyNow {
                product_id,
                quantity,
            } => {
                let product = self.lookup(&product_id)?.clone();
                let checkout_id = self.checkout.buy_now(&product, quantity)?;
                Ok(SessionReply::CheckoutStarted(Started::Pending(checkout_id)))
            }
            SessionCommand::BuyNowLine { product_id } => {
                let checkout_id = self.checkout.buy_line(&self.cart, &product_id)?;
                Ok(SessionReply::CheckoutStarted(Started::Pending(checkout_id)))
            }
            SessionCommand::BuyAll => Ok(SessionReply::CheckoutStarted(
                self.checkout.buy_all(&self.cart)?,
            )),
            SessionCommand::SubmitDetails { form } => {
                if !self.checkout.state().can_submit() {
                    return Err(CheckoutError::NotCollectingDetails {
                        state: self.checkout.state(),
                    }
                    .into());
                }
                let details = form.validate()?;
                let receipt = self
                    .checkout
                    .submit(details, &mut self.cart, &mut self.purchases)?;
                Ok(SessionReply::Purchased(receipt))
            }
            SessionCommand::CancelCheckout => Ok(SessionReply::Cancelled(self.checkout.cancel()?)),
        }
    }

    fn lookup(&self, product_id: &ProductId) -> Result<&Product, SessionError> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| SessionError::UnknownProduct(product_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Money;
    use checkout::CheckoutState;

    fn session() -> Session {
        let catalog = Catalog::new(vec![
            Product::new("1", "Backpack", Money::from_cents(2000), "", "bags"),
            Product::new("2", "Shirt", Money::from_cents(1500), "", "clothing"),
        ])
        .unwrap();
        Session::new(catalog, CheckoutConfig::default())
    }

    fn form() -> DeliveryForm {
        DeliveryForm {
            name: Some("Ann".into()),
            address: Some("1 Rd".into()),
            phone: Some("555".into()),
            expected_date: Some("2024-01-01".into()),
        }
    }

    fn add(session: &mut Session, id: &str) -> Outcome {
        match session.handle(SessionCommand::AddToCart {
            product_id: id.into(),
        }) {
            Ok(SessionReply::Cart(outcome)) => outcome,
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn test_add_known_product() {
        let mut session = session();
        assert!(add(&mut session, "1").is_applied());
        assert!(add(&mut session, "1").is_applied());
        assert_eq!(session.cart().lines()[0].quantity(), 2);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut session = session();
        let result = session.handle(SessionCommand::AddToCart {
            product_id: "404".into(),
        });
        assert!(matches!(result, Err(SessionError::UnknownProduct(_))));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_buy_all_then_submit() {
        let mut session = session();
        let _ = add(&mut session, "1");
        let _ = add(&mut session, "2");

        let reply = session.handle(SessionCommand::BuyAll).unwrap();
        assert!(matches!(
            reply,
            SessionReply::CheckoutStarted(Started::Pending(_))
        ));

        let reply = session
            .handle(SessionCommand::SubmitDetails { form: form() })
            .unwrap();
        let SessionReply::Purchased(receipt) = reply else {
            panic!("expected a receipt");
        };
        assert_eq!(receipt.records.len(), 2);
        assert_eq!(session.purchases().len(), 2);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_buy_now_line_records_cart_quantity() {
        let mut session = session();
        let _ = add(&mut session, "1");
        let _ = add(&mut session, "1");
        let _ = add(&mut session, "2");

        session
            .handle(SessionCommand::BuyNowLine {
                product_id: "1".into(),
            })
            .unwrap();
        let SessionReply::Purchased(receipt) = session
            .handle(SessionCommand::SubmitDetails { form: form() })
            .unwrap()
        else {
            panic!("expected a receipt");
        };

        assert_eq!(receipt.records.len(), 1);
        assert_eq!(receipt.records[0].quantity(), 2);
        assert_eq!(receipt.total, Money::from_cents(4000));
    }

    #[test]
    fn test_buy_now_line_not_in_cart() {
        let mut session = session();
        let result = session.handle(SessionCommand::BuyNowLine {
            product_id: "2".into(),
        });
        assert!(matches!(
            result,
            Err(SessionError::Checkout(CheckoutError::LineNotInCart { .. }))
        ));
        assert_eq!(session.checkout().state(), CheckoutState::Idle);
    }

    #[test]
    fn test_incomplete_form_keeps_checkout_pending() {
        let mut session = session();
        session
            .handle(SessionCommand::BuyNow {
                product_id: "2".into(),
                quantity: 1,
            })
            .unwrap();

        let result = session.handle(SessionCommand::SubmitDetails {
            form: DeliveryForm::default(),
        });

        assert!(matches!(result, Err(SessionError::Delivery(_))));
        assert_eq!(session.checkout().state(), CheckoutState::CollectingDetails);
        assert!(session.purchases().is_empty());
    }

    #[test]
    fn test_submit_without_checkout_reports_state_before_form() {
        let mut session = session();
        let result = session.handle(SessionCommand::SubmitDetails {
            form: DeliveryForm::default(),
        });
        assert!(matches!(
            result,
            Err(SessionError::Checkout(
                CheckoutError::NotCollectingDetails { .. }
            ))
        ));
    }

    #[test]
    fn test_cancel() {
        let mut session = session();
        session
            .handle(SessionCommand::BuyNow {
                product_id: "1".into(),
                quantity: 1,
            })
            .unwrap();

        let reply = session.handle(SessionCommand::CancelCheckout).unwrap();
        assert!(matches!(reply, SessionReply::Cancelled(_)));
        assert_eq!(session.checkout().state(), CheckoutState::Idle);
    }
}
