use crate::domain::cart::{Cart, CartPolicy};
use crate::domain::line_item::LineItem;
use crate::domain::operation::{CartOperation, OperationKind};
use crate::domain::ports::CartStoreBox;
use crate::error::{CartError, Result};

/// What applying a single operation did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added,
    /// `false` when the product was not in the cart.
    Removed(bool),
    RemovedAt(LineItem),
}

/// Replays cart operations against the carts held in a `CartStore`.
///
/// Operations are applied one at a time, in the order they are submitted. A cart is created
/// under the engine's policy the first time an item is added for its customer.
pub struct CartEngine {
    cart_store: CartStoreBox,
    policy: CartPolicy,
}

impl CartEngine {
    /// Creates a new `CartEngine` using the default cart policy.
    pub fn new(cart_store: CartStoreBox) -> Self {
        Self::with_policy(cart_store, CartPolicy::default())
    }

    /// Creates a new `CartEngine` whose new carts use `policy`.
    pub fn with_policy(cart_store: CartStoreBox, policy: CartPolicy) -> Self {
        Self { cart_store, policy }
    }

    /// Applies one operation and stores the customer's cart back.
    ///
    /// On error the stored cart is left as it was.
    pub async fn process_operation(&self, op: CartOperation) -> Result<Outcome> {
        let stored = self.cart_store.get(&op.customer).await?;
        let existed = stored.is_some();
        let mut cart =
            stored.unwrap_or_else(|| Cart::new(op.customer.clone()).with_policy(self.policy));

        let outcome = match op.op {
            OperationKind::Add => {
                cart.add_item(
                    op.require_product()?,
                    op.require_price()?,
                    op.require_quantity()?,
                )?;
                Outcome::Added
            }
            OperationKind::Remove => Outcome::Removed(cart.remove_item(&op.require_product()?)),
            OperationKind::RemoveAt => {
                let position = op.require_position()?;
                let index =
                    usize::try_from(position).map_err(|_| CartError::InvalidPosition {
                        position,
                        len: cart.len(),
                    })?;
                Outcome::RemovedAt(cart.remove_item_at(index)?)
            }
        };

        tracing::debug!(
            customer = %op.customer,
            ?outcome,
            total = %cart.total(),
            "operation applied"
        );

        // A customer only gets a cart once something lands in it.
        if existed || !cart.is_empty() {
            self.cart_store.store(cart).await?;
        }
        Ok(outcome)
    }

    /// Consumes the engine and returns every cart, ordered by customer id.
    pub async fn into_results(self) -> Result<Vec<Cart>> {
        let mut carts = self.cart_store.get_all().await?;
        carts.sort_by(|a, b| a.customer_id().cmp(b.customer_id()));
        Ok(carts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::error::Fault;
    use crate::infrastructure::in_memory::InMemoryCartStore;
    use rust_decimal_macros::dec;

    fn engine() -> CartEngine {
        CartEngine::new(Box::new(InMemoryCartStore::new()))
    }

    #[tokio::test]
    async fn test_operations_are_routed_per_customer() {
        let engine = engine();

        engine
            .process_operation(CartOperation::add("C2", "A", Money::new(dec!(2.0)), 1))
            .await
            .unwrap();
        engine
            .process_operation(CartOperation::add("C1", "A", Money::new(dec!(1.0)), 3))
            .await
            .unwrap();

        let results = engine.into_results().await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].customer_id(), "C1");
        assert_eq!(results[0].total(), Money::new(dec!(3.0)));
        assert_eq!(results[1].total(), Money::new(dec!(2.0)));
    }

    #[tokio::test]
    async fn test_remove_outcomes() {
        let engine = engine();
        engine
            .process_operation(CartOperation::add("C1", "A", Money::new(dec!(1.0)), 1))
            .await
            .unwrap();
        engine
            .process_operation(CartOperation::add("C1", "B", Money::new(dec!(1.0)), 1))
            .await
            .unwrap();

        let removed = engine
            .process_operation(CartOperation::remove("C1", "A"))
            .await
            .unwrap();
        assert_eq!(removed, Outcome::Removed(true));

        let missing = engine
            .process_operation(CartOperation::remove("C1", "A"))
            .await
            .unwrap();
        assert_eq!(missing, Outcome::Removed(false));

        let at = engine
            .process_operation(CartOperation::remove_at("C1", 0))
            .await
            .unwrap();
        assert!(matches!(at, Outcome::RemovedAt(item) if item.product().as_str() == "B"));
    }

    #[tokio::test]
    async fn test_negative_position_is_invalid() {
        let engine = engine();
        engine
            .process_operation(CartOperation::add("C1", "A", Money::new(dec!(1.0)), 1))
            .await
            .unwrap();

        let result = engine
            .process_operation(CartOperation::remove_at("C1", -1))
            .await;
        assert!(matches!(
            result,
            Err(CartError::InvalidPosition {
                position: -1,
                len: 1
            })
        ));

        let results = engine.into_results().await.unwrap();
        assert_eq!(results[0].len(), 1);
    }

    #[tokio::test]
    async fn test_failed_add_keeps_stored_cart() {
        let engine = engine();
        engine
            .process_operation(CartOperation::add("C1", "A", Money::new(dec!(5.0)), 1))
            .await
            .unwrap();

        let result = engine
            .process_operation(CartOperation::add("C1", "A", Money::new(dec!(-5.0)), 1))
            .await;
        assert!(matches!(
            result,
            Err(CartError::Fault(Fault::NegativePrice))
        ));

        let results = engine.into_results().await.unwrap();
        assert_eq!(results[0].total(), Money::new(dec!(5.0)));
    }

    #[tokio::test]
    async fn test_legacy_policy_applies_to_new_carts() {
        let engine = CartEngine::with_policy(
            Box::new(InMemoryCartStore::new()),
            CartPolicy::legacy(),
        );

        let outcome = engine
            .process_operation(CartOperation::add("C1", "A", Money::new(dec!(-5.0)), 1))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Added);

        let results = engine.into_results().await.unwrap();
        assert_eq!(results[0].policy(), CartPolicy::legacy());
        assert_eq!(results[0].total(), Money::new(dec!(-5.0)));
    }

    #[tokio::test]
    async fn test_no_cart_is_created_when_nothing_is_added() {
        let engine = CartEngine::with_policy(
            Box::new(InMemoryCartStore::new()),
            CartPolicy::legacy(),
        );

        let removed = engine
            .process_operation(CartOperation::remove("C9", "A"))
            .await
            .unwrap();
        assert_eq!(removed, Outcome::Removed(false));

        // Suppressed under the legacy policy
        let added = engine
            .process_operation(CartOperation::add(
                "C9",
                "A",
                Money::new(rust_decimal::Decimal::MAX),
                2,
            ))
            .await
            .unwrap();
        assert_eq!(added, Outcome::Added);

        let results = engine.into_results().await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_emptied_cart_is_kept() {
        let engine = engine();
        engine
            .process_operation(CartOperation::add("C1", "A", Money::new(dec!(1.0)), 1))
            .await
            .unwrap();
        engine
            .process_operation(CartOperation::remove("C1", "A"))
            .await
            .unwrap();

        let results = engine.into_results().await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_empty());
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let engine = engine();
        let mut op = CartOperation::add("C1", "A", Money::new(dec!(1.0)), 1);
        op.quantity = None;

        let result = engine.process_operation(op).await;
        assert!(matches!(result, Err(CartError::InvalidOperation(_))));
    }
}
