use crate::domain::cart::Cart;
use crate::domain::ports::CartStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for carts.
///
/// Uses `Arc<RwLock<HashMap<String, Cart>>>` so clones share the same map.
/// Nothing survives the process.
#[derive(Default, Clone)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<String, Cart>>>,
}

impl InMemoryCartStore {
    /// Creates a new, empty in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn store(&self, cart: Cart) -> Result<()> {
        let mut carts = self.carts.write().await;
        carts.insert(cart.customer_id().to_string(), cart);
        Ok(())
    }

    async fn get(&self, customer_id: &str) -> Result<Option<Cart>> {
        let carts = self.carts.read().await;
        Ok(carts.get(customer_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Cart>> {
        let carts = self.carts.read().await;
        Ok(carts.values().cloned().collect())
    }
}
