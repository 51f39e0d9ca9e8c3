use super::cart::Cart;
use crate::error::Result;
use async_trait::async_trait;

/// Where the engine keeps carts between operations, keyed by customer id.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn store(&self, cart: Cart) -> Result<()>;
    async fn get(&self, customer_id: &str) -> Result<Option<Cart>>;
    async fn get_all(&self) -> Result<Vec<Cart>>;
}

pub type CartStoreBox = Box<dyn CartStore>;
