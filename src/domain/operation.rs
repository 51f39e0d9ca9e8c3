use super::money::Money;
use super::product::ProductId;
use crate::error::{CartError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Remove,
    RemoveAt,
}

/// A single change to a customer's cart, as read from an operations file.
///
/// Which of the optional fields are required depends on `op`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartOperation {
    pub op: OperationKind,
    pub customer: String,
    pub product: Option<ProductId>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<Money>,
    pub quantity: Option<i64>,
    pub position: Option<i64>,
}

/// Parses the price from its text so the written scale survives (`5.00` stays `5.00`).
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(&raw)
        .map(|value| Some(Money::new(value)))
        .map_err(serde::de::Error::custom)
}

impl CartOperation {
    pub fn add(
        customer: impl Into<String>,
        product: impl Into<ProductId>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            op: OperationKind::Add,
            customer: customer.into(),
            product: Some(product.into()),
            price: Some(price),
            quantity: Some(quantity),
            position: None,
        }
    }

    pub fn remove(customer: impl Into<String>, product: impl Into<ProductId>) -> Self {
        Self {
            op: OperationKind::Remove,
            customer: customer.into(),
            product: Some(product.into()),
            price: None,
            quantity: None,
            position: None,
        }
    }

    pub fn remove_at(customer: impl Into<String>, position: i64) -> Self {
        Self {
            op: OperationKind::RemoveAt,
            customer: customer.into(),
            product: None,
            price: None,
            quantity: None,
            position: Some(position),
        }
    }

    pub fn require_product(&self) -> Result<ProductId> {
        self.product
            .clone()
            .ok_or_else(|| self.missing("product"))
    }

    pub fn require_price(&self) -> Result<Money> {
        self.price.ok_or_else(|| self.missing("price"))
    }

    pub fn require_quantity(&self) -> Result<i64> {
        self.quantity.ok_or_else(|| self.missing("quantity"))
    }

    pub fn require_position(&self) -> Result<i64> {
        self.position.ok_or_else(|| self.missing("position"))
    }

    fn missing(&self, field: &str) -> CartError {
        CartError::InvalidOperation(format!(
            "{:?} for customer {} is missing {field}",
            self.op, self.customer
        ))
    }
}
