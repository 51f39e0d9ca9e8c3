use super::money::Money;
use super::product::ProductId;
use crate::error::Fault;
use serde::Serialize;

/// One product's accumulated quantity and current unit price within a cart.
///
/// The line total is worked out whenever price or quantity change, so an item that exists
/// always has an exact one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem<P = ProductId> {
    product: P,
    unit_price: Money,
    quantity: i64,
    #[serde(skip)]
    line_total: Money,
}

impl<P> LineItem<P> {
    /// # Errors
    ///
    /// Returns `Fault::AmountOverflow` if `unit_price × quantity` is not representable.
    pub fn new(product: P, unit_price: Money, quantity: i64) -> Result<Self, Fault> {
        Ok(Self {
            product,
            unit_price,
            quantity,
            line_total: unit_price.times(quantity)?,
        })
    }

    pub fn product(&self) -> &P {
        &self.product
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Adds `delta` to the quantity. The sign of `delta` is not checked here.
    pub fn accumulate_quantity(&mut self, delta: i64) -> Result<(), Fault> {
        let quantity = self
            .quantity
            .checked_add(delta)
            .ok_or(Fault::QuantityOverflow)?;
        self.update(self.unit_price, quantity)
    }

    pub fn set_unit_price(&mut self, new_price: Money) -> Result<(), Fault> {
        self.update(new_price, self.quantity)
    }

    /// Replaces price and quantity together, or neither.
    pub(crate) fn update(&mut self, unit_price: Money, quantity: i64) -> Result<(), Fault> {
        let line_total = unit_price.times(quantity)?;
        self.unit_price = unit_price;
        self.quantity = quantity;
        self.line_total = line_total;
        Ok(())
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.line_total
    }
}
