use crate::domain::cart::Cart;
use crate::domain::money::Money;
use crate::domain::product::ProductId;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct SummaryRow<'a> {
    customer: &'a str,
    items: usize,
    total: Money,
}

#[derive(Serialize)]
struct DetailRow<'a> {
    customer: &'a str,
    position: usize,
    product: &'a ProductId,
    unit_price: Money,
    quantity: i64,
    line_total: Money,
}

#[derive(Serialize)]
struct ItemView<'a> {
    product: &'a ProductId,
    unit_price: Money,
    quantity: i64,
    line_total: Money,
}

#[derive(Serialize)]
struct CartView<'a> {
    customer: &'a str,
    items: Vec<ItemView<'a>>,
    total: Money,
}

/// Writes final cart state.
///
/// Totals and line totals are rounded to `scale` decimal places on the way out; unit
/// prices are written exactly as they were given.
pub struct CartWriter<W: Write> {
    writer: W,
    scale: u32,
}

impl<W: Write> CartWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, scale: 2 }
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// One `customer,items,total` row per cart.
    pub fn write_summaries(&mut self, carts: &[Cart]) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(&mut self.writer);
        for cart in carts {
            wtr.serialize(SummaryRow {
                customer: cart.customer_id(),
                items: cart.len(),
                total: cart.total().round_to(self.scale),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// One row per line item, in insertion order within each cart.
    pub fn write_details(&mut self, carts: &[Cart]) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(&mut self.writer);
        for cart in carts {
            for (position, item) in cart.iter().enumerate() {
                wtr.serialize(DetailRow {
                    customer: cart.customer_id(),
                    position,
                    product: item.product(),
                    unit_price: item.unit_price(),
                    quantity: item.quantity(),
                    line_total: item.line_total().round_to(self.scale),
                })?;
            }
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_json(&mut self, carts: &[Cart]) -> Result<()> {
        let views: Vec<CartView<'_>> = carts
            .iter()
            .map(|cart| CartView {
                customer: cart.customer_id(),
                items: cart
                    .iter()
                    .map(|item| ItemView {
                        product: item.product(),
                        unit_price: item.unit_price(),
                        quantity: item.quantity(),
                        line_total: item.line_total().round_to(self.scale),
                    })
                    .collect(),
                total: cart.total().round_to(self.scale),
            })
            .collect();

        serde_json::to_writer_pretty(&mut self.writer, &views)?;
        writeln!(self.writer)?;
        Ok(())
    }
}
