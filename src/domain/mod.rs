//! Cart aggregate and the values it is built from.

pub mod cart;
pub mod line_item;
pub mod money;
pub mod operation;
pub mod ports;
pub mod product;
