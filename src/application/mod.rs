//! Application layer orchestrating cart operations.
//!
//! `CartEngine` is the entry point: it loads a customer's cart from the store, applies one
//! operation, and writes the cart back.

pub mod engine;
