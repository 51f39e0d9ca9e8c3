//! In-memory shopping carts with exact decimal totals.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
