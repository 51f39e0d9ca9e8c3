//! Input and output adapters for the CLI.

pub mod csv;
