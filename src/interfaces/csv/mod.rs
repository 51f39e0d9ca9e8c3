pub mod cart_writer;
pub mod operation_reader;
