//! Batch input and output for the command line.

pub mod request_reader;
pub mod result_writer;
