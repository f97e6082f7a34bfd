pub mod csv;
pub mod form;
