pub mod confirm;
pub mod form;
