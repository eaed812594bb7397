pub mod cors;
pub mod error_handler;
pub mod not_found;
