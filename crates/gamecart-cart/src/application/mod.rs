//! Application services for the Cart & Checkout context.

pub mod command_handlers;
pub mod query_handlers;
