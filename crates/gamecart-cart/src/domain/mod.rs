//! Domain model for the Cart & Checkout context.

pub mod commands;
pub mod events;
pub mod settings;
