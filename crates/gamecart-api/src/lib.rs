//! `GameCart` API: HTTP surface over the cart context.

pub mod config;
pub mod error;
pub mod identity;
pub mod routes;
pub mod state;
pub mod telemetry;
