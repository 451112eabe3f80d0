//! `GameCart` Core: shared records and ports.
//!
//! This crate defines the user and catalog records, the repository and
//! publisher traits the cart context depends on, and the domain error type.
//! It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod game;
pub mod publisher;
pub mod repository;
pub mod user;
