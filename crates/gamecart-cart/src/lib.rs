//! `GameCart`: Cart & Checkout bounded context.
//!
//! Responsible for a player's cart (add, remove, list) and for the
//! checkout transition that moves the cart into the player's library and
//! emits a purchase notification.

pub mod application;
pub mod domain;
