//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `payment` - Payment records and display-status derivation
//! - `membership` - Membership catalog, pricing and members
//! - `attendance` - Check-in sessions and auto-checkout settings
//! - `classes` - Weekly class schedule

pub mod attendance;
pub mod classes;
pub mod foundation;
pub mod membership;
pub mod payment;
