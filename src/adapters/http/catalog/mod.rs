//! HTTP adapter for catalog, member lookup, classes and gym settings.
//!
//! - `GET /api/membership-types` - The membership catalog
//! - `GET /api/membership-types/:code/amount` - Price and due date for a plan
//! - `GET /api/members?q=` - Member search for the payment form
//! - `GET /api/classes` - Class schedule with free spots
//! - `GET /api/settings` / `PUT /api/settings` - Auto check-out settings

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{catalog_routes, class_routes, member_routes, settings_routes};
