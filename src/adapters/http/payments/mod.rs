//! HTTP adapter for payment endpoints.
//!
//! - `GET /api/payments` - One page of payments with display statuses
//! - `POST /api/payments` - Record a payment
//! - `PATCH /api/payments/:id` - Edit a payment

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
