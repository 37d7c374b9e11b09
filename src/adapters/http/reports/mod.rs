//! HTTP adapter for report endpoints.
//!
//! - `GET /api/reports/revenue?from=&to=` - Revenue against the previous period
//! - `GET /api/reports/payment-status` - Counts and totals per display status

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::report_routes;
