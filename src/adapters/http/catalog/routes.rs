//! Axum router configuration for catalog endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    get_settings, list_classes, list_membership_types, resolve_amount, search_members,
    update_settings,
};
use crate::adapters::http::state::GymAppState;

/// Routes mounted at `/api/membership-types`.
pub fn catalog_routes() -> Router<GymAppState> {
    Router::new()
        .route("/", get(list_membership_types))
        .route("/:code/amount", get(resolve_amount))
}

/// Routes mounted at `/api/members`.
pub fn member_routes() -> Router<GymAppState> {
    Router::new().route("/", get(search_members))
}

/// Routes mounted at `/api/classes`.
pub fn class_routes() -> Router<GymAppState> {
    Router::new().route("/", get(list_classes))
}

/// Routes mounted at `/api/settings`.
pub fn settings_routes() -> Router<GymAppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}
