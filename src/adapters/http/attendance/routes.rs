//! Axum router configuration for attendance endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{check_in, check_out, delete_attendance, edit_attendance, sweep, today};
use crate::adapters::http::state::GymAppState;

/// Routes mounted at `/api/attendance`.
pub fn attendance_routes() -> Router<GymAppState> {
    Router::new()
        .route("/today", get(today))
        .route("/check-in", post(check_in))
        .route("/check-out", post(check_out))
        .route("/sweep", post(sweep))
        .route("/:id", patch(edit_attendance).delete(delete_attendance))
}
