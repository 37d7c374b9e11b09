//! HTTP adapters - REST API over the application handlers.
//!
//! Each area has its own module with request DTOs, handlers and routes.
//! [`gym_router`] mounts them all under `/api`.

pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod payments;
pub mod reports;
pub mod state;

use axum::{routing::get, Router};

pub use auth::Staff;
pub use error::{ApiError, ErrorResponse};
pub use state::GymAppState;

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Create the complete API router.
///
/// # Example
///
/// ```ignore
/// let state = GymAppState::from_store(store, notifier, &config.gym);
/// let app = gym_router(state).layer(TraceLayer::new_for_http());
/// ```
pub fn gym_router(state: GymAppState) -> Router {
    let api = Router::new()
        .nest("/payments", payments::payment_routes())
        .nest("/attendance", attendance::attendance_routes())
        .nest("/membership-types", catalog::catalog_routes())
        .nest("/members", catalog::member_routes())
        .nest("/classes", catalog::class_routes())
        .nest("/settings", catalog::settings_routes())
        .nest("/reports", reports::report_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::memory::InMemoryGymStore;
    use crate::adapters::notify::RecordingNotifier;
    use crate::config::GymConfig;

    #[test]
    fn gym_router_builds() {
        let state = GymAppState::from_store(
            Arc::new(InMemoryGymStore::new()),
            Arc::new(RecordingNotifier::new()),
            &GymConfig::default(),
        );
        let _router: Router = gym_router(state);
    }
}
