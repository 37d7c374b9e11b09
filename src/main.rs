use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gym_manager::adapters::http::{gym_router, GymAppState};
use gym_manager::adapters::postgres::{
    PostgresAttendanceRepository, PostgresClassRepository, PostgresMemberRepository,
    PostgresMembershipTypeRepository, PostgresPaymentRepository, PostgresSettingsRepository,
};
use gym_manager::adapters::{InMemoryGymStore, TracingNotifier};
use gym_manager::application::{AutoCheckoutScheduler, MigrateLegacyMembershipTypesHandler};
use gym_manager::config::{AppConfig, DatabaseConfig, LogFormat, ServerConfig};
use gym_manager::ports::Notifier;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier::new());
    let state = match &config.database.url {
        Some(url) => postgres_state(url, &config, notifier).await?,
        None => {
            tracing::warn!("No database URL configured, using the in-memory store");
            GymAppState::from_store(Arc::new(InMemoryGymStore::new()), notifier, &config.gym)
        }
    };

    if config.database.migrate_legacy_membership_types {
        let report =
            MigrateLegacyMembershipTypesHandler::new(state.members.clone(), state.membership_types.clone())
                .handle()
                .await?;
        tracing::info!(
            migrated = report.migrated.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "legacy membership types migrated"
        );
    }

    let auto_checkout = AutoCheckoutScheduler::new(Arc::new(state.sweep_handler()))
        .with_interval(config.gym.sweep_interval())
        .spawn();

    let request_id_header = HeaderName::from_static("x-request-id");
    let app = gym_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(&config.server)?);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    auto_checkout.shutdown().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| server.log_filter.clone().into());

    if server.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn postgres_state(
    url: &str,
    config: &AppConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<GymAppState, BoxError> {
    let pool = connect(url, &config.database).await?;
    tracing::info!("Database connection pool created");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let gym = &config.gym;
    Ok(GymAppState {
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        attendance: Arc::new(PostgresAttendanceRepository::new(pool.clone())),
        membership_types: Arc::new(PostgresMembershipTypeRepository::new(pool.clone())),
        settings: Arc::new(PostgresSettingsRepository::new(pool.clone())),
        classes: Arc::new(PostgresClassRepository::new(pool)),
        notifier,
        status_policy: gym.status_policy(),
        default_settings: gym.default_settings(),
        class_retry: gym.class_fetch_retry(),
    })
}

async fn connect(url: &str, db: &DatabaseConfig) -> Result<sqlx::PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout())
        .connect(url)
        .await
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Allows any origin when none are configured.
fn build_cors_layer(server: &ServerConfig) -> Result<CorsLayer, BoxError> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ];
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        return Ok(CorsLayer::new().allow_origin(Any).allow_methods(methods).allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any))
}
