use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{health, memberships, reports, schedules};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Versioned API routes; every handler authenticates via the StaffAuth
    // extractor and runs its capability check against the loaded staff row.
    let api_routes = Router::new()
        .route("/api/v1/schedules", post(schedules::create_schedule))
        .route("/api/v1/schedules", get(schedules::list_schedules))
        .route("/api/v1/schedules/:id", get(schedules::get_schedule))
        .route(
            "/api/v1/schedules/:id/status",
            patch(schedules::update_schedule_status),
        )
        .route(
            "/api/v1/schedules/:id/attend",
            post(schedules::attend_schedule),
        )
        .route(
            "/api/v1/schedules/:id/attendance",
            get(schedules::get_attendance),
        )
        .route(
            "/api/v1/schedules/:id/credits",
            get(schedules::list_credit_transactions),
        )
        .route("/api/v1/schedules/:id", delete(schedules::delete_schedule))
        .route("/api/v1/memberships/:id", get(memberships::get_membership))
        .route(
            "/api/v1/memberships/:id/hold",
            post(memberships::hold_membership),
        )
        .route("/api/v1/reports", get(reports::get_own_report))
        .route("/api/v1/reports/submit", post(reports::submit_report))
        .route("/api/v1/reports/:id", get(reports::get_report))
        .route("/api/v1/reports/:id/review", post(reports::review_report));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
