//! # rigplan HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Catalog counts
//! - `GET /fit` - GPU-in-case fit check
//! - `GET /psu/check` - PSU sufficiency check
//! - `GET /mb` - Motherboard listing for a socket + memory standard
//! - `GET /build/plan` - Budget-constrained build enumeration
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `RIGPLAN_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `RIGPLAN_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

// Re-exports for external use
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
// Re-export handlers and types for integration tests (via `rigplan::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    fit_handler, health_handler, mb_handler, plan_handler, psu_handler, status_handler,
};
#[allow(unused_imports)]
pub use types::{
    ErrorResponse, FitParams, FitResponse, HealthResponse, MbParams, MbResponse, PlanParams,
    PlanResponse, PsuParams, PsuResponse, StatusResponse,
};

use crate::narrator::Narrator;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use rigplan_core::{Catalog, FitPolicy, PlanError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
///
/// The catalog is loaded once at startup and never mutated afterwards, so
/// plain `Arc` sharing suffices; handlers take read-only references.
#[derive(Clone)]
pub struct AppState {
    /// The component catalog.
    pub catalog: Arc<Catalog>,
    /// Fit-policy defaults and headrooms.
    pub policy: Arc<FitPolicy>,
    /// Optional narrator for `explain=true` annotations.
    pub narrator: Option<Arc<Narrator>>,
}

impl AppState {
    /// Create new app state around a loaded catalog.
    #[must_use]
    pub fn new(catalog: Catalog, policy: FitPolicy, narrator: Option<Narrator>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            policy: Arc::new(policy),
            narrator: narrator.map(Arc::new),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `RIGPLAN_CORS_ORIGINS` environment variable:
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("RIGPLAN_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (RIGPLAN_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in RIGPLAN_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No RIGPLAN_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. CORS - handles preflight requests
/// 2. Tracing - logs all requests
/// 3. Rate Limiting - protects against DoS (if enabled)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    // Check if rate limiting is enabled
    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    // Build base router with routes
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/fit", get(handlers::fit_handler))
        .route("/psu/check", get(handlers::psu_handler))
        .route("/mb", get(handlers::mb_handler))
        .route("/build/plan", get(handlers::plan_handler));

    // Apply rate limiting middleware
    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    // Apply CORS, body limit, and tracing (outermost layers)
    router
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), PlanError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PlanError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("rigplan HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| PlanError::Io(format!("Server error: {}", e)))
}
