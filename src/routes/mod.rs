//! Router assembly: operational routes, entry routes and the middleware stack.

pub mod common;
pub mod entry;

pub use common::operational_routes;
pub use entry::entry_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::{error_handling::HandleErrorLayer, extract::DefaultBodyLimit, BoxError, Router};
use std::time::Duration;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Middleware limits applied to every route.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    pub request_timeout: Duration,
    pub body_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            request_timeout: Duration::from_secs(30),
            body_limit: 64 * 1024,
        }
    }
}

/// Full application router. A request that outlives `request_timeout` is
/// dropped, which rolls back its open transaction and returns its connection.
pub fn app(state: AppState, limits: Limits) -> Router {
    Router::new()
        .merge(operational_routes(state.clone()))
        .merge(entry_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(HandleErrorLayer::new(middleware_error))
                .layer(TimeoutLayer::new(limits.request_timeout))
                .layer(DefaultBodyLimit::max(limits.body_limit)),
        )
}

/// Middleware failures answer with the same error body as handler failures.
async fn middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(err.to_string())
    }
}
