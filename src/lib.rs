//! Student Registry: JSON REST backend for student records.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreBackend};
pub use error::{AppError, ConfigError};
pub use migration::{ensure_students_table, seed_fixtures};
pub use model::{NewStudent, Student, StudentPayload};
pub use routes::{common_routes, student_routes};
pub use service::StudentService;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStudentStore, PgStudentStore, StudentStore};

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Full router: common routes plus student routes, with request tracing and a body size limit.
/// Oversized bodies are rejected by the JSON extractor, so they render the standard error body.
pub fn app(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(student_routes(state))
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
