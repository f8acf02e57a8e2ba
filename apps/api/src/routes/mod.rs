pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/reports", post(handlers::handle_generate_report))
        .route("/api/v1/jobs/analyze", post(handlers::handle_analyze_job))
        .route(
            "/api/v1/resumes/analyze",
            post(handlers::handle_analyze_resume),
        )
        .with_state(state)
}
