//! docmill-server
//!
//! HTTP surface over the document pipeline: invoice generation, report
//! preview, and report download. The pipeline crate never depends on
//! anything in here.

pub mod error;
pub mod routes;
pub mod sample;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the service router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::banner))
        .route("/ping", get(routes::health::ping))
        .route("/api/pdf/generate", post(routes::pdf::generate_invoice))
        .route("/api/pdf/table/preview", get(routes::pdf::preview_table))
        .route("/api/pdf/table/generate", get(routes::pdf::generate_table))
        .layer(cors)
        .with_state(state)
}
