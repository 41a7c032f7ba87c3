use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use gatehouse_core::health::{healthz, readyz};
use gatehouse_core::middleware::request_id_layer;

use crate::handlers::{
    codes::rotate_codes,
    gate::{landing, recover_code, submit_code},
    pages::{data_stream, knowledge_hub, status},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Gate
        .route("/", get(landing))
        .route("/gate", post(submit_code))
        .route("/gate/recovery", get(recover_code))
        // Code rotation
        .route("/codes", post(rotate_codes))
        // Pages
        .route("/status", get(status))
        .route("/stream", get(data_stream))
        .route("/hub", get(knowledge_hub))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
