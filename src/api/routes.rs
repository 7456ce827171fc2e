use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(crate::api::handlers::root))
        .route("/upload", post(crate::api::handlers::upload::upload))
        .route("/chat", post(crate::api::handlers::chat::chat))
        .route("/models", get(crate::api::handlers::models::list_models))
}
