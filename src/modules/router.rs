use super::{bootcamp, course};
use crate::types::Context;
use axum::{
    extract::Json,
    response::IntoResponse,
    routing::{get, Router},
};
use serde_json::json;
use std::sync::Arc;

async fn health_check() -> impl IntoResponse {
    Json(json!({ "success": true, "data": "ok" }))
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(health_check))
        .nest("/bootcamps", bootcamp::get_router())
        .nest("/bootcamps/:id/courses", course::get_scoped_router())
        .nest("/courses", course::get_router())
}
