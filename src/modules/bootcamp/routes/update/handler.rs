use super::{service::service, types::request};
use crate::{types::Context, utils::validation::ValidatedJson};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<request::Body>,
) -> impl IntoResponse {
    service(ctx, request::Payload { id, body }).await
}
