use super::{service::service, types::request};
use crate::{types::Context, utils::query::ListingRequest};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    listing: ListingRequest,
) -> impl IntoResponse {
    service(ctx, request::Payload { listing }).await
}
