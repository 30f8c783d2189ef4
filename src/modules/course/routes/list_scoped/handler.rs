use super::{service::service, types::request};
use crate::{types::Context, utils::query::ListingRequest};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Path(bootcamp_id): Path<String>,
    listing: ListingRequest,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            bootcamp_id,
            listing,
        },
    )
    .await
}
