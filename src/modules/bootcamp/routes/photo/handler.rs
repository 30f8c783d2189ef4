use super::{service::service, types::request};
use crate::{
    types::Context,
    utils::{error::ApiError, storage},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_typed_multipart::{TypedMultipart, TypedMultipartError};
use std::sync::Arc;

/// A form cut off by the body limit is reported as an oversized image.
pub fn rejection(err: TypedMultipartError, max_file_upload: u64) -> ApiError {
    match err.get_status() {
        StatusCode::PAYLOAD_TOO_LARGE => storage::Error::TooLarge(max_file_upload).into(),
        _ => ApiError::BadRequest(err.to_string()),
    }
}

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Path(id): Path<String>,
    body: Result<TypedMultipart<request::Body>, TypedMultipartError>,
) -> impl IntoResponse {
    let body = body
        .map(|TypedMultipart(body)| body)
        .map_err(|err| rejection(err, ctx.storage.max_file_upload));

    service(ctx, request::Payload { id, body }).await
}
