use super::types::{request, response};
use crate::{
    modules::bootcamp::{self, repository},
    types::Context,
    utils::{database, storage},
};
use std::sync::Arc;

/// Checks run in order: id is well formed, the form was read whole, bootcamp
/// exists, a file was sent, it is an image, it fits under the configured
/// ceiling.
pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id = database::parse_id(&payload.id)?;
    let body = payload.body?;

    repository::find_by_id(&ctx.db_conn.pool, &id)
        .await?
        .ok_or_else(|| bootcamp::not_found(&id))?;

    let upload = body.file.ok_or(storage::Error::MissingFile)?;
    let size = storage::file_size(&upload.contents).await?;

    storage::validate_image(
        upload.metadata.content_type.as_deref(),
        size,
        ctx.storage.max_file_upload,
    )?;

    let file_name = storage::photo_file_name(&id, upload.metadata.file_name.as_deref());
    storage::persist_file(&ctx.storage, upload.contents, &file_name).await?;

    repository::update_photo(&ctx.db_conn.pool, &id, &file_name).await?;

    Ok(response::Success::PhotoUploaded(file_name))
}
