use super::types::{request, response};
use crate::{
    modules::bootcamp::{self, repository},
    types::Context,
    utils::database,
};
use std::sync::Arc;

/// Courses of the bootcamp go with it (`ON DELETE CASCADE`).
pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id = database::parse_id(&payload.id)?;

    let bootcamp = repository::delete_by_id(&ctx.db_conn.pool, &id)
        .await?
        .ok_or_else(|| bootcamp::not_found(&id))?;

    tracing::info!("Deleted bootcamp {}", bootcamp.id);

    Ok(response::Success::BootcampDeleted)
}
