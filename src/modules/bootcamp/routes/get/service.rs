use super::types::{request, response};
use crate::{
    modules::bootcamp::{self, repository},
    types::Context,
    utils::database,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id = database::parse_id(&payload.id)?;

    repository::find_by_id(&ctx.db_conn.pool, &id)
        .await?
        .map(response::Success::Bootcamp)
        .ok_or_else(|| bootcamp::not_found(&id))
}
