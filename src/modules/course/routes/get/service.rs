use super::types::{request, response};
use crate::{
    modules::course::{self, repository},
    types::Context,
    utils::database,
};
use std::{slice, sync::Arc};

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id = database::parse_id(&payload.id)?;

    let course = repository::find_by_id(&ctx.db_conn.pool, &id)
        .await?
        .ok_or_else(|| course::not_found(&id))?;

    let mut document = serde_json::to_value(course)?;
    repository::BOOTCAMP_SUMMARY
        .apply(&ctx.db_conn.pool, slice::from_mut(&mut document))
        .await?;

    Ok(response::Success::Course(document))
}
