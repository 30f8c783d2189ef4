use super::types::{request, response};
use crate::{
    modules::{
        bootcamp,
        course::{self, repository},
    },
    types::Context,
    utils::database,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id = database::parse_id(&payload.id)?;

    let mut tx = ctx.db_conn.pool.begin().await?;

    let course = repository::delete_by_id(&mut *tx, &id)
        .await?
        .ok_or_else(|| course::not_found(&id))?;

    bootcamp::repository::update_average_cost(&mut *tx, &course.bootcamp).await?;

    tx.commit().await?;

    Ok(response::Success::CourseDeleted)
}
