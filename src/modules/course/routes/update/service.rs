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
    let body = payload.body;

    let mut tx = ctx.db_conn.pool.begin().await?;

    let course = repository::update_by_id(
        &mut *tx,
        &id,
        repository::UpdateCoursePayload {
            title: body.title,
            description: body.description,
            weeks: body.weeks,
            tuition: body.tuition,
            minimum_skill: body.minimum_skill,
            scholarship_available: body.scholarship_available,
        },
    )
    .await?
    .ok_or_else(|| course::not_found(&id))?;

    bootcamp::repository::update_average_cost(&mut *tx, &course.bootcamp).await?;

    tx.commit().await?;

    Ok(response::Success::CourseUpdated(course))
}
