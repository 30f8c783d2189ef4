use super::types::{request, response};
use crate::{
    modules::{bootcamp, course::repository},
    types::Context,
    utils::{database, error::ApiError},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let bootcamp_id = database::parse_id(&payload.bootcamp_id)?;

    let body = payload.body;
    // `required` on every field has already been enforced by the extractor.
    let (Some(title), Some(description), Some(weeks), Some(tuition), Some(minimum_skill)) = (
        body.title,
        body.description,
        body.weeks,
        body.tuition,
        body.minimum_skill,
    ) else {
        return Err(ApiError::Unexpected(String::from(
            "validated course payload is incomplete",
        )));
    };

    let mut tx = ctx.db_conn.pool.begin().await?;

    bootcamp::repository::find_by_id(&mut *tx, &bootcamp_id)
        .await?
        .ok_or_else(|| bootcamp::not_found(&bootcamp_id))?;

    let course = repository::create(
        &mut *tx,
        repository::CreateCoursePayload {
            title,
            description,
            weeks,
            tuition,
            minimum_skill,
            scholarship_available: body.scholarship_available,
            bootcamp_id: bootcamp_id.clone(),
        },
    )
    .await?;

    bootcamp::repository::update_average_cost(&mut *tx, &bootcamp_id).await?;

    tx.commit().await?;

    tracing::info!("Created course {} for bootcamp {}", course.id, bootcamp_id);

    Ok(response::Success::CourseCreated(course))
}
