use super::types::{request, response};
use crate::{
    modules::bootcamp::repository,
    types::Context,
    utils::{error::ApiError, geocoder},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let body = payload.body;
    // `required` on every field has already been enforced by the extractor.
    let (Some(name), Some(description), Some(address), Some(careers)) =
        (body.name, body.description, body.address, body.careers)
    else {
        return Err(ApiError::Unexpected(String::from(
            "validated bootcamp payload is incomplete",
        )));
    };

    let location = geocoder::geocode(&ctx.geocoder, &address).await?;

    let bootcamp = repository::create(
        &ctx.db_conn.pool,
        repository::CreateBootcampPayload {
            name,
            description,
            website: body.website,
            phone: body.phone,
            email: body.email,
            address,
            location,
            careers,
            average_rating: body.average_rating,
            housing: body.housing,
            job_assistance: body.job_assistance,
            job_guarantee: body.job_guarantee,
            accept_gi: body.accept_gi,
        },
    )
    .await?;

    tracing::info!("Created bootcamp {} ({})", bootcamp.id, bootcamp.slug);

    Ok(response::Success::BootcampCreated(bootcamp))
}
