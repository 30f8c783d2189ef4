use super::types::{request, response};
use crate::{
    modules::bootcamp::{self, repository},
    types::Context,
    utils::{database, geocoder},
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id = database::parse_id(&payload.id)?;

    let existing = repository::find_by_id(&ctx.db_conn.pool, &id)
        .await?
        .ok_or_else(|| bootcamp::not_found(&id))?;

    let body = payload.body;

    // Only a changed address is sent to the geocoder again.
    let location = match body.address.as_deref() {
        Some(address) if address != existing.address => {
            Some(geocoder::geocode(&ctx.geocoder, address).await?)
        }
        _ => None,
    };

    repository::update_by_id(
        &ctx.db_conn.pool,
        &id,
        repository::UpdateBootcampPayload {
            name: body.name,
            description: body.description,
            website: body.website,
            phone: body.phone,
            email: body.email,
            address: body.address,
            location,
            careers: body.careers,
            average_rating: body.average_rating,
            housing: body.housing,
            job_assistance: body.job_assistance,
            job_guarantee: body.job_guarantee,
            accept_gi: body.accept_gi,
        },
    )
    .await?
    .map(response::Success::BootcampUpdated)
    .ok_or_else(|| bootcamp::not_found(&id))
}
