use super::types::{request, response};
use crate::{
    modules::course::repository::Course,
    types::Context,
    utils::{
        database,
        query::{self, ListingOptions},
    },
};
use std::sync::Arc;

const OPTIONS: ListingOptions = ListingOptions::new();

/// The path's bootcamp wins over any `bootcamp` filter in the query string.
pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let bootcamp_id = database::parse_id(&payload.bootcamp_id)?;
    let listing = payload.listing.scoped("bootcamp", bootcamp_id);

    query::advanced_results::<Course>(&ctx.db_conn.pool, &OPTIONS, &listing)
        .await
        .map(response::Success::Courses)
}
