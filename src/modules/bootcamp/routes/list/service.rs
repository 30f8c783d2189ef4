use super::types::{request, response};
use crate::{
    modules::bootcamp::repository::Bootcamp,
    types::Context,
    utils::query::{self, ListingOptions},
};
use std::sync::Arc;

const OPTIONS: ListingOptions = ListingOptions::new();

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    query::advanced_results::<Bootcamp>(&ctx.db_conn.pool, &OPTIONS, &payload.listing)
        .await
        .map(response::Success::Bootcamps)
}
