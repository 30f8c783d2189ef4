use super::types::{request, response};
use crate::{
    modules::course::repository::{self, Course},
    types::Context,
    utils::query::{self, ListingOptions},
};
use std::sync::Arc;

const OPTIONS: ListingOptions = ListingOptions::expand(repository::BOOTCAMP_SUMMARY);

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    query::advanced_results::<Course>(&ctx.db_conn.pool, &OPTIONS, &payload.listing)
        .await
        .map(response::Success::Courses)
}
