use super::types::{request, response};
use crate::{
    modules::bootcamp::repository,
    types::Context,
    utils::{error::ApiError, geocoder},
};
use std::sync::Arc;

pub fn parse_distance(raw: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|distance| distance.is_finite() && *distance >= 0.0)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid distance {}", raw)))
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let distance = parse_distance(&payload.distance)?;
    let point = geocoder::geocode(&ctx.geocoder, &payload.zipcode).await?;

    let bootcamps = repository::find_within_radius(
        &ctx.db_conn.pool,
        point.latitude,
        point.longitude,
        repository::angular_radius(distance),
    )
    .await?;

    tracing::debug!(
        "Found {} bootcamps within {}km of {}",
        bootcamps.len(),
        distance,
        payload.zipcode
    );

    Ok(response::Success::Bootcamps(bootcamps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_must_be_a_non_negative_number() {
        assert_eq!(parse_distance("10").unwrap(), 10.0);
        assert_eq!(parse_distance("0").unwrap(), 0.0);
        assert_eq!(parse_distance("2.5").unwrap(), 2.5);
        assert!(parse_distance("-1").is_err());
        assert!(parse_distance("far").is_err());
        assert!(parse_distance("NaN").is_err());
        assert!(parse_distance("inf").is_err());
    }
}
