use crate::types::GeocoderContext;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to geocode location")]
    RequestFailed,
    #[error("No location found for {0}")]
    NoMatch(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    locations: Vec<ProviderLocation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderLocation {
    lat_lng: LatLng,
    street: Option<String>,
    #[serde(rename = "adminArea5")]
    city: Option<String>,
    #[serde(rename = "adminArea3")]
    state: Option<String>,
    postal_code: Option<String>,
    #[serde(rename = "adminArea1")]
    country: Option<String>,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl From<ProviderLocation> for GeoLocation {
    fn from(location: ProviderLocation) -> Self {
        let street = non_empty(location.street);
        let city = non_empty(location.city);
        let state = non_empty(location.state);
        let zipcode = non_empty(location.postal_code);
        let country = non_empty(location.country);

        let region = [state.clone(), zipcode.clone()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let formatted_address = [street.clone(), city.clone(), Some(region), country.clone()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            latitude: location.lat_lng.lat,
            longitude: location.lat_lng.lng,
            formatted_address,
            street,
            city,
            state,
            zipcode,
            country,
        }
    }
}

fn first_match(body: &str, query: &str) -> Result<GeoLocation, Error> {
    let response = serde_json::de::from_str::<GeocodeResponse>(body).map_err(|err| {
        tracing::error!("Failed to deserialize geocoder response: {:?}", err);
        Error::RequestFailed
    })?;

    response
        .results
        .into_iter()
        .flat_map(|result| result.locations)
        .next()
        .map(GeoLocation::from)
        .ok_or_else(|| Error::NoMatch(query.to_string()))
}

/// Resolves a free-form address or postal code to its first match.
pub async fn geocode(cfg: &GeocoderContext, query: &str) -> Result<GeoLocation, Error> {
    let res = cfg
        .client
        .get(&cfg.endpoint)
        .query(&[
            ("key", cfg.api_key.as_str()),
            ("location", query),
            ("maxResults", "1"),
        ])
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to geocode {}: {:?}", query, err);
            Error::RequestFailed
        })?;

    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!("Error occurred while processing geocoder response: {:?}", err);
        Error::RequestFailed
    })?;

    if !status.is_success() {
        tracing::error!("Geocoder responded with {}: {}", status, data);
        return Err(Error::RequestFailed);
    }

    first_match(&data, query)
}
