use crate::utils::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
    RequestPartsExt,
};

/// Query parameters that steer the listing instead of filtering it.
pub const CONTROL_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];

/// Raw query parameters of a listing request, in the order they were sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRequest {
    params: Vec<(String, String)>,
}

impl ListingRequest {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Every parameter except the control keys.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter(|(name, _)| !CONTROL_KEYS.contains(&name.as_str()))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Pins `key` to `value`, replacing whatever the client sent for it.
    pub fn scoped(mut self, key: &str, value: String) -> Self {
        self.params.retain(|(name, _)| {
            name != key && !name.strip_prefix(key).is_some_and(|rest| rest.starts_with('['))
        });
        self.params.push((key.to_string(), value));
        self
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ListingRequest {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extract::<Query<Vec<(String, String)>>>().await {
            Ok(Query(params)) => Ok(Self::new(params)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}
