use crate::utils::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Json, Request},
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

/// Field messages in a stable (field name) order.
pub fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields = errors.field_errors().into_iter().collect::<Vec<_>>();
    fields.sort_by_key(|(field, _)| field.to_string());

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect()
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(messages(&errors))
    }
}

pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Tells an explicit `null` (`Some(None)`) apart from an absent field
/// (`None`, via `#[serde(default)]`).
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// JSON body that has passed its `Validate` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}
