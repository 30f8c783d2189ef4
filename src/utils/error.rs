use crate::utils::{geocoder, storage};
use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};

const UNIQUE_VIOLATION: &str = "23505";
const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Every failure a handler can signal. Responses are only ever built from
/// this type, in [`IntoResponse`], which is also where failures are logged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("Resource not found with id of {0}")]
    MalformedId(String),
    #[error("Duplicate field value entered")]
    Duplicate,
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Upload(#[from] storage::Error),
    #[error(transparent)]
    Geocoder(#[from] geocoder::Error),
    #[error("Server Error")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::MalformedId(_) => StatusCode::NOT_FOUND,
            Self::Duplicate | Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upload(storage::Error::WriteFailed) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upload(_) => StatusCode::BAD_REQUEST,
            Self::Geocoder(geocoder::Error::NoMatch(_)) => StatusCode::NOT_FOUND,
            Self::Geocoder(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        let error = match self {
            Self::Validation(messages) => json!(messages),
            other => json!(other.to_string()),
        };

        json!({ "success": false, "error": error })
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound(String::from("Resource not found")),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => Self::Duplicate,
                Some(NOT_NULL_VIOLATION) | Some(CHECK_VIOLATION) => {
                    Self::Validation(vec![db_err.message().to_string()])
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    Self::NotFound(String::from("Referenced resource not found"))
                }
                _ => Self::Unexpected(err.to_string()),
            },
            _ => Self::Unexpected(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{:?}", self);
        } else {
            tracing::warn!("{}: {}", status, self);
        }

        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_maps_to_not_found() {
        let err = ApiError::MalformedId(String::from("abc"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.body(),
            json!({ "success": false, "error": "Resource not found with id of abc" })
        );
    }

    #[test]
    fn validation_messages_are_returned_as_a_list() {
        let err = ApiError::Validation(vec![
            String::from("Please add a name"),
            String::from("Please add a description"),
        ]);

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body()["error"],
            json!(["Please add a name", "Please add a description"])
        );
        assert_eq!(err.to_string(), "Please add a name, Please add a description");
    }

    #[test]
    fn upload_failures_split_between_client_and_server() {
        assert_eq!(
            ApiError::from(storage::Error::MissingFile).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(storage::Error::WriteFailed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unexpected_errors_hide_their_details() {
        let err = ApiError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), json!({ "success": false, "error": "Server Error" }));
    }

    #[test]
    fn missing_row_maps_to_not_found() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
