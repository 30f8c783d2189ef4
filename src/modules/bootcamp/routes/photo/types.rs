pub mod request {
    use crate::utils::error::ApiError;
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;

    /// Size is checked against the configured ceiling after the upload lands.
    #[derive(TryFromMultipart)]
    pub struct Body {
        #[form_data(limit = "unlimited")]
        pub file: Option<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Result<Body, ApiError>,
    }
}

pub mod response {
    use crate::utils::error::ApiError;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        PhotoUploaded(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PhotoUploaded(file_name) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": file_name })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
