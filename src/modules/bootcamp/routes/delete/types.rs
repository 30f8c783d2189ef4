pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::utils::error::ApiError;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        BootcampDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BootcampDeleted => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": {} })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
