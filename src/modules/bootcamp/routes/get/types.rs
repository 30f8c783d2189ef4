pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::{modules::bootcamp::repository::Bootcamp, utils::error::ApiError};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Bootcamp(Bootcamp),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Bootcamp(bootcamp) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": bootcamp })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
