pub mod request {
    pub struct Payload {
        pub zipcode: String,
        pub distance: String,
    }
}

pub mod response {
    use crate::{modules::bootcamp::repository::Bootcamp, utils::error::ApiError};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Bootcamps(Vec<Bootcamp>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Bootcamps(bootcamps) => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "count": bootcamps.len(),
                        "data": bootcamps,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
