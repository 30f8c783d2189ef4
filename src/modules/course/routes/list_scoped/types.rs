pub mod request {
    use crate::utils::query::ListingRequest;

    pub struct Payload {
        pub bootcamp_id: String,
        pub listing: ListingRequest,
    }
}

pub mod response {
    use crate::utils::{error::ApiError, pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    pub enum Success {
        Courses(Paginated<Value>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Courses(courses) => (StatusCode::OK, Json(courses)).into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
