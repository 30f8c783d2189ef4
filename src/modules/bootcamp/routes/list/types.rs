pub mod request {
    use crate::utils::query::ListingRequest;

    pub struct Payload {
        pub listing: ListingRequest,
    }
}

pub mod response {
    use crate::utils::{error::ApiError, pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    pub enum Success {
        Bootcamps(Paginated<Value>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Bootcamps(bootcamps) => (StatusCode::OK, Json(bootcamps)).into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
