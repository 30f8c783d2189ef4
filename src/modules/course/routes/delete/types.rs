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
        CourseDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CourseDeleted => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": {} })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::response::Success;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};

    #[tokio::test]
    async fn deleted_course_body_is_empty_data() {
        let response = Success::CourseDeleted.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"success":true,"data":{}}"#);
    }
}
