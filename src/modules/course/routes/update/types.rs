pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, message = "Please add a course title"))]
        pub title: Option<String>,
        #[validate(length(min = 1, message = "Please add a description"))]
        pub description: Option<String>,
        #[validate(range(min = 1, message = "Number of weeks must be at least 1"))]
        pub weeks: Option<i32>,
        #[validate(range(min = 0, message = "Tuition cost can not be negative"))]
        pub tuition: Option<i32>,
        #[validate(custom(function = "crate::modules::course::repository::validate_minimum_skill"))]
        pub minimum_skill: Option<String>,
        pub scholarship_available: Option<bool>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::course::repository::Course, utils::error::ApiError};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        CourseUpdated(Course),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CourseUpdated(course) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": course })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
