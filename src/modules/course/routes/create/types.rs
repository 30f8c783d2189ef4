pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(required(message = "Please add a course title"))]
        pub title: Option<String>,
        #[validate(required(message = "Please add a description"))]
        pub description: Option<String>,
        #[validate(
            required(message = "Please add number of weeks"),
            range(min = 1, message = "Number of weeks must be at least 1")
        )]
        pub weeks: Option<i32>,
        #[validate(
            required(message = "Please add a tuition cost"),
            range(min = 0, message = "Tuition cost can not be negative")
        )]
        pub tuition: Option<i32>,
        #[validate(
            required(message = "Please add a minimum skill"),
            custom(function = "crate::modules::course::repository::validate_minimum_skill")
        )]
        pub minimum_skill: Option<String>,
        #[serde(default)]
        pub scholarship_available: bool,
    }

    pub struct Payload {
        pub bootcamp_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::course::repository::Course, utils::error::ApiError};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        CourseCreated(Course),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CourseCreated(course) => (
                    StatusCode::CREATED,
                    Json(json!({ "success": true, "data": course })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
