pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(
            required(message = "Please add a name"),
            length(max = 50, message = "Name can not be more than 50 characters")
        )]
        pub name: Option<String>,
        #[validate(
            required(message = "Please add a description"),
            length(max = 500, message = "Description can not be more than 500 characters")
        )]
        pub description: Option<String>,
        #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
        pub website: Option<String>,
        #[validate(length(max = 20, message = "Phone number can not be longer than 20 characters"))]
        pub phone: Option<String>,
        #[validate(email(message = "Please add a valid email"))]
        pub email: Option<String>,
        #[validate(required(message = "Please add an address"))]
        pub address: Option<String>,
        #[validate(
            required(message = "Please add at least one career"),
            custom(function = "crate::modules::bootcamp::validation::careers")
        )]
        pub careers: Option<Vec<String>>,
        #[validate(range(min = 1.0, max = 10.0, message = "Rating must be between 1 and 10"))]
        pub average_rating: Option<f64>,
        #[serde(default)]
        pub housing: bool,
        #[serde(default)]
        pub job_assistance: bool,
        #[serde(default)]
        pub job_guarantee: bool,
        #[serde(default)]
        pub accept_gi: bool,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::bootcamp::repository::Bootcamp, utils::error::ApiError};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        BootcampCreated(Bootcamp),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BootcampCreated(bootcamp) => (
                    StatusCode::CREATED,
                    Json(json!({ "success": true, "data": bootcamp })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
