pub mod request {
    use crate::utils::validation::nullable;
    use serde::Deserialize;
    use validator::Validate;

    /// Every field is optional; only the ones present are changed. `website`,
    /// `phone`, `email` and `average_rating` are cleared by an explicit `null`.
    #[derive(Deserialize, Validate, Default)]
    pub struct Body {
        #[validate(length(min = 1, max = 50, message = "Name can not be more than 50 characters"))]
        pub name: Option<String>,
        #[validate(length(
            min = 1,
            max = 500,
            message = "Description can not be more than 500 characters"
        ))]
        pub description: Option<String>,
        #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
        #[serde(default, deserialize_with = "nullable")]
        pub website: Option<Option<String>>,
        #[validate(length(max = 20, message = "Phone number can not be longer than 20 characters"))]
        #[serde(default, deserialize_with = "nullable")]
        pub phone: Option<Option<String>>,
        #[validate(email(message = "Please add a valid email"))]
        #[serde(default, deserialize_with = "nullable")]
        pub email: Option<Option<String>>,
        #[validate(length(min = 1, message = "Please add an address"))]
        pub address: Option<String>,
        #[validate(custom(function = "crate::modules::bootcamp::validation::careers"))]
        pub careers: Option<Vec<String>>,
        #[validate(range(min = 1.0, max = 10.0, message = "Rating must be between 1 and 10"))]
        #[serde(default, deserialize_with = "nullable")]
        pub average_rating: Option<Option<f64>>,
        pub housing: Option<bool>,
        pub job_assistance: Option<bool>,
        pub job_guarantee: Option<bool>,
        pub accept_gi: Option<bool>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
    }
}

#[cfg(test)]
mod tests {
    use super::request::Body;
    use validator::Validate;

    #[test]
    fn null_clears_and_absent_keeps() {
        let body: Body = serde_json::from_str(
            r#"{ "website": null, "phone": "(111) 111-1111", "average_rating": null }"#,
        )
        .unwrap();

        assert_eq!(body.website, Some(None));
        assert_eq!(body.phone, Some(Some(String::from("(111) 111-1111"))));
        assert_eq!(body.email, None);
        assert_eq!(body.average_rating, Some(None));
        assert!(body.validate().is_ok());
    }

    #[test]
    fn present_values_are_still_validated() {
        let body: Body =
            serde_json::from_str(r#"{ "website": "not a url", "average_rating": 11 }"#).unwrap();

        assert!(body.validate().is_err());
    }
}

pub mod response {
    use crate::{modules::bootcamp::repository::Bootcamp, utils::error::ApiError};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        BootcampUpdated(Bootcamp),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BootcampUpdated(bootcamp) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": bootcamp })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, ApiError>;
}
