pub mod repository;
mod routes;
mod validation;

pub use routes::get_router;

use crate::utils::error::ApiError;

pub fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Bootcamp not found with id of {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn missing_bootcamp_names_the_id() {
        let response = not_found("01J0ZZZZZZZZZZZZZZZZZZZZZZ").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Bootcamp not found with id of 01J0ZZZZZZZZZZZZZZZZZZZZZZ",
            })
        );
    }
}
