use crate::{modules, types::Context};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower_http::{cors, trace};

/// Room for the multipart framing around an upload of the maximum size.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

pub fn router(ctx: Arc<Context>) -> Router {
    let body_limit = usize::try_from(ctx.storage.max_file_upload)
        .unwrap_or(usize::MAX)
        .saturating_add(BODY_LIMIT_SLACK);

    Router::new()
        .nest("/api/v1", modules::get_router())
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(trace::TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_methods([
                    Method::OPTIONS,
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE])
                .allow_origin(cors::Any),
        )
}

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        let router = router(ctx.clone());
        Self { ctx, router }
    }

    pub async fn serve(self) -> Result<(), std::io::Error> {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await?;

        tracing::info!(
            "Server running in {:?} mode on {}",
            self.ctx.app.environment,
            address
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_context;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router(test_context()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_check_responds() {
        let (status, body) = send(get("/api/v1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn malformed_bootcamp_id_is_not_found() {
        let (status, body) = send(get("/api/v1/bootcamps/not-an-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "success": false, "error": "Resource not found with id of not-an-id" })
        );
    }

    #[tokio::test]
    async fn malformed_course_id_is_not_found() {
        let (status, _) = send(get("/api/v1/courses/not-an-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_filter_field_is_rejected() {
        let (status, body) = send(get("/api/v1/bootcamps?password=secret")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown field password");
    }

    #[tokio::test]
    async fn unknown_operator_is_rejected() {
        let (status, _) = send(get("/api/v1/courses?tuition%5Bne%5D=100")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_sort_field_is_rejected() {
        let (status, body) = send(get("/api/v1/bootcamps?sort=-secret")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown sort field secret");
    }

    #[tokio::test]
    async fn scoped_course_listing_checks_the_bootcamp_id() {
        let (status, _) = send(get("/api/v1/bootcamps/not-an-id/courses")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn course_for_malformed_bootcamp_is_not_found() {
        let (status, body) = send(json_request(
            Method::POST,
            "/api/v1/bootcamps/not-an-id/courses",
            json!({
                "title": "Front End Web Development",
                "description": "HTML, CSS and JavaScript",
                "weeks": 8,
                "tuition": 8000,
                "minimum_skill": "beginner",
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn invalid_course_is_rejected_with_every_message() {
        let (status, body) = send(json_request(
            Method::POST,
            "/api/v1/bootcamps/not-an-id/courses",
            json!({ "weeks": 0, "minimum_skill": "expert" }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let messages = body["error"].as_array().unwrap();
        assert!(messages.contains(&json!("Please add a course title")));
        assert!(messages.contains(&json!("Number of weeks must be at least 1")));
        assert!(messages.contains(&json!(
            "Minimum skill must be beginner, intermediate or advanced"
        )));
    }

    #[tokio::test]
    async fn empty_bootcamp_is_rejected() {
        let (status, body) = send(json_request(Method::POST, "/api/v1/bootcamps", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let messages = body["error"].as_array().unwrap();
        assert!(messages.contains(&json!("Please add a name")));
        assert!(messages.contains(&json!("Please add a description")));
        assert!(messages.contains(&json!("Please add an address")));
    }

    #[tokio::test]
    async fn unknown_career_is_rejected() {
        let (status, body) = send(json_request(
            Method::POST,
            "/api/v1/bootcamps",
            json!({
                "name": "Devworks Bootcamp",
                "description": "Full stack",
                "address": "233 Bay State Rd Boston MA 02215",
                "careers": ["Cooking"],
                "average_rating": 11,
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let messages = body["error"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages.contains(&json!("Rating must be between 1 and 10")));
    }

    #[tokio::test]
    async fn negative_radius_is_rejected() {
        let (status, body) = send(get("/api/v1/bootcamps/radius/02118/-5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid distance -5");
    }

    #[tokio::test]
    async fn photo_for_malformed_id_is_not_found() {
        let boundary = "X-DEVCAMPER-BOUNDARY";
        let request = Request::builder()
            .method(Method::PUT)
            .uri("/api/v1/bootcamps/not-an-id/photo")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(format!("--{}--\r\n", boundary)))
            .unwrap();

        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn photo_over_the_body_limit_is_too_large() {
        let boundary = "X-DEVCAMPER-BOUNDARY";
        let mut form = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n",
            boundary
        )
        .into_bytes();
        form.extend(std::iter::repeat(0u8).take(2_000_000));
        form.extend(format!("\r\n--{}--\r\n", boundary).into_bytes());

        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!(
                "/api/v1/bootcamps/{}/photo",
                crate::utils::database::new_id()
            ))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(form))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Please upload an image less than 1000000 bytes",
            })
        );
    }
}
