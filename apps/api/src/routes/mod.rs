pub mod analyze;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(analyze::analyze_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use resume_scorer::ResumeEngine;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn app(config: Config) -> Router {
        let engine = ResumeEngine::with_defaults().expect("default engine builds");
        build_router(AppState {
            engine: Arc::new(engine),
            config,
        })
    }

    async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(Config::for_tests()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-scorer");
    }

    #[tokio::test]
    async fn test_analyze_returns_full_result() {
        let (status, body) = post_json(
            app(Config::for_tests()),
            json!({
                "resume_text": "Experience:\n- Built X for 40 users\nSkills: Python\nContact: a@b.com",
                "job_description": "Python and Rust"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["critical_failure"], false);
        assert_eq!(body["breakdown_max"]["content_quality"], 35.0);
        assert_eq!(body["criteria"].as_array().map(Vec::len), Some(15));
        assert_eq!(body["findings"]["keywords"]["matched_keywords"], json!(["python"]));
    }

    #[tokio::test]
    async fn test_empty_text_is_a_gated_result() {
        let (status, body) = post_json(app(Config::for_tests()), json!({ "resume_text": "" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 0);
        assert_eq!(body["critical_failure"], true);
        assert_eq!(body["performance_tier"]["label"], "Incomplete Resume");
    }

    #[tokio::test]
    async fn test_oversized_text_rejected() {
        let config = Config {
            max_resume_bytes: 10,
            ..Config::for_tests()
        };
        let (status, body) = post_json(app(config), json!({ "resume_text": "x".repeat(11) })).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_missing_field_is_a_validation_error() {
        let (status, body) =
            post_json(app(Config::for_tests()), json!({ "job_description": "Rust" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
