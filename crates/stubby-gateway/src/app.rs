use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api/shorten", post(shorten_handler))
            .route("/{token}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use stubby_generator::{RandomGenerator, ScriptedGenerator};
    use stubby_shortener::ShortenerService;
    use stubby_storage::InMemoryStore;
    use tower::ServiceExt;

    const BASE_URL: &str = "http://127.0.0.1:8001";

    fn router() -> Router {
        let service = ShortenerService::new(InMemoryStore::new(), RandomGenerator::new());
        App::router(AppState::new(Arc::new(service), BASE_URL))
    }

    fn shorten_request(body: Value) -> Request<Body> {
        Request::post("/api/shorten")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health() {
        let response = router().oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn shorten_then_redirect() {
        let app = router();
        let original = "https://www.rfc-editor.org/rfc/rfc1738";

        let response = app
            .clone()
            .oneshot(shorten_request(json!({ "original_url": original })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        let shortened = body["shortened_url"].as_str().unwrap();
        let token = shortened
            .strip_prefix(&format!("{BASE_URL}/"))
            .expect("shortened url under the public base url");
        assert_eq!(token.len(), 8);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

        let response = app
            .oneshot(get_request(&format!("/{token}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], original);
    }

    #[tokio::test]
    async fn shortened_url_uses_scripted_token() {
        let service = ShortenerService::new(
            InMemoryStore::new(),
            ScriptedGenerator::new(["b1wyI9He"]).unwrap(),
        );
        let app = App::router(AppState::new(Arc::new(service), format!("{BASE_URL}/")));

        let response = app
            .oneshot(shorten_request(json!({ "original_url": "https://example.com" })))
            .await
            .unwrap();

        assert_eq!(
            json_body(response).await,
            json!({ "shortened_url": "http://127.0.0.1:8001/b1wyI9He" })
        );
    }

    #[tokio::test]
    async fn invalid_url_is_unprocessable() {
        let response = router()
            .oneshot(shorten_request(json!({ "original_url": "not-a-url" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"], "invalid_url");
    }

    #[tokio::test]
    async fn url_with_line_breaks_is_unprocessable() {
        let response = router()
            .oneshot(shorten_request(
                json!({ "original_url": "https://exa\nmple.com/a\r\nSet-Cookie: x=1" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"], "invalid_url");
    }

    #[tokio::test]
    async fn missing_url_is_unprocessable() {
        let response = router().oneshot(shorten_request(json!({}))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"], "invalid_url");
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let request = Request::post("/api/shorten")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let response = router().oneshot(get_request("/zzzzzzzz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "not_found");
    }

    #[tokio::test]
    async fn non_token_path_is_not_found() {
        let response = router().oneshot(get_request("/not-a-token")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
