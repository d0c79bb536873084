//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Upper bound for uploaded documents.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the application router with:
/// - WebSocket at `/ws` (one session per connection)
/// - REST-ish API under `/api/v1/...`, scoped by session id
/// - CORS (allow any origin/method/headers); adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/sessions", post(http::http_create_session))
        .route("/api/v1/sessions/:id", delete(http::http_delete_session))
        .route("/api/v1/sessions/:id/document", post(http::http_upload_document))
        .route("/api/v1/sessions/:id/summary", get(http::http_get_summary))
        .route("/api/v1/sessions/:id/ask", post(http::http_post_ask))
        .route(
            "/api/v1/sessions/:id/challenge",
            post(http::http_post_challenge).get(http::http_get_challenge),
        )
        .route("/api/v1/sessions/:id/challenge/regenerate", post(http::http_post_regenerate))
        .route("/api/v1/sessions/:id/answers", post(http::http_post_answers))
        // State + body limit + CORS + HTTP tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Prompts;

    const DOC: &str = "\
The bridge closed because inspectors found corrosion on several of its main support cables. \
Traffic was diverted to the northern crossing, which doubled commuting times for many drivers. \
Repairs will take eight months while engineers replace the damaged cables one section at a time. \
City officials compared the cost of repairs with the cost of building an entirely new bridge. \
Most residents support the repairs, although some argue the old structure should be retired.";

    fn app() -> Router {
        build_router(Arc::new(AppState::with_parts(Prompts::default(), None)))
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.expect("infallible");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json") };
        (status, json)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::builder().method(Method::POST).uri(uri).body(Body::empty()).expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    fn upload(uri: &str, file_name: &str, content_type: &str, content: &str) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n{content}\r\n--{boundary}--\r\n"
        );
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .expect("request")
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = call(app, post_empty("/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::CREATED);
        body["sessionId"].as_str().expect("session id").to_string()
    }

    #[tokio::test]
    async fn health() {
        let (status, body) = call(&app(), get("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn challenge_flow_over_http() {
        let app = app();
        let id = new_session(&app).await;
        let base = format!("/api/v1/sessions/{id}");

        let (status, _) = call(&app, post_empty(&format!("{base}/challenge"))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, doc) = call(&app, upload(&format!("{base}/document"), "bridge.txt", "text/plain", DOC)).await;
        assert_eq!(status, StatusCode::OK, "{doc}");
        assert_eq!(doc["fileName"], "bridge.txt");

        let (status, challenge) = call(&app, post_empty(&format!("{base}/challenge"))).await;
        assert_eq!(status, StatusCode::OK);
        let questions = challenge["questions"].as_array().expect("questions");
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q["source"]["kind"] == "document"));

        let (status, current) = call(&app, get(&format!("{base}/challenge"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(current["id"], challenge["id"]);

        let (status, eval) = call(
            &app,
            post_json(&format!("{base}/answers"), serde_json::json!({ "answers": ["", "because therefore"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = eval["results"].as_array().expect("results");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["tier"], "none");
        assert!(results[1].get("score").is_none());
        assert!(results[1]["reference"].as_str().is_some_and(|r| r.starts_with("Analysis should focus on: ")));

        let (status, _) = call(&app, post_empty(&format!("{base}/challenge/regenerate"))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, get(&format!("{base}/challenge"))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn ask_and_summary_over_http() {
        let app = app();
        let id = new_session(&app).await;
        let base = format!("/api/v1/sessions/{id}");
        call(&app, upload(&format!("{base}/document"), "bridge.txt", "text/plain", DOC)).await;

        let (status, qa) = call(
            &app,
            post_json(&format!("{base}/ask"), serde_json::json!({ "question": "Why did the bridge close?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(qa["justification"].as_str().is_some_and(|j| j.starts_with("The bridge closed")));

        let (status, summary) = call(&app, get(&format!("{base}/summary"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(summary["summary"].as_str().is_some_and(|s| !s.is_empty()));
    }

    #[tokio::test]
    async fn unsupported_upload_is_unprocessable() {
        let app = app();
        let id = new_session(&app).await;
        let (status, body) =
            call(&app, upload(&format!("/api/v1/sessions/{id}/document"), "img.png", "image/png", "xx")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().is_some_and(|e| e.contains("unsupported")));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let app = app();
        let (status, body) = call(&app, get("/api/v1/sessions/missing/challenge")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());

        let id = new_session(&app).await;
        let req = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/v1/sessions/{id}"))
            .body(Body::empty())
            .expect("request");
        let (status, _) = call(&app, req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
