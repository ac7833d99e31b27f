//! HTTP surface for docsum.
//!
//! This module exposes a compact Axum router:
//!
//! - `POST /api/summarize` – Multipart form with an optional `text` field and an optional `file`
//!   field (PDF, DOCX, or TXT). Returns `{ title, outline, bullets, keywords, word_count,
//!   processing_time_ms }`, or `{ error }` with status 400 for input problems and 500 for
//!   backend or unexpected failures.
//! - `GET /metrics` – Summarization counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools/hosts.

use crate::extraction::UploadedFile;
use crate::metrics::MetricsSnapshot;
use crate::processing::{SummarizeApi, SummarizeError, SummarizeInput, SummaryResult};
use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Room left in the request body limit for multipart boundaries and the `text` field.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the HTTP router exposing the summarization API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: SummarizeApi + 'static,
{
    let limit = body_limit(service.max_upload_bytes());
    Router::new()
        .route("/api/summarize", post(summarize_document::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(service)
}

fn body_limit(upload_limit: usize) -> usize {
    upload_limit.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

/// Summarize pasted text or an uploaded document.
async fn summarize_document<S>(
    State(service): State<Arc<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResult>, AppError>
where
    S: SummarizeApi,
{
    let input = match read_request(multipart, body_limit(service.max_upload_bytes())).await {
        Ok(input) => input,
        Err(error) => {
            service.record_rejection();
            tracing::warn!(error = %error, "Unreadable summarize request");
            return Err(error.into());
        }
    };
    let result = service.summarize(input).await?;
    Ok(Json(result))
}

async fn read_request(
    multipart: Result<Multipart, MultipartRejection>,
    body_limit: usize,
) -> Result<SummarizeInput, SummarizeError> {
    let multipart =
        multipart.map_err(|rejection| SummarizeError::MalformedRequest(rejection.body_text()))?;
    read_submission(multipart, body_limit).await
}

/// Collect the `text` and `file` fields; other fields are ignored.
async fn read_submission(
    mut multipart: Multipart,
    body_limit: usize,
) -> Result<SummarizeInput, SummarizeError> {
    let mut input = SummarizeInput::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| map_multipart_error(error, body_limit))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("text") => {
                let value = field
                    .text()
                    .await
                    .map_err(|error| map_multipart_error(error, body_limit))?;
                input.text = Some(value);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|error| map_multipart_error(error, body_limit))?;
                input.file = Some(UploadedFile::new(file_name, bytes.to_vec()));
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }
    Ok(input)
}

fn map_multipart_error(error: MultipartError, body_limit: usize) -> SummarizeError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SummarizeError::BodyTooLarge { limit: body_limit }
    } else {
        SummarizeError::MalformedRequest(error.body_text())
    }
}

/// Return summarization counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: SummarizeApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery/UX in hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "summarize",
                method: "POST",
                path: "/api/summarize",
                description: "Summarize pasted text or an uploaded PDF/DOCX/TXT file (multipart/form-data). Response returns { \"title\", \"outline\", \"bullets\", \"keywords\", \"word_count\", \"processing_time_ms\" }.",
                request_example: Some(json!({
                    "text": "Optional pasted text",
                    "file": "@document.pdf"
                })),
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return summarization counters useful for observability dashboards.",
                request_example: None,
            },
        ],
    })
}

struct AppError(SummarizeError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<SummarizeError> for AppError {
    fn from(inner: SummarizeError) -> Self {
        Self(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{create_router, get_commands};
    use crate::metrics::MetricsSnapshot;
    use crate::processing::{SummarizeApi, SummarizeError, SummarizeInput, SummaryResult};
    use crate::summarization::SummarizationClientError;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use reqwest::StatusCode as BackendStatus;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "docsum-test-boundary";

    enum StubOutcome {
        Success,
        NoInput,
        BackendFailure,
    }

    struct StubSummarizeService {
        calls: Arc<Mutex<Vec<SummarizeInput>>>,
        outcome: StubOutcome,
        max_upload_bytes: usize,
        rejections: AtomicUsize,
    }

    impl StubSummarizeService {
        fn new(outcome: StubOutcome) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                outcome,
                max_upload_bytes: 1024,
                rejections: AtomicUsize::new(0),
            }
        }

        async fn recorded_calls(&self) -> Vec<SummarizeInput> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl SummarizeApi for StubSummarizeService {
        async fn summarize(
            &self,
            input: SummarizeInput,
        ) -> Result<SummaryResult, SummarizeError> {
            self.calls.lock().await.push(input);
            match self.outcome {
                StubOutcome::Success => Ok(SummaryResult {
                    title: "title".into(),
                    outline: vec![],
                    bullets: vec!["one".into(), "two".into()],
                    keywords: vec![],
                    word_count: 2,
                    processing_time_ms: 7,
                }),
                StubOutcome::NoInput => Err(SummarizeError::NoInputProvided),
                StubOutcome::BackendFailure => Err(SummarizeError::Backend(
                    SummarizationClientError::GenerationFailed {
                        status: BackendStatus::UNAUTHORIZED,
                        body: "invalid api key".into(),
                    },
                )),
            }
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot {
                documents_summarized: 4,
                chunks_summarized: 9,
                rejected_requests: 2,
                failed_requests: 1,
                average_processing_ms: Some(120),
            }
        }

        fn max_upload_bytes(&self) -> usize {
            self.max_upload_bytes
        }

        fn record_rejection(&self) {
            self.rejections.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn text_part(name: &str, value: &str) -> Vec<u8> {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
        .into_bytes()
    }

    fn file_part(file_name: &str, content: &[u8]) -> Vec<u8> {
        let mut part = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        part.extend_from_slice(content);
        part.extend_from_slice(b"\r\n");
        part
    }

    fn multipart_request(parts: Vec<Vec<u8>>) -> Request<Body> {
        let mut body: Vec<u8> = parts.into_iter().flatten().collect();
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(Method::POST)
            .uri("/api/summarize")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json body")
    }

    #[tokio::test]
    async fn commands_catalog_exposes_summarize_endpoint() {
        let response = get_commands().await;
        let commands = response.0.commands;
        let summarize = commands
            .iter()
            .find(|cmd| cmd.name == "summarize")
            .expect("summarize command present");

        assert_eq!(summarize.method, "POST");
        assert_eq!(summarize.path, "/api/summarize");
        assert!(summarize.description.to_lowercase().contains("multipart"));
    }

    #[tokio::test]
    async fn summarize_route_forwards_text_field() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::Success));
        let app = create_router(service.clone());

        let response = app
            .oneshot(multipart_request(vec![text_part("text", "Hello world.")]))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["bullets"], serde_json::json!(["one", "two"]));
        assert_eq!(json["word_count"], 2);
        assert_eq!(json["processing_time_ms"], 7);
        assert_eq!(json["outline"], serde_json::json!([]));

        let calls = service.recorded_calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text.as_deref(), Some("Hello world."));
        assert!(calls[0].file.is_none());
    }

    #[tokio::test]
    async fn summarize_route_forwards_file_field() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::Success));
        let app = create_router(service.clone());

        let response = app
            .oneshot(multipart_request(vec![
                text_part("ignored", "x"),
                file_part("notes.txt", b"file body"),
            ]))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let calls = service.recorded_calls().await;
        let file = calls[0].file.as_ref().expect("file forwarded");
        assert_eq!(file.file_name, "notes.txt");
        assert_eq!(file.bytes, b"file body");
        assert!(calls[0].text.is_none());
    }

    #[tokio::test]
    async fn validation_failures_return_json_400() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::NoInput));
        let app = create_router(service);

        let response = app
            .oneshot(multipart_request(vec![]))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn backend_failures_return_json_500() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::BackendFailure));
        let app = create_router(service);

        let response = app
            .oneshot(multipart_request(vec![text_part("text", "Hello")]))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert!(
            json["error"]
                .as_str()
                .is_some_and(|msg| msg.contains("invalid api key"))
        );
    }

    #[tokio::test]
    async fn non_multipart_body_is_rejected_as_json() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::Success));
        let app = create_router(service.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text":"hi"}"#))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
        assert!(service.recorded_calls().await.is_empty());
        assert_eq!(service.rejections.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn body_beyond_limit_is_rejected_as_oversized_request() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::Success));
        let app = create_router(service.clone());
        let oversized = vec![b'a'; 2 * 1024 * 1024 + 10];

        let response = app
            .oneshot(multipart_request(vec![file_part("big.txt", &oversized)]))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        let message = json["error"].as_str().expect("error message");
        assert!(message.starts_with("request body exceeds"));
        assert!(message.contains(&(1024 + 1024 * 1024).to_string()));
        assert!(service.recorded_calls().await.is_empty());
        assert_eq!(service.rejections.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn oversized_text_field_is_not_reported_as_a_file() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::Success));
        let app = create_router(service.clone());
        let long_text = "word ".repeat(250_000);

        let response = app
            .oneshot(multipart_request(vec![text_part("text", &long_text)]))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        let message = json["error"].as_str().expect("error message");
        assert!(message.contains("request body"));
        assert!(!message.contains("file"));
    }

    #[tokio::test]
    async fn service_errors_are_not_counted_twice() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::NoInput));
        let app = create_router(service.clone());

        let response = app
            .oneshot(multipart_request(vec![]))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(service.rejections.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn metrics_route_reports_snapshot() {
        let service = Arc::new(StubSummarizeService::new(StubOutcome::Success));
        let app = create_router(service);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["documents_summarized"], 4);
        assert_eq!(json["chunks_summarized"], 9);
        assert_eq!(json["rejected_requests"], 2);
        assert_eq!(json["failed_requests"], 1);
        assert_eq!(json["average_processing_ms"], 120);
    }
}
