//! HTTP middleware for the route services.
//!
//! - [`RequestId`]: Newtype for correlation ID extraction/generation
//! - [`extract_or_generate_request_id`]: Read `X-Request-ID` or generate a UUID v7
//! - [`MetricsLayer`]: Tower middleware recording HTTP metrics
//!
//! The `MetricsLayer` records:
//! - `http_requests_total`: Counter by method, path, status bucket
//! - `http_request_duration_seconds`: Histogram by method, path
//! - `http_response_size_bytes`: Histogram by method, path

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{HeaderMap, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header carrying the correlation ID in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Newtype wrapper for request correlation IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new time-sortable UUID v7 request ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Extract the request ID from headers or generate a new UUID v7.
///
/// A missing, empty or non-UTF-8 `X-Request-ID` header yields a fresh ID.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Strip the query string so metric labels stay low-cardinality.
pub fn normalize_path(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

// =============================================================================
// MetricsLayer - Tower middleware for HTTP metrics
// =============================================================================

/// How a request ended, as seen by the metrics middleware.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    /// The inner service produced a response.
    Responded { status: u16, size_bytes: Option<f64> },
    /// The inner service returned an error instead of a response.
    Failed,
}

impl Outcome {
    fn from_response<B>(response: &Response<B>) -> Self {
        let size_bytes = response
            .headers()
            .get(http::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<f64>().ok());

        Outcome::Responded {
            status: response.status().as_u16(),
            size_bytes,
        }
    }

    fn status_label(self) -> &'static str {
        match self {
            Outcome::Responded { status, .. } => status_bucket(status),
            Outcome::Failed => "5xx",
        }
    }
}

/// Request attributes captured on entry and reported on completion.
#[derive(Debug, Clone)]
struct RequestMeta {
    method: String,
    path: String,
    request_id: RequestId,
    start: Instant,
}

impl RequestMeta {
    fn capture<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().to_string(),
            path: normalize_path(req.uri().path()).to_string(),
            request_id: extract_or_generate_request_id(req.headers()),
            start: Instant::now(),
        }
    }

    fn request_id_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(self.request_id.as_str()).ok()
    }

    /// Emit the completion event and every HTTP metric for this request.
    fn finish(&self, outcome: Outcome) {
        let duration_secs = self.start.elapsed().as_secs_f64();
        let latency_ms = duration_secs * 1000.0;
        let method = self.method.clone();
        let path = self.path.clone();

        match outcome {
            Outcome::Responded { status, size_bytes } => {
                tracing::info!(status, latency_ms, "request completed");
                if let Some(size) = size_bytes {
                    metrics::histogram!(
                        "http_response_size_bytes",
                        "method" => method.clone(),
                        "path" => path.clone()
                    )
                    .record(size);
                }
            }
            Outcome::Failed => tracing::error!(latency_ms, "request failed"),
        }

        metrics::counter!(
            "http_requests_total",
            "method" => method.clone(),
            "path" => path.clone(),
            "status" => outcome.status_label()
        )
        .increment(1);

        metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
            .record(duration_secs);
    }
}

/// Tower layer recording HTTP metrics and opening a request span.
///
/// The request ID is made available to handlers by writing it back into the
/// request's `X-Request-ID` header, and echoed on the response.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

/// Middleware service that records HTTP metrics.
#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: http_body::Body + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let meta = RequestMeta::capture(&req);
        if let Some(value) = meta.request_id_header() {
            req.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        let span = info_span!(
            "request",
            request_id = %meta.request_id,
            method = %meta.method,
            path = %meta.path,
        );
        span.in_scope(|| tracing::info!("handling request"));

        MetricsFuture {
            inner: self.inner.call(req),
            meta,
            span,
        }
    }
}

pin_project! {
    /// Future wrapper that tags the response and records metrics on completion.
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        meta: RequestMeta,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: http_body::Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        let outcome = match &mut result {
            Ok(response) => {
                if let Some(value) = this.meta.request_id_header() {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                Outcome::from_response(response)
            }
            Err(_) => Outcome::Failed,
        };
        this.meta.finish(outcome);

        Poll::Ready(result)
    }
}
