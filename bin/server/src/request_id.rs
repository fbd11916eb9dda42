//! Request correlation and request logging.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use meui_core::RequestId;

/// Header carrying the correlation id in and out.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request-scoped correlation id, available to handlers via extensions.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

/// Assigns (or propagates) a correlation id, logs the handled request, and
/// echoes the id back in the response headers.
pub async fn request_logger(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| RequestId::new().to_string());

    request.extensions_mut().insert(CorrelationId(id.clone()));

    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let start = std::time::Instant::now();
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    // Successful static asset fetches are just noise when debugging.
    if !(path.starts_with("/public/") && response.status().is_success()) {
        tracing::info!(
            request_id = %id,
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "handled request"
        );
    }

    response
}
