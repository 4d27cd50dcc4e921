pub mod metrics;
pub mod security_headers;
pub mod tracing;

use crate::observability::REQUEST_ID_HEADER;
use axum::{body::Body, http::Request, middleware::from_fn, Router};
use tower_http::trace::TraceLayer;

/// Wrap a service router in the layers every service runs behind.
///
/// From the outside in: request id, security headers, HTTP metrics, then a
/// per-request `http_request` span that carries the request id.
pub fn with_common_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                ::tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(metrics::metrics_middleware))
        .layer(from_fn(security_headers::security_headers_middleware))
        .layer(from_fn(tracing::request_id_middleware))
}
