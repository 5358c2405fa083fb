//! Request spans for the HTTP surface.
//!
//! Every request gets an `INFO` span carrying the method and path. Redirect
//! handlers fill in `namespace` (`short`, `vanity` or `encoded`) once they know
//! which store answered, so a finished-request line reads:
//!
//! ```text
//! INFO request{method=GET path=/docs namespace="vanity"}: finished processing request latency=2 ms status=307
//! ```

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span, field};

/// Span field naming the store a redirect was served from.
pub const NAMESPACE_FIELD: &str = "namespace";

type MakeRequestSpan = fn(&Request<Body>) -> Span;

pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeRequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(request_span as MakeRequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        namespace = field::Empty,
    )
}

/// Records the namespace on the current request span.
pub fn record_namespace(namespace: &'static str) {
    Span::current().record(NAMESPACE_FIELD, namespace);
}
