//! Global request-rate cap. One un-keyed limiter guards all traffic
//! uniformly; there is no per-client bucketing.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};

use super::render;
use crate::state::AppState;

pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.limiter.check().is_err() {
        tracing::warn!("request rejected by rate cap");
        let page = render::error_page(
            "Too many requests",
            "The clinic is busy right now. Please wait a moment and try again.",
            "rate_limited",
        );
        return (StatusCode::TOO_MANY_REQUESTS, Html(page)).into_response();
    }
    next.run(request).await
}
