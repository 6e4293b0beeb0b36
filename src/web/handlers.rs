//! HTTP handlers: the consultation page, liveness and the 404 fallback.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{render, session_cookie};
use crate::chat::{self, Dispatch};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConsultParams {
    pub query: Option<String>,
    pub token: Option<String>,
}

/// The consultation page. An empty or absent `query` renders current state;
/// anything else is validated, checked against the anti-forgery token and
/// dispatched. Every outcome, error pages included, completes the request.
pub async fn consult_handler(
    State(state): State<AppState>,
    Query(params): Query<ConsultParams>,
    headers: HeaderMap,
) -> Response {
    let secret = state.config.session_secret.as_str();

    let (mut session_id, mut issue_cookie) = match session_cookie::extract(&headers, secret) {
        Some(id) => (id, false),
        None => (state.store.create().await, true),
    };

    let raw_query = params.query.unwrap_or_default();
    let outcome =
        authorize_and_dispatch(&state, &session_id, &raw_query, params.token.as_deref()).await;

    let mut banner = None;
    let mut response = match outcome {
        Ok(Dispatch::Cleared { new_session_id }) => {
            session_id = new_session_id;
            issue_cookie = true;
            banner = Some("The consultation has been cleared.");
            page_response(&state, &session_id, banner).await
        }
        Ok(_) => page_response(&state, &session_id, banner).await,
        Err(err) => err.into_response(),
    };

    if issue_cookie {
        let cookie = session_cookie::build_cookie(&state.config, &session_id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    response
}

/// Anti-forgery check runs before dispatch; dispatch never sees a request
/// with a mismatched token.
async fn authorize_and_dispatch(
    state: &AppState,
    session_id: &str,
    raw_query: &str,
    token: Option<&str>,
) -> Result<Dispatch, AppError> {
    if !raw_query.trim().is_empty() {
        let token = token.unwrap_or_default();
        if !session_cookie::verify_csrf(&state.config.session_secret, session_id, token) {
            return Err(AppError::CsrfMismatch);
        }
    }
    chat::handle_query(state, session_id, raw_query).await
}

async fn page_response(state: &AppState, session_id: &str, banner: Option<&str>) -> Response {
    let session = state.store.get_or_create(session_id).await;
    let token = session_cookie::csrf_token(&state.config.session_secret, session_id);
    Html(render::consultation_page(&session, &token, banner)).into_response()
}

/// Liveness endpoint: process uptime and memory, plus the live session count.
pub async fn healthz_handler(State(state): State<AppState>) -> Json<Value> {
    let (rss_bytes, rss_human) = memory_stats();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started.elapsed().as_secs(),
        "memory": {
            "rss_bytes": rss_bytes,
            "rss_human": rss_human,
        },
        "active_sessions": state.store.len().await,
    }))
}

pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

const PAGE_SIZE: u64 = 4096;

/// Resident set size from /proc/self/statm; zeros where unavailable.
fn memory_stats() -> (u64, String) {
    let rss = std::fs::read_to_string("/proc/self/statm")
        .ok()
        .and_then(|statm| {
            statm
                .split_whitespace()
                .nth(1)
                .and_then(|pages| pages.parse::<u64>().ok())
        })
        .map(|pages| pages * PAGE_SIZE)
        .unwrap_or(0);
    (rss, format_bytes(rss))
}

/// Format bytes into human-readable string
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
