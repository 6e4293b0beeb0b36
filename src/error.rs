// src/error.rs
// Centralized error handling for the consultation surface. Every failure
// path completes the request with a rendered page plus a machine-readable
// reason code; nothing here aborts the process.

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::chat::validate::{MAX_QUERY_LEN, RejectReason};
use crate::llm::CompletionError;
use crate::web::render;

/// Response header carrying the reason code alongside the HTML page.
pub const ERROR_CODE_HEADER: &str = "x-error-code";

#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any state mutation.
    #[error("query rejected: {0}")]
    Rejected(#[from] RejectReason),

    /// The completion collaborator failed or timed out. Session state is
    /// preserved exactly as it was when the call went out, including the
    /// patient turn that never got an answer.
    #[error("completion collaborator unavailable: {0}")]
    Upstream(#[from] CompletionError),

    /// Anti-forgery token did not match the session.
    #[error("anti-forgery token mismatch")]
    CsrfMismatch,

    #[error("not found")]
    NotFound,

    /// Anything else. Logged server-side, generic page to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Rejected(reason) => reason.code(),
            AppError::Upstream(_) => "upstream_unavailable",
            AppError::CsrfMismatch => "csrf_mismatch",
            AppError::NotFound => "not_found",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Rejected(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::CsrfMismatch => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::Rejected(RejectReason::QueryTooLong) => "Message too long",
            AppError::Rejected(RejectReason::InappropriateLanguage) => "Inappropriate language",
            AppError::Upstream(_) => "Doctor temporarily unavailable",
            AppError::CsrfMismatch => "Could not verify your submission",
            AppError::NotFound => "Page not found",
            AppError::Internal(_) => "Unexpected error",
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Rejected(RejectReason::QueryTooLong) => {
                format!("Please keep your message under {MAX_QUERY_LEN} characters.")
            }
            AppError::Rejected(RejectReason::InappropriateLanguage) => {
                "Your message contains language this service does not accept. \
                 Please rephrase it."
                    .to_string()
            }
            AppError::Upstream(_) => {
                "The doctor could not be reached. Your message has been kept; \
                 please try again in a moment."
                    .to_string()
            }
            AppError::CsrfMismatch => {
                "Your submission could not be verified. Reload the page and try again."
                    .to_string()
            }
            AppError::NotFound => "The page you asked for does not exist.".to_string(),
            AppError::Internal(_) => {
                "Something went wrong on our side. Please try again.".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream(err) => tracing::warn!("completion call failed: {err}"),
            AppError::Internal(err) => tracing::error!("unexpected failure: {err:#}"),
            _ => {}
        }

        let status = self.status();
        let code = self.code();
        let page = render::error_page(self.title(), &self.detail(), code);

        let mut response = (status, Html(page)).into_response();
        if let Ok(value) = HeaderValue::from_str(code) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(ERROR_CODE_HEADER), value);
        }
        response
    }
}
