//! HTTP surface: router construction, middleware stack, server loop.

pub mod handlers;
pub mod rate_limit;
pub mod render;
pub mod session_cookie;

use anyhow::Result;
use axum::Router;
use axum::http::{HeaderValue, header};
use axum::middleware;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Restrictive policy: the page inlines its styles and loads nothing else.
const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; style-src 'unsafe-inline'; \
     form-action 'self'; base-uri 'none'; frame-ancestors 'none'";

/// Create the router with all endpoints and the middleware stack.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::consult_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .fallback(handlers::not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(TraceLayer::new_for_http());

    // Stricter defaults for public deployment.
    if state.config.public {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains"),
        ));
    }

    router.with_state(state)
}

/// Binds and serves until the process is stopped.
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("bedside listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
