// src/state.rs

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use crate::config::BedsideConfig;
use crate::llm::CompletionProvider;
use crate::session::SessionStore;

/// Everything the handlers share. Cloning is cheap; all fields are handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BedsideConfig>,
    pub store: SessionStore,
    pub provider: Arc<dyn CompletionProvider>,
    /// Global request cap, applied uniformly to all traffic.
    pub limiter: Arc<DefaultDirectRateLimiter>,
    pub started: Instant,
}

impl AppState {
    pub fn new(
        config: Arc<BedsideConfig>,
        store: SessionStore,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        let per_minute =
            NonZeroU32::new(config.rate_limit_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
            config,
            store,
            provider,
            started: Instant::now(),
        }
    }
}
