use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::config::MatchingSettings;
use crate::core::{Discovery, MatchDetector};
use crate::services::{MatchStore, TokenIssuer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub discovery: Discovery,
    pub detector: MatchDetector,
    pub tokens: Arc<TokenIssuer>,
    pub matching: MatchingSettings,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn MatchStore>,
        tokens: TokenIssuer,
        matching: MatchingSettings,
        request_timeout: Duration,
    ) -> Self {
        Self {
            discovery: Discovery::new(store.clone()),
            detector: MatchDetector::new(store.clone()),
            store,
            tokens: Arc::new(tokens),
            matching,
            request_timeout,
        }
    }

    /// Cancellation token for one request
    ///
    /// Fires after `request_timeout`, or when the returned guard is dropped
    /// (handler finished or client went away).
    pub fn request_token(&self) -> (CancellationToken, DropGuard) {
        let token = CancellationToken::new();
        let timer = token.clone();
        let timeout = self.request_timeout;

        actix_web::rt::spawn(async move {
            tokio::select! {
                _ = timer.cancelled() => {}
                _ = tokio::time::sleep(timeout) => {
                    tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Request timed out");
                    timer.cancel();
                }
            }
        });

        let guard = token.clone().drop_guard();
        (token, guard)
    }
}
