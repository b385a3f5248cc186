use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::AppState;

/// The service has one local user, so assistant calls share one bucket.
const ASSISTANT_KEY: &str = "assistant";

/// In-memory fixed-window limiter.
#[derive(Clone, Default)]
pub struct RateLimitState {
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one request against `key`. Returns Ok(remaining) or
    /// Err(retry_after) once the window is exhausted.
    pub async fn check_with_limits(
        &self,
        key: &str,
        max_requests: u32,
        window_secs: u64,
    ) -> Result<u32, Duration> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let window = Duration::from_secs(window_secs);

        let entry = entries.entry(key.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) > window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= max_requests {
            let retry_after = window.saturating_sub(now.duration_since(entry.window_start));
            return Err(retry_after);
        }

        entry.count += 1;
        Ok(max_requests - entry.count)
    }
}

/// Throttles the endpoints that spawn the external assistant.
pub async fn rate_limit_assistant(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    match state
        .rate_limiter
        .check_with_limits(
            ASSISTANT_KEY,
            state.config.assistant_max_calls,
            state.config.assistant_window_secs,
        )
        .await
    {
        Ok(remaining) => {
            tracing::debug!(path = %path, remaining = remaining, "Assistant rate limit check passed");
            Ok(next.run(req).await)
        }
        Err(retry_after) => {
            tracing::warn!(
                path = %path,
                retry_after_secs = retry_after.as_secs(),
                "Assistant rate limit exceeded"
            );
            Err(AppError::RateLimited)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_under_limit() {
        let limiter = RateLimitState::new();
        for i in 0..3 {
            let result = limiter.check_with_limits("assistant", 3, 60).await;
            assert_eq!(result, Ok(2 - i), "request {} should be allowed", i + 1);
        }
    }

    #[tokio::test]
    async fn blocks_over_limit() {
        let limiter = RateLimitState::new();
        for _ in 0..3 {
            let _ = limiter.check_with_limits("assistant", 3, 60).await;
        }
        let retry_after = limiter.check_with_limits("assistant", 3, 60).await.unwrap_err();
        assert!(retry_after <= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn keys_have_separate_limits() {
        let limiter = RateLimitState::new();
        for _ in 0..3 {
            let _ = limiter.check_with_limits("key1", 3, 60).await;
        }
        assert!(limiter.check_with_limits("key2", 3, 60).await.is_ok());
    }

    #[tokio::test]
    async fn window_resets_after_expiry() {
        let limiter = RateLimitState::new();
        assert!(limiter.check_with_limits("assistant", 1, 0).await.is_ok());
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(limiter.check_with_limits("assistant", 1, 0).await.is_ok());
    }
}
