//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions plus a process-local fixed-window
//! store for routes that do not warrant persistent counters.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    /// Returns (allowed, remaining_requests)
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// In-memory fixed-window store
///
/// Counters live in the process and reset when it restarts. Suitable for
/// best-effort limits on low-value routes; use a persistent backend when
/// the limit must survive restarts or be shared across instances.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, WindowState>>,
}

#[derive(Debug, Clone, Copy)]
struct WindowState {
    window_start_ms: i64,
    count: u32,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    fn check(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let mut windows = self.windows.lock().expect("rate limit lock poisoned");

        let state = windows
            .entry(key.to_string())
            .or_insert(WindowState {
                window_start_ms: now_ms,
                count: 0,
            });

        // Window elapsed: start a fresh one
        if now_ms - state.window_start_ms >= config.window_ms() {
            state.window_start_ms = now_ms;
            state.count = 0;
        }

        let reset_at_ms = state.window_start_ms + config.window_ms();

        if state.count >= config.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms,
            };
        }

        state.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - state.count,
            reset_at_ms,
        }
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check(key, config, Self::now_ms()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_allows_up_to_max() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 60);

        for i in 0..3 {
            let result = store.check("1.2.3.4", &config, 1_000);
            assert!(result.allowed, "request {} should be allowed", i);
        }

        let result = store.check("1.2.3.4", &config, 1_000);
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[test]
    fn test_window_resets_after_elapse() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check("k", &config, 0).allowed);
        assert!(!store.check("k", &config, 59_999).allowed);
        assert!(store.check("k", &config, 60_000).allowed);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check("a", &config, 0).allowed);
        assert!(store.check("b", &config, 0).allowed);
        assert!(!store.check("a", &config, 0).allowed);
    }
}
