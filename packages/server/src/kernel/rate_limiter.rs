// Fixed-window submission limiter
//
// In-process only: each server instance counts separately and stale keys are
// never evicted. It throttles the public contact form and has nothing to do
// with session security. Swap in another BaseRateLimiter for a shared limiter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::BaseRateLimiter;

/// Contact form default: 4 submissions per address per minute
pub const CONTACT_WINDOW: Duration = Duration::from_secs(60);
pub const CONTACT_MAX_HITS: u32 = 4;

#[derive(Debug, Clone, Copy)]
struct HitRecord {
    window_start: Instant,
    count: u32,
}

pub struct FixedWindowRateLimiter {
    window: Duration,
    max_hits: u32,
    hits: Mutex<HashMap<String, HitRecord>>,
}

impl FixedWindowRateLimiter {
    pub fn new(window: Duration, max_hits: u32) -> Self {
        Self {
            window,
            max_hits,
            hits: Mutex::new(HashMap::new()),
        }
    }

    pub fn for_contact_form() -> Self {
        Self::new(CONTACT_WINDOW, CONTACT_MAX_HITS)
    }

    /// Same as `check`, with an explicit clock
    pub async fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut hits = self.hits.lock().await;

        match hits.get_mut(key) {
            Some(record) if now.duration_since(record.window_start) <= self.window => {
                if record.count >= self.max_hits {
                    return false;
                }
                record.count += 1;
                true
            }
            _ => {
                // First hit, or the previous window has elapsed
                hits.insert(
                    key.to_string(),
                    HitRecord {
                        window_start: now,
                        count: 1,
                    },
                );
                true
            }
        }
    }
}

#[async_trait]
impl BaseRateLimiter for FixedWindowRateLimiter {
    async fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now()).await
    }
}
