//! Throttling of mutating remote calls.
//!
//! Every replication service awaits [`RateLimiter::throttle`] after each mutating call.
//! The services only see the trait, so the strategy can change (fixed delay, token
//! bucket, or something that honours remote retry-after signals) without touching them.

use serenity::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Awaited after every mutating call, successful or not.
    async fn throttle(&self);

    /// Awaited when the remote service reports a rate limit.
    async fn back_off(&self, retry_after: Duration) {
        sleep(retry_after).await;
    }
}

/// Pauses for the same fixed delay after every call.
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn throttle(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

struct BucketState {
    tokens: u32,
    last_refill: Instant,
}

/// Allows bursts of up to `capacity` calls, then one call per `refill_interval`.
pub struct TokenBucket {
    capacity: u32,
    refill_interval: Duration,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Creates a full bucket.
    ///
    /// # Arguments
    /// - `capacity` - Maximum burst size, at least 1
    /// - `refill_interval` - Time for one token to be restored
    pub fn new(capacity: u32, refill_interval: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            refill_interval,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    fn refill(&self, state: &mut BucketState, now: Instant) {
        if self.refill_interval.is_zero() {
            state.tokens = self.capacity;
            state.last_refill = now;
            return;
        }

        let elapsed = now.saturating_duration_since(state.last_refill);
        let restored =
            u32::try_from(elapsed.as_nanos() / self.refill_interval.as_nanos()).unwrap_or(u32::MAX);
        if restored >= self.capacity {
            state.tokens = self.capacity;
            state.last_refill = now;
        } else if restored > 0 {
            state.tokens = state.tokens.saturating_add(restored).min(self.capacity);
            state.last_refill += self.refill_interval * restored;
        }
    }
}

#[async_trait]
impl RateLimiter for TokenBucket {
    async fn throttle(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let now = Instant::now();
                self.refill(&mut state, now);

                if state.tokens > 0 {
                    state.tokens -= 1;
                    return;
                }

                (state.last_refill + self.refill_interval).saturating_duration_since(now)
            };

            sleep(wait).await;
        }
    }

    async fn back_off(&self, retry_after: Duration) {
        // Drain the bucket so the calls following the pause are spread out again
        {
            let mut state = self.state.lock().await;
            state.tokens = 0;
            state.last_refill = Instant::now() + retry_after;
        }
        sleep(retry_after).await;
    }
}
