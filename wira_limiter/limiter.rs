use dashmap::DashMap;
use std::{hash::Hash, time::Duration};

use crate::{
    bucket::TokenBucket,
    clock::{Clock, SystemClock},
    config::RateLimitConfig,
};

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Rejected { retry_after: Duration },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

/// Registry of per-client token buckets.
///
/// Buckets live in a sharded map: a check on one key holds only that key's shard
/// for the duration of its refill and consume, so checks on the same key are
/// serialized while unrelated keys proceed in parallel.
pub struct RateLimiter<K, C = SystemClock>
where
    K: Eq + Hash,
{
    buckets: DashMap<K, TokenBucket>,
    config: RateLimitConfig,
    clock: C,
}

impl<K> RateLimiter<K, SystemClock>
where
    K: Eq + Hash + Clone,
{
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, C> RateLimiter<K, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            buckets: DashMap::new(),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Admits or rejects one request from `key`. Never blocks on other keys.
    pub fn allow(&self, key: K) -> bool {
        self.check(key).is_allowed()
    }

    /// Like [`RateLimiter::allow`], also reporting remaining tokens or the wait before retrying.
    pub fn check(&self, key: K) -> Decision {
        let now = self.clock.now();
        let capacity = self.capacity();
        let rate = self.config.refill_per_second;

        let mut bucket = self
            .buckets
            .entry(key)
            .or_insert_with(|| TokenBucket::full(capacity, now));

        if bucket.try_acquire(now, rate, capacity) {
            Decision::Allowed {
                remaining: bucket.remaining(),
            }
        } else {
            Decision::Rejected {
                retry_after: bucket.retry_after(now, rate, capacity),
            }
        }
    }

    /// Wait before `key` would be admitted again; `None` for an untracked key (full bucket).
    pub fn retry_after(&self, key: &K) -> Option<Duration> {
        let now = self.clock.now();
        self.buckets.get(key).map(|bucket| {
            bucket.retry_after(now, self.config.refill_per_second, self.capacity())
        })
    }

    /// Drops every bucket idle for longer than the configured timeout. Returns how many went.
    ///
    /// Idle time is read under the shard lock, so a bucket touched by a concurrent
    /// check is never removed mid-update.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let idle_timeout = self.config.idle_timeout;
        let before = self.buckets.len();

        self.buckets
            .retain(|_, bucket| bucket.idle_for(now) <= idle_timeout);

        before.saturating_sub(self.buckets.len())
    }

    pub fn is_tracked(&self, key: &K) -> bool {
        self.buckets.contains_key(key)
    }

    /// Number of clients currently holding a bucket.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn capacity(&self) -> f64 {
        f64::from(self.config.burst)
    }
}
