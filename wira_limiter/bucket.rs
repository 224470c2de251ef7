use std::time::{Duration, Instant};

/// Token state of a single client.
#[derive(Debug, Clone)]
pub(crate) struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl TokenBucket {
    pub(crate) fn full(capacity: f64, now: Instant) -> Self {
        Self {
            tokens: capacity,
            last_refill: now,
            last_seen: now,
        }
    }

    fn refill(&mut self, now: Instant, rate: f64, capacity: f64) {
        if now > self.last_refill {
            let elapsed = now.duration_since(self.last_refill).as_secs_f64();
            self.tokens = (self.tokens + elapsed * rate).min(capacity);
            self.last_refill = now;
        }
    }

    /// Refills, then takes one token if a whole one is available.
    pub(crate) fn try_acquire(&mut self, now: Instant, rate: f64, capacity: f64) -> bool {
        self.refill(now, rate, capacity);
        if now > self.last_seen {
            self.last_seen = now;
        }

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Time until a whole token is available again, zero if one already is.
    ///
    /// Saturates at [`Duration::MAX`] when the wait is too long to represent.
    pub(crate) fn retry_after(&self, now: Instant, rate: f64, capacity: f64) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        let available = (self.tokens + elapsed * rate).min(capacity);
        if available >= 1.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64((1.0 - available) / rate).unwrap_or(Duration::MAX)
        }
    }

    pub(crate) fn remaining(&self) -> u32 {
        self.tokens.floor() as u32
    }

    pub(crate) fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f64 = 1.0;
    const CAPACITY: f64 = 5.0;

    #[test]
    fn test_full_bucket_allows_burst_then_rejects() {
        let now = Instant::now();
        let mut bucket = TokenBucket::full(CAPACITY, now);

        for _ in 0..5 {
            assert!(bucket.try_acquire(now, RATE, CAPACITY));
        }
        assert!(!bucket.try_acquire(now, RATE, CAPACITY));
        assert_eq!(bucket.remaining(), 0);
    }

    #[test]
    fn test_rejection_consumes_nothing() {
        let now = Instant::now();
        let mut bucket = TokenBucket::full(1.0, now);
        assert!(bucket.try_acquire(now, RATE, 1.0));

        let half = now + Duration::from_millis(500);
        assert!(!bucket.try_acquire(half, RATE, 1.0));
        assert!(!bucket.try_acquire(half, RATE, 1.0));

        // the half token accrued before the rejections is still there
        assert!(bucket.try_acquire(now + Duration::from_secs(1), RATE, 1.0));
    }

    #[test]
    fn test_refill_is_capped() {
        let now = Instant::now();
        let mut bucket = TokenBucket::full(CAPACITY, now);
        assert!(bucket.try_acquire(now, RATE, CAPACITY));

        let later = now + Duration::from_secs(3600);
        assert!(bucket.try_acquire(later, RATE, CAPACITY));
        assert_eq!(bucket.remaining(), 4);
    }

    #[test]
    fn test_retry_after_reports_deficit() {
        let now = Instant::now();
        let mut bucket = TokenBucket::full(1.0, now);
        assert_eq!(bucket.retry_after(now, 2.0, 1.0), Duration::ZERO);

        assert!(bucket.try_acquire(now, 2.0, 1.0));
        assert_eq!(bucket.retry_after(now, 2.0, 1.0), Duration::from_millis(500));
        assert_eq!(
            bucket.retry_after(now + Duration::from_millis(250), 2.0, 1.0),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_retry_after_saturates_for_tiny_rates() {
        let now = Instant::now();
        let mut bucket = TokenBucket::full(1.0, now);
        assert!(bucket.try_acquire(now, 1e-300, 1.0));

        assert_eq!(bucket.retry_after(now, 1e-300, 1.0), Duration::MAX);
        assert_eq!(
            bucket.retry_after(now + Duration::from_secs(3600), 1e-300, 1.0),
            Duration::MAX
        );
    }

    #[test]
    fn test_idle_time_tracks_last_request() {
        let now = Instant::now();
        let mut bucket = TokenBucket::full(CAPACITY, now);
        let later = now + Duration::from_secs(10);
        bucket.try_acquire(later, RATE, CAPACITY);

        assert_eq!(bucket.idle_for(later + Duration::from_secs(5)), Duration::from_secs(5));
        assert_eq!(bucket.idle_for(now), Duration::ZERO);
    }
}
