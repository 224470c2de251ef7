//! # WIRA Limiter
//!
//! Per-client admission control based on token buckets.
//!
//! Every client key owns a bucket holding up to `burst` tokens that refills at
//! `refill_per_second`. A request is admitted when a whole token is available.
//! Buckets are created full on first sight and dropped by a periodic sweep once
//! idle for longer than `idle_timeout`; a dropped client simply starts over with
//! a full bucket.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wira_limiter::{RateLimitConfig, RateLimiter};
//!
//! # async fn run() {
//! let limiter = Arc::new(RateLimiter::<String>::new(RateLimitConfig::default()));
//! let sweeper = limiter.start_sweeper();
//!
//! if limiter.allow("10.0.0.1".to_string()) {
//!     // serve the request
//! }
//!
//! sweeper.shutdown().await;
//! # }
//! ```

mod bucket;
mod clock;
mod config;
mod limiter;
mod sweeper;

pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, RateLimitConfig};
pub use limiter::{Decision, RateLimiter};
pub use sweeper::SweeperHandle;

