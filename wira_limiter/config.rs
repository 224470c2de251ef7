use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("refill rate must be a positive finite number, got {0}")]
    InvalidRate(f64),

    #[error("burst size must be at least 1")]
    InvalidBurst,

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Sizing of the per-client buckets and of the idle sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitConfig {
    /// Tokens added per second.
    pub refill_per_second: f64,
    /// Bucket capacity, also the initial token count of a new client.
    pub burst: u32,
    /// How often idle buckets are swept.
    pub sweep_interval: Duration,
    /// Buckets not seen for longer than this are dropped by the sweep.
    pub idle_timeout: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            refill_per_second: 1.0,
            burst: 5,
            sweep_interval: Duration::from_secs(60),
            idle_timeout: Duration::from_secs(180),
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.refill_per_second.is_finite() || self.refill_per_second <= 0.0 {
            return Err(ConfigError::InvalidRate(self.refill_per_second));
        }
        if self.burst == 0 {
            return Err(ConfigError::InvalidBurst);
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("sweep interval"));
        }
        if self.idle_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("idle timeout"));
        }
        Ok(())
    }
}
