use dotenvy::dotenv;
use std::{env, time::Duration};

use wira_limiter::RateLimitConfig;
use wira_types::errors::{AppError, ApplicationError};

/// Minimum length of the cookie signing secret, in bytes.
pub const COOKIE_SECRET_MIN_LEN: usize = 64;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:5180";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub auth_cookie_secret: String,
    pub rate_limit_per_second: f64,
    pub rate_limit_burst: u32,
    pub rate_limit_sweep_interval: Duration,
    pub rate_limit_idle_timeout: Duration,
    pub trust_forwarded_for: bool,
    pub cors_origins: Vec<String>,
    pub query_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ApplicationError> {
        dotenv().ok();

        let port = match env::var("WIRA_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(8080),
            Err(_) => 8080,
        };

        let auth_cookie_secret = match env::var("WIRA_COOKIE_SECRET") {
            Ok(val) if val.len() >= COOKIE_SECRET_MIN_LEN => val,
            Ok(_) => {
                return Err(invalid(format!(
                    "WIRA_COOKIE_SECRET must be at least {COOKIE_SECRET_MIN_LEN} bytes"
                )));
            }
            Err(_) => return Err(invalid("You need to set env WIRA_COOKIE_SECRET".to_string())),
        };

        let rate_limit_per_second = match env::var("WIRA_RATE_LIMIT_PER_SECOND") {
            Ok(val) => val.parse::<f64>().unwrap_or(1.0),
            Err(_) => 1.0,
        };

        let rate_limit_burst = match env::var("WIRA_RATE_LIMIT_BURST") {
            Ok(val) => val.parse::<u32>().unwrap_or(5),
            Err(_) => 5,
        };

        let rate_limit_sweep_interval = secs_var("WIRA_RATE_LIMIT_SWEEP_SECS", 60);
        let rate_limit_idle_timeout = secs_var("WIRA_RATE_LIMIT_IDLE_SECS", 180);
        let query_timeout = secs_var("WIRA_QUERY_TIMEOUT_SECS", 5);

        let trust_forwarded_for = match env::var("WIRA_TRUST_FORWARDED_FOR") {
            Ok(val) => matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => false,
        };

        let cors_origins = parse_origins(
            &env::var("WIRA_CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        let config = Self {
            port,
            auth_cookie_secret,
            rate_limit_per_second,
            rate_limit_burst,
            rate_limit_sweep_interval,
            rate_limit_idle_timeout,
            trust_forwarded_for,
            cors_origins,
            query_timeout,
        };

        config
            .rate_limit()
            .validate()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(config)
    }

    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            refill_per_second: self.rate_limit_per_second,
            burst: self.rate_limit_burst,
            sweep_interval: self.rate_limit_sweep_interval,
            idle_timeout: self.rate_limit_idle_timeout,
        }
    }
}

fn secs_var(name: &str, default: u64) -> Duration {
    let secs = match env::var(name) {
        Ok(val) => val.parse::<u64>().ok().filter(|s| *s > 0).unwrap_or(default),
        Err(_) => default,
    };
    Duration::from_secs(secs)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn invalid(msg: String) -> ApplicationError {
    ApplicationError::App(AppError::InvalidConfig(msg))
}
