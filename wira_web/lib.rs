pub mod handlers;
mod http;
mod middleware;

pub use http::*;
pub use middleware::{client_key, rate_limit};
