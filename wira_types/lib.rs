pub mod common;
pub mod errors;
pub mod ranking;

pub use errors::{ApplicationError, Result};
