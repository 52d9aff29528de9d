//! API endpoint implementations.

mod chain;
mod health;

pub use chain::{ChainApi, GET_INFO_PATH};
pub use health::{HEALTH_PATH, HealthApi};
