//! HTTP client for Leap/EOSIO node status endpoints.
//!
//! This crate queries `/v1/chain/get_info` and `/v2/health` and decodes the
//! answers into typed models.
//!
//! # Example
//!
//! ```no_run
//! use leap_client::{CancellationToken, LeapClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = LeapClient::builder()
//!     .base_url("https://eos.example.com:8443")
//!     .build()?;
//!
//! let cancel = CancellationToken::new();
//! let health = client.get_health(&cancel).await?;
//! for service in &health.health {
//!     println!("{}: {} at {}", service.name, service.status, service.time);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Request pipeline
//!
//! - [`dispatch`]: one round trip with an explicit port-less `Host` header,
//!   abandoned as soon as the caller's `CancellationToken` fires
//! - [`classify`]: success, structured [`ApiError`], or generic [`HttpError`]
//! - [`types`] and [`time`]: payload models and the two timestamp encodings
//!
//! There is no retry, caching or authentication; every call makes exactly
//! one attempt and returns every failure to the caller.

pub mod api;
pub mod classify;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod time;
pub mod types;

pub use client::{ClientBuilder, LeapClient};
pub use error::{Error, HttpError, Result};
pub use types::*;

pub use tokio_util::sync::CancellationToken;
