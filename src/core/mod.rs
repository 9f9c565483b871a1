//! Core components of the `tickerboard` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The [`DashClient`] and its builder, with the rate-limit retry policy.
//! - The [`DashError`] type and its [`ErrorKind`] classification.
//! - The [`ResultCache`] shared by every fetch.
//! - Shared data models like [`Symbol`], [`Period`] and [`PriceBar`].

/// The TTL result cache.
pub mod cache;
/// The client (`DashClient`), builder, and retry configuration.
pub mod client;
/// The primary error type (`DashError`) for the crate.
pub mod error;
/// Shared data models.
pub mod models;
pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::DashClient`
pub use cache::{CacheKey, CacheMode, FetchKind, ResultCache};
pub use client::{DashClient, DashClientBuilder};
pub use error::{DashError, ErrorKind};
pub use models::{Interval, Period, PriceBar, Symbol};
