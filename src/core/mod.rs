//! Core components of the `dashboard-analytics` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The [`AnalyticsClient`] and its builder.
//! - The primary [`AnalyticsError`] type.
//! - The shared [`MetricSeries`] container used by list-shaped resources.
//! - Internal networking helpers.

/// The HTTP client (`AnalyticsClient`), builder, and configuration.
pub mod client;
/// The primary error type (`AnalyticsError`) for the crate.
pub mod error;
/// Shared data models used across multiple resources.
pub mod models;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::AnalyticsClient`
pub use client::{AnalyticsClient, AnalyticsClientBuilder};
pub use error::AnalyticsError;
pub use models::MetricSeries;
