//! Degrade failures to caller-supplied fallback values.
//!
//! Views that would rather show stale or placeholder data than an error wrap
//! their fetches here. The failure is logged at `warn` and never reaches the caller.

use std::fmt;
use std::future::Future;

/// The value produced by [`call_detailed`], tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    /// The operation succeeded.
    Live(T),
    /// The operation failed and the fallback was substituted.
    Fallback(T),
}

impl<T> Resolved<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Resolved::Live(v) | Resolved::Fallback(v) => v,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Resolved::Live(v) | Resolved::Fallback(v) => v,
        }
    }
}

/// Runs `operation`, returning its value on success and `fallback` on failure.
pub async fn call<T, E, Fut>(operation: Fut, fallback: T) -> T
where
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    call_detailed(operation, fallback).await.into_inner()
}

/// Like [`call`], but reports whether the fallback was used so the view can show a
/// degraded state.
pub async fn call_detailed<T, E, Fut>(operation: Fut, fallback: T) -> Resolved<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    match operation.await {
        Ok(v) => Resolved::Live(v),
        Err(e) => {
            tracing::warn!(error = %e, "analytics call failed, serving fallback");
            Resolved::Fallback(fallback)
        }
    }
}

/// Like [`call`], but only builds the fallback when it is needed.
pub async fn call_or_else<T, E, Fut, F>(operation: Fut, fallback: F) -> T
where
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
    F: FnOnce() -> T,
{
    match operation.await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "analytics call failed, serving fallback");
            fallback()
        }
    }
}
