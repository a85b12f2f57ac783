use std::fmt;

use crate::range::DateWindow;

/// Deterministic cache key for a date window: `"YYYY-MM-DD-YYYY-MM-DD"`, or `"all"`
/// when there is no window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key used for the unbounded (no window) request.
    pub const UNBOUNDED: &'static str = "all";

    pub fn for_window(window: Option<&DateWindow>) -> Self {
        match window {
            Some(w) => CacheKey(format!("{}-{}", w.start_date, w.end_date)),
            None => CacheKey(Self::UNBOUNDED.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Option<&DateWindow>> for CacheKey {
    fn from(window: Option<&DateWindow>) -> Self {
        CacheKey::for_window(window)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
