/// Defines how a single call interacts with the in-memory cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Join an existing entry (pending or settled) if present; otherwise start a fetch
    /// and cache it. (Default)
    #[default]
    Use,
    /// Drop any existing entry, start a fresh fetch, and cache the new result.
    Refresh,
    /// Fetch directly without reading from or writing to the cache.
    Bypass,
}

/// What happens to a cache entry whose fetch fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Remove the entry once its fetch fails, so the next access retries. (Default)
    #[default]
    EvictOnFailure,
    /// Keep the failed result cached until the entry is invalidated.
    Retain,
}
