//! In-memory, time-bounded memoisation of rewrite results.
//!
//! Entries are keyed by a fingerprint of the request (see [`cache_key`]) and
//! expire a fixed TTL after insertion. Reads never evict; expired entries are
//! removed by [`ResultCache::sweep`], which the adjustment service runs after
//! every write. There is no capacity bound.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::tone::ToneCoordinate;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Default lifetime of a cache entry.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Number of leading characters of the input text used in the fingerprint.
pub const FINGERPRINT_PREFIX_CHARS: usize = 100;

const NO_COORDINATE_TOKEN: &str = "null";
const NO_PRESET_TOKEN: &str = "none";

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Derives the cache fingerprint for a request.
///
/// Combines the first [`FINGERPRINT_PREFIX_CHARS`] characters of `text`, the
/// coordinate rounded to two decimals per axis, and the preset name. Distinct
/// texts sharing a prefix collide when tone and preset also match.
#[must_use]
pub fn cache_key(text: &str, coordinate: Option<ToneCoordinate>, preset: Option<&str>) -> String {
    let sample: String = text.chars().take(FINGERPRINT_PREFIX_CHARS).collect();
    let coordinate_token = coordinate.map_or_else(
        || NO_COORDINATE_TOKEN.to_owned(),
        |point| format!("{:.2}_{:.2}", point.x, point.y),
    );
    let preset_token = preset.unwrap_or(NO_PRESET_TOKEN);

    format!("{sample}_{coordinate_token}_{preset_token}")
}

/// A cached rewrite and the instant it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Rewritten text.
    pub value: String,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Returns true while the entry is younger than `ttl` at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.created_at) < ttl
    }
}

/// Shared rewrite cache.
///
/// Safe to share between concurrent requests; each operation locks the map
/// for its own duration only, so two concurrent misses on the same key both
/// reach the provider and the later write wins.
#[derive(Debug)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl ResultCache {
    /// Creates an empty cache using wall-clock time.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }

    /// Returns the cached value if it has not yet expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Inserts or overwrites `key`, stamping it with the current time.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        let entry = CacheEntry {
            value: value.into(),
            created_at: self.clock.now(),
        };
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.into(), entry);
    }

    /// Removes every expired entry and returns how many were evicted.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now, self.ttl));
        before.saturating_sub(entries.len())
    }

    /// Number of stored entries, including expired ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
