//! Error types for the shardlru library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by fallible constructors when a size parameter
//!   is invalid (zero capacity, zero shards).
//! - [`InvariantError`]: Returned by the diagnostic `check_invariants` /
//!   `validate` methods when the index and recency list disagree.
//!
//! ## Example Usage
//!
//! ```
//! use shardlru::error::ConfigError;
//! use shardlru::policy::sharded_lru::ShardedLruCache;
//!
//! let cache: Result<ShardedLruCache<u64, String>, ConfigError> =
//!     ShardedLruCache::try_new(64, 8);
//! assert!(cache.is_ok());
//!
//! let err = ShardedLruCache::<u64, String>::try_new(64, 0).unwrap_err();
//! assert_eq!(err.parameter(), "shard_count");
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when a cache is constructed with invalid parameters.
///
/// Records which parameter was rejected so callers can report
/// misconfiguration precisely. This is a caller bug, not a transient
/// condition: retrying with the same arguments fails the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    parameter: &'static str,
    message: String,
}

impl ConfigError {
    /// Creates a `ConfigError` for `parameter` with the given description.
    #[inline]
    pub fn new(parameter: &'static str, msg: impl Into<String>) -> Self {
        Self {
            parameter,
            message: msg.into(),
        }
    }

    /// Shorthand for the "must be greater than zero" rejection shared by
    /// every size parameter in this crate.
    pub(crate) fn zero(parameter: &'static str) -> Self {
        let err = Self::new(parameter, format!("{parameter} must be greater than zero"));
        tracing::debug!(parameter, "rejected cache configuration");
        err
    }

    /// Returns the name of the rejected parameter.
    #[inline]
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when an internal structural invariant does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}
