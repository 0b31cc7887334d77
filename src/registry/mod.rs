//! Keyed registry of built matches
//!
//! Building a match allocates its case list; code that would otherwise rebuild
//! the same match on every call can build it once under a name and fetch it
//! from here afterwards. Any `Clone + Send + Sync` value can be stored, but
//! the intended tenants are [`Match`](crate::Match) and
//! [`AsyncMatch`](crate::AsyncMatch), whose clones share their case list.

use crate::error::{MatchError, Result};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

static GLOBAL_REGISTRY: Lazy<MatchRegistry> = Lazy::new(MatchRegistry::new);

type Entry = Arc<dyn Any + Send + Sync>;

/// Thread-safe map from names to built matches
#[derive(Default)]
pub struct MatchRegistry {
    entries: DashMap<String, Entry>,
}

impl MatchRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static MatchRegistry {
        &GLOBAL_REGISTRY
    }

    /// Fetch the value stored under `key`, building and storing it first if
    /// the key is vacant
    ///
    /// `build` runs without any registry lock held, so it may itself use the
    /// registry. If two callers race on a vacant key both may build; the
    /// first insert wins and both receive it.
    ///
    /// # Examples
    ///
    /// ```
    /// use matchkit_rs::pattern::{any, equal_to};
    /// use matchkit_rs::{Match, MatchRegistry};
    ///
    /// let registry = MatchRegistry::new();
    /// let build = || Match::new().case(equal_to(0), |_| "zero").case(any(), |_| "other");
    ///
    /// let first: Match<i32, &str> = registry.get_or_insert_with("sign", build).unwrap();
    /// let again: Match<i32, &str> =
    ///     registry.get_or_insert_with("sign", || unreachable!()).unwrap();
    /// assert_eq!(again.execute_strict(0).unwrap(), "zero");
    /// assert_eq!(first.len(), again.len());
    /// ```
    pub fn get_or_insert_with<T, F>(&self, key: &str, build: F) -> Result<T>
    where
        T: Any + Clone + Send + Sync,
        F: FnOnce() -> T,
    {
        if key.is_empty() {
            return Err(MatchError::InvalidArgument("registry key must not be empty".to_string()));
        }

        if let Some(found) = self.get::<T>(key)? {
            return Ok(found);
        }

        let built: Entry = Arc::new(build());
        let stored = Arc::clone(self.entries.entry(key.to_string()).or_insert(built).value());
        debug!(key, kind = type_name::<T>(), "registered match");
        Self::downcast(key, &stored)
    }

    /// Fetch the value stored under `key`, if any
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: Any + Clone + Send + Sync,
    {
        let Some(entry) = self.entries.get(key).map(|entry| Arc::clone(entry.value())) else {
            return Ok(None);
        };
        Self::downcast(key, &entry).map(Some)
    }

    /// Whether a value is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove the value stored under `key`, returning whether one existed
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every stored value
    pub fn clear(&self) {
        self.entries.clear();
    }

    fn downcast<T>(key: &str, entry: &Entry) -> Result<T>
    where
        T: Any + Clone + Send + Sync,
    {
        entry
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| MatchError::RegistryTypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }
}

impl fmt::Debug for MatchRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}
