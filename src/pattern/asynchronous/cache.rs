//! Memoization for asynchronous patterns

use super::AsyncPattern;
use crate::pattern::cache::{CacheStats, MemoTable};
use crate::result::MatchResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::hash::Hash;

/// Thread-safe memoizing wrapper around an [`AsyncPattern`]
///
/// The lock is never held across an await point. Concurrent misses on the
/// same input may evaluate the wrapped pattern more than once; the first
/// stored result is kept.
pub struct AsyncCachingPattern<P, I, O> {
    inner: P,
    table: Mutex<MemoTable<I, O>>,
}

impl<P, I, O> AsyncCachingPattern<P, I, O>
where
    I: Eq + Hash + Clone,
    O: Clone,
{
    /// Wrap an async pattern with a synchronized memo table
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            table: Mutex::new(MemoTable::new()),
        }
    }

    /// Current table statistics
    pub fn stats(&self) -> CacheStats {
        self.table.lock().stats()
    }
}

#[async_trait]
impl<P, I, O> AsyncPattern<I, O> for AsyncCachingPattern<P, I, O>
where
    P: AsyncPattern<I, O>,
    I: Eq + Hash + Clone + Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<O> {
        let cached = self.table.lock().lookup(&input);
        if let Some(found) = cached {
            return found;
        }

        let result = self.inner.matches(input.clone()).await;
        self.table.lock().store(input, result)
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}
