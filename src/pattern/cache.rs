//! Memoizing pattern wrappers
//!
//! A cached pattern remembers the result of every input it has seen, keyed by
//! input equality. Entries live as long as the pattern itself; nothing is ever
//! evicted, so caching pays off when inputs come from a bounded or slowly
//! varying domain.
//!
//! Two variants exist:
//!
//! - [`CachingPattern`] guards its table with a mutex and can be shared across
//!   threads (including inside a [`Match`](crate::Match)).
//! - [`UnsyncCachingPattern`] uses a `RefCell`. It is `!Sync`, so the compiler
//!   rejects sharing it between threads; it is the cheaper choice for
//!   single-threaded use.

use crate::pattern::traits::Pattern;
use crate::result::MatchResult;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Memo table shared by both cache variants
pub(crate) struct MemoTable<I, O> {
    entries: HashMap<I, MatchResult<O>>,
    hits: u64,
    misses: u64,
}

impl<I, O> MemoTable<I, O>
where
    I: Eq + Hash,
    O: Clone,
{
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub(crate) fn lookup(&mut self, input: &I) -> Option<MatchResult<O>> {
        let found = self.entries.get(input).cloned();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    pub(crate) fn store(&mut self, input: I, result: MatchResult<O>) -> MatchResult<O> {
        self.entries.entry(input).or_insert(result).clone()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Statistics about a memo table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of distinct inputs stored
    pub entries: usize,
    /// Lookups answered from the table
    pub hits: u64,
    /// Lookups that had to evaluate the wrapped pattern
    pub misses: u64,
}

/// Thread-safe memoizing pattern
///
/// The lock is released while the wrapped pattern runs, so two threads that
/// miss on the same input at once may both evaluate it; the first stored
/// result wins and both callers observe it.
pub struct CachingPattern<P, I, O> {
    inner: P,
    table: Mutex<MemoTable<I, O>>,
}

impl<P, I, O> CachingPattern<P, I, O>
where
    P: Pattern<I, O>,
    I: Eq + Hash + Clone,
    O: Clone,
{
    /// Wrap a pattern with a synchronized memo table
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

impl<P, I, O> Pattern<I, O> for CachingPattern<P, I, O>
where
    P: Pattern<I, O>,
    I: Eq + Hash + Clone,
    O: Clone,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        if let Some(found) = self.table.lock().lookup(&input) {
            return found;
        }

        let result = self.inner.matches(input.clone());
        self.table.lock().store(input, result)
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

impl<P, I, O> fmt::Debug for CachingPattern<P, I, O>
where
    P: Pattern<I, O>,
    I: Eq + Hash + Clone,
    O: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingPattern")
            .field("description", &self.inner.description())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Single-threaded memoizing pattern
///
/// Not safe for concurrent access; the type is `!Sync` so it cannot be
/// shared across threads by mistake. Reentrant evaluation (the wrapped
/// pattern matching through this same cache) is supported because the
/// table is not borrowed while the wrapped pattern runs.
pub struct UnsyncCachingPattern<P, I, O> {
    inner: P,
    table: RefCell<MemoTable<I, O>>,
}

impl<P, I, O> UnsyncCachingPattern<P, I, O>
where
    P: Pattern<I, O>,
    I: Eq + Hash + Clone,
    O: Clone,
{
    /// Wrap a pattern with an unsynchronized memo table
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            table: RefCell::new(MemoTable::new()),
        }
    }

    /// Current table statistics
    pub fn stats(&self) -> CacheStats {
        self.table.borrow().stats()
    }
}

impl<P, I, O> Pattern<I, O> for UnsyncCachingPattern<P, I, O>
where
    P: Pattern<I, O>,
    I: Eq + Hash + Clone,
    O: Clone,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        let cached = self.table.borrow_mut().lookup(&input);
        if let Some(found) = cached {
            return found;
        }

        let result = self.inner.matches(input.clone());
        self.table.borrow_mut().store(input, result)
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}
