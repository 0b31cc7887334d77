//! Method-call surface for building pattern trees

use crate::narrow::Narrow;
use crate::pattern::asynchronous::AsyncAdapter;
use crate::pattern::cache::{CachingPattern, UnsyncCachingPattern};
use crate::pattern::nodes::{
    BindPattern, CompositePattern, Composition, FilterPattern, MapPattern, NotPattern, PipePattern,
    TypePattern,
};
use crate::pattern::traits::{Pattern, SharedPattern};
use std::hash::Hash;
use std::sync::Arc;

/// Combinators available on every [`Pattern`]
///
/// # Examples
///
/// ```
/// use matchkit_rs::pattern::{greater_than, less_than, Pattern, PatternExt};
/// use matchkit_rs::MatchResult;
///
/// let digit = greater_than(-1).and(less_than(10)).select(|x: i32| x.to_string());
/// assert_eq!(digit.matches(7), MatchResult::Success("7".to_string()));
/// assert!(digit.matches(12).is_failure());
/// assert_eq!(digit.description(), "(x > -1) and (x < 10)");
/// ```
pub trait PatternExt<I, O>: Pattern<I, O> + Sized {
    /// Transform the successful value
    fn select<U, F>(self, mapper: F) -> MapPattern<Self, F, O>
    where
        F: Fn(O) -> U,
    {
        MapPattern::new(self, mapper)
    }

    /// Feed the successful value into another pattern
    fn pipe<U, Q>(self, next: Q) -> PipePattern<Self, Q, O>
    where
        Q: Pattern<O, U>,
    {
        PipePattern::new(self, next)
    }

    /// Build the next pattern from the successful value, then match the value against it
    fn bind<U, Q, F>(self, binder: F) -> BindPattern<Self, F, O, Q>
    where
        F: Fn(&O) -> Q,
        Q: Pattern<O, U>,
    {
        BindPattern::new(self, binder)
    }

    /// Additionally require a predicate over the successful value
    fn filter<F>(self, condition: F) -> FilterPattern<Self, F>
    where
        F: Fn(&O) -> bool,
    {
        FilterPattern::new(self, condition)
    }

    /// Succeed iff the successful value narrows to `U`
    fn cast<U>(self) -> PipePattern<Self, TypePattern<U>, O>
    where
        O: Narrow<U>,
    {
        PipePattern::new(self, TypePattern::new())
    }

    /// Both patterns must match; yields the input
    fn and<R>(self, other: R) -> CompositePattern<Self, R, O>
    where
        R: Pattern<I, O>,
    {
        CompositePattern::new(self, other, Composition::And)
    }

    /// At least one pattern must match; yields the input
    fn or<R>(self, other: R) -> CompositePattern<Self, R, O>
    where
        R: Pattern<I, O>,
    {
        CompositePattern::new(self, other, Composition::Or)
    }

    /// Exactly one pattern must match; yields the input
    fn xor<R>(self, other: R) -> CompositePattern<Self, R, O>
    where
        R: Pattern<I, O>,
    {
        CompositePattern::new(self, other, Composition::Xor)
    }

    /// Succeed iff this pattern fails; yields the input
    fn negate(self) -> NotPattern<Self, O> {
        NotPattern::new(self)
    }

    /// Memoize results behind a lock; safe to share across threads
    fn cached(self) -> CachingPattern<Self, I, O>
    where
        I: Eq + Hash + Clone,
        O: Clone,
    {
        CachingPattern::new(self)
    }

    /// Memoize results without synchronization
    ///
    /// The returned pattern is `!Sync`; prefer it only when the pattern never
    /// leaves the current thread.
    fn cached_unsync(self) -> UnsyncCachingPattern<Self, I, O>
    where
        I: Eq + Hash + Clone,
        O: Clone,
    {
        UnsyncCachingPattern::new(self)
    }

    /// Adapt into an [`AsyncPattern`](crate::pattern::asynchronous::AsyncPattern)
    fn as_async(self) -> AsyncAdapter<Self, I, O>
    where
        Self: Send + Sync,
    {
        AsyncAdapter::new(self)
    }

    /// Erase the concrete type behind a shared handle
    fn shared(self) -> SharedPattern<I, O>
    where
        Self: Send + Sync + 'static,
    {
        Arc::new(self)
    }
}

impl<I, O, P> PatternExt<I, O> for P where P: Pattern<I, O> {}
