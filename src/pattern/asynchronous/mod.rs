//! Asynchronous patterns
//!
//! [`AsyncPattern`] mirrors [`Pattern`] for matchers whose evaluation may
//! suspend (a lookup, a remote check). Every combinator evaluates its operands
//! one after another; nothing here fans out concurrently.

use crate::narrow::Narrow;
use crate::pattern::traits::Pattern;
use crate::result::MatchResult;
use async_trait::async_trait;
use futures::Future;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

pub mod cache;
pub mod nodes;

pub use cache::AsyncCachingPattern;
pub use nodes::*;

/// A pattern whose evaluation may suspend
#[async_trait]
pub trait AsyncPattern<I, O>: Send + Sync {
    /// Match an input against this pattern
    async fn matches(&self, input: I) -> MatchResult<O>;

    /// Human-readable description of the pattern
    fn description(&self) -> &str {
        ""
    }
}

/// Shared, type-erased asynchronous pattern handle
pub type SharedAsyncPattern<I, O> = Arc<dyn AsyncPattern<I, O>>;

#[async_trait]
impl<I, O, P> AsyncPattern<I, O> for Arc<P>
where
    P: AsyncPattern<I, O> + ?Sized,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<O> {
        (**self).matches(input).await
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}

#[async_trait]
impl<I, O, P> AsyncPattern<I, O> for Box<P>
where
    P: AsyncPattern<I, O> + ?Sized,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<O> {
        (**self).matches(input).await
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}

/// Adapter running a synchronous pattern as an asynchronous one
///
/// The returned future completes on its first poll; no suspension is added.
pub struct AsyncAdapter<P, I, O> {
    inner: P,
    _marker: PhantomData<fn(I) -> O>,
}

impl<P, I, O> AsyncAdapter<P, I, O>
where
    P: Pattern<I, O> + Send + Sync,
{
    /// Wrap a synchronous pattern
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<P, I, O> AsyncPattern<I, O> for AsyncAdapter<P, I, O>
where
    P: Pattern<I, O> + Send + Sync,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<O> {
        self.inner.matches(input)
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

/// Pattern backed by an asynchronous matching function
pub struct AsyncFnPattern<F, I, O> {
    func: F,
    description: String,
    _marker: PhantomData<fn(I) -> O>,
}

impl<F, I, O> AsyncFnPattern<F, I, O> {
    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[async_trait]
impl<F, Fut, I, O> AsyncPattern<I, O> for AsyncFnPattern<F, I, O>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = MatchResult<O>> + Send,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<O> {
        (self.func)(input).await
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Create an asynchronous pattern from an async matching function
///
/// # Examples
///
/// ```
/// use matchkit_rs::pattern::asynchronous::{from_fn, AsyncPattern};
/// use matchkit_rs::MatchResult;
///
/// # futures::executor::block_on(async {
/// let lookup = from_fn(|id: u32| async move {
///     MatchResult::from((id < 100).then(|| format!("user-{id}")))
/// });
/// assert_eq!(lookup.matches(7).await, MatchResult::Success("user-7".to_string()));
/// assert!(lookup.matches(700).await.is_failure());
/// # });
/// ```
pub fn from_fn<F, Fut, I, O>(func: F) -> AsyncFnPattern<F, I, O>
where
    F: Fn(I) -> Fut + Send + Sync,
    Fut: Future<Output = MatchResult<O>> + Send,
{
    AsyncFnPattern {
        func,
        description: String::new(),
        _marker: PhantomData,
    }
}

/// Combinators available on every [`AsyncPattern`]
pub trait AsyncPatternExt<I, O>: AsyncPattern<I, O> + Sized
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// Transform the successful value
    fn select<U, F>(self, mapper: F) -> AsyncMapPattern<Self, F, O>
    where
        F: Fn(O) -> U + Send + Sync,
    {
        AsyncMapPattern::new(self, mapper)
    }

    /// Transform the successful value with an async function
    fn select_async<U, F, Fut>(self, mapper: F) -> AsyncThenPattern<Self, F, O>
    where
        F: Fn(O) -> Fut + Send + Sync,
        Fut: Future<Output = U> + Send,
    {
        AsyncThenPattern::new(self, mapper)
    }

    /// Feed the successful value into another asynchronous pattern
    fn pipe<U, Q>(self, next: Q) -> AsyncPipePattern<Self, Q, O>
    where
        Q: AsyncPattern<O, U>,
    {
        AsyncPipePattern::new(self, next)
    }

    /// Additionally require a predicate over the successful value
    fn filter<F>(self, condition: F) -> AsyncFilterPattern<Self, F>
    where
        F: Fn(&O) -> bool + Send + Sync,
    {
        AsyncFilterPattern::new(self, condition)
    }

    /// Additionally require an asynchronous predicate over the successful value
    fn filter_async<F, Fut>(self, condition: F) -> AsyncGuardPattern<Self, F, O>
    where
        F: Fn(&O) -> Fut + Send + Sync,
        Fut: Future<Output = bool> + Send,
    {
        AsyncGuardPattern::new(self, condition)
    }

    /// Succeed iff the successful value narrows to `U`
    fn cast<U>(self) -> AsyncCastPattern<Self, O, U>
    where
        O: Narrow<U>,
    {
        AsyncCastPattern::new(self)
    }

    /// Both patterns must match; yields the input
    fn and<R>(self, other: R) -> AsyncCompositePattern<Self, R, O>
    where
        R: AsyncPattern<I, O>,
    {
        AsyncCompositePattern::new(self, other, crate::pattern::Composition::And)
    }

    /// At least one pattern must match; yields the input
    fn or<R>(self, other: R) -> AsyncCompositePattern<Self, R, O>
    where
        R: AsyncPattern<I, O>,
    {
        AsyncCompositePattern::new(self, other, crate::pattern::Composition::Or)
    }

    /// Exactly one pattern must match; yields the input
    fn xor<R>(self, other: R) -> AsyncCompositePattern<Self, R, O>
    where
        R: AsyncPattern<I, O>,
    {
        AsyncCompositePattern::new(self, other, crate::pattern::Composition::Xor)
    }

    /// Succeed iff this pattern fails; yields the input
    fn negate(self) -> AsyncNotPattern<Self, O> {
        AsyncNotPattern::new(self)
    }

    /// Memoize results behind a lock
    fn cached(self) -> AsyncCachingPattern<Self, I, O>
    where
        I: Eq + Hash + Clone + Sync,
        O: Clone + Sync,
    {
        AsyncCachingPattern::new(self)
    }

    /// Erase the concrete type behind a shared handle
    fn shared(self) -> SharedAsyncPattern<I, O>
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<I, O, P> AsyncPatternExt<I, O> for P
where
    P: AsyncPattern<I, O>,
    I: Send + 'static,
    O: Send + 'static,
{
}
