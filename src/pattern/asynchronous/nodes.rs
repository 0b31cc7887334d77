//! Asynchronous combinator nodes
//!
//! Same algebra and description templates as the synchronous nodes. Operands
//! are awaited strictly in order.

use super::AsyncPattern;
use crate::narrow::Narrow;
use crate::pattern::nodes::Composition;
use crate::pattern::traits::combine_descriptions;
use crate::result::MatchResult;
use async_trait::async_trait;
use futures::Future;
use std::any::type_name;
use std::marker::PhantomData;

/// Node that transforms the successful value of an async pattern
pub struct AsyncMapPattern<P, F, O> {
    inner: P,
    mapper: F,
    _marker: PhantomData<fn() -> O>,
}

impl<P, F, O> AsyncMapPattern<P, F, O> {
    /// Create a new map node
    pub fn new(inner: P, mapper: F) -> Self {
        Self {
            inner,
            mapper,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, U, P, F> AsyncPattern<I, U> for AsyncMapPattern<P, F, O>
where
    P: AsyncPattern<I, O>,
    F: Fn(O) -> U + Send + Sync,
    I: Send + 'static,
    O: Send + 'static,
    U: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<U> {
        self.inner.matches(input).await.map(&self.mapper)
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

/// Node that transforms the successful value with an async function
pub struct AsyncThenPattern<P, F, O> {
    inner: P,
    mapper: F,
    _marker: PhantomData<fn() -> O>,
}

impl<P, F, O> AsyncThenPattern<P, F, O> {
    /// Create a new async map node
    pub fn new(inner: P, mapper: F) -> Self {
        Self {
            inner,
            mapper,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, U, Fut, P, F> AsyncPattern<I, U> for AsyncThenPattern<P, F, O>
where
    P: AsyncPattern<I, O>,
    F: Fn(O) -> Fut + Send + Sync,
    Fut: Future<Output = U> + Send,
    I: Send + 'static,
    O: Send + 'static,
    U: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<U> {
        match self.inner.matches(input).await {
            MatchResult::Success(value) => MatchResult::Success((self.mapper)(value).await),
            MatchResult::Failure => MatchResult::Failure,
        }
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

/// Node that feeds one async pattern's output into another
pub struct AsyncPipePattern<P, Q, M> {
    first: P,
    second: Q,
    description: String,
    _marker: PhantomData<fn() -> M>,
}

impl<P, Q, M> AsyncPipePattern<P, Q, M> {
    /// Create a new pipe node
    pub fn new<I, O>(first: P, second: Q) -> Self
    where
        P: AsyncPattern<I, M>,
        Q: AsyncPattern<M, O>,
    {
        let description = combine_descriptions(first.description(), second.description(), |a, b| {
            format!("{a} => {b}")
        });
        Self {
            first,
            second,
            description,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<I, M, O, P, Q> AsyncPattern<I, O> for AsyncPipePattern<P, Q, M>
where
    P: AsyncPattern<I, M>,
    Q: AsyncPattern<M, O>,
    I: Send + 'static,
    M: Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<O> {
        match self.first.matches(input).await {
            MatchResult::Success(value) => self.second.matches(value).await,
            MatchResult::Failure => MatchResult::Failure,
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Node that requires a synchronous predicate over a successful value
///
/// Conditions chained with [`when`](Self::when) run in the order they were
/// added, after the wrapped pattern has succeeded.
pub struct AsyncFilterPattern<P, F> {
    inner: P,
    condition: F,
}

impl<P, F> AsyncFilterPattern<P, F> {
    /// Create a new filter node
    pub fn new<I, O>(inner: P, condition: F) -> Self
    where
        P: AsyncPattern<I, O>,
        F: Fn(&O) -> bool + Send + Sync,
    {
        Self { inner, condition }
    }

    /// Append another condition, returning the extended pattern
    pub fn when<I, O, G>(self, condition: G) -> AsyncFilterPattern<Self, G>
    where
        Self: AsyncPattern<I, O>,
        G: Fn(&O) -> bool + Send + Sync,
    {
        AsyncFilterPattern::new(self, condition)
    }
}

#[async_trait]
impl<I, O, P, F> AsyncPattern<I, O> for AsyncFilterPattern<P, F>
where
    P: AsyncPattern<I, O>,
    F: Fn(&O) -> bool + Send + Sync,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<O> {
        self.inner
            .matches(input)
            .await
            .filter(|value| (self.condition)(value))
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

/// Node that requires an asynchronous predicate over a successful value
///
/// The predicate receives a borrow but must return an owned future; copy
/// whatever it needs out of the value before the `async` block.
pub struct AsyncGuardPattern<P, F, O> {
    inner: P,
    condition: F,
    _marker: PhantomData<fn() -> O>,
}

impl<P, F, O> AsyncGuardPattern<P, F, O> {
    /// Create a new guard node
    pub fn new(inner: P, condition: F) -> Self {
        Self {
            inner,
            condition,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, Fut, P, F> AsyncPattern<I, O> for AsyncGuardPattern<P, F, O>
where
    P: AsyncPattern<I, O>,
    F: Fn(&O) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<O> {
        match self.inner.matches(input).await {
            MatchResult::Success(value) => {
                if (self.condition)(&value).await {
                    MatchResult::Success(value)
                } else {
                    MatchResult::Failure
                }
            }
            MatchResult::Failure => MatchResult::Failure,
        }
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

/// Node that narrows the successful value to `U`
pub struct AsyncCastPattern<P, O, U> {
    inner: P,
    description: String,
    _marker: PhantomData<fn(O) -> U>,
}

impl<P, O, U> AsyncCastPattern<P, O, U> {
    /// Create a new cast node
    pub fn new<I>(inner: P) -> Self
    where
        P: AsyncPattern<I, O>,
    {
        let target = format!("x is {}", type_name::<U>());
        let description =
            combine_descriptions(inner.description(), &target, |a, b| format!("{a} => {b}"));
        Self {
            inner,
            description,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, U, P> AsyncPattern<I, U> for AsyncCastPattern<P, O, U>
where
    P: AsyncPattern<I, O>,
    O: Narrow<U> + Send + 'static,
    I: Send + 'static,
    U: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<U> {
        self.inner.matches(input).await.cast::<U>()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Node combining two async patterns with a boolean operator
///
/// The left operand is awaited to completion before the right one starts.
/// Both are always evaluated and the original input is returned on success.
pub struct AsyncCompositePattern<L, R, O> {
    left: L,
    right: R,
    composition: Composition,
    description: String,
    _marker: PhantomData<fn() -> O>,
}

impl<L, R, O> AsyncCompositePattern<L, R, O> {
    /// Create a new composite node
    pub fn new<I>(left: L, right: R, composition: Composition) -> Self
    where
        L: AsyncPattern<I, O>,
        R: AsyncPattern<I, O>,
    {
        let description = combine_descriptions(left.description(), right.description(), |a, b| {
            format!("({a}) {composition} ({b})")
        });
        Self {
            left,
            right,
            composition,
            description,
            _marker: PhantomData,
        }
    }

    /// The boolean operator of this node
    pub fn composition(&self) -> Composition {
        self.composition
    }
}

#[async_trait]
impl<I, O, L, R> AsyncPattern<I, I> for AsyncCompositePattern<L, R, O>
where
    L: AsyncPattern<I, O>,
    R: AsyncPattern<I, O>,
    I: Clone + Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<I> {
        let left = self.left.matches(input.clone()).await.is_successful();
        let right = self.right.matches(input.clone()).await.is_successful();

        if self.composition.apply(left, right) {
            MatchResult::Success(input)
        } else {
            MatchResult::Failure
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Node that succeeds iff the wrapped async pattern fails
pub struct AsyncNotPattern<P, O> {
    inner: P,
    description: String,
    _marker: PhantomData<fn() -> O>,
}

impl<P, O> AsyncNotPattern<P, O> {
    /// Create a new negation node
    pub fn new<I>(inner: P) -> Self
    where
        P: AsyncPattern<I, O>,
    {
        let description = match inner.description() {
            "" => String::new(),
            text => format!("not ({text})"),
        };
        Self {
            inner,
            description,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, P> AsyncPattern<I, I> for AsyncNotPattern<P, O>
where
    P: AsyncPattern<I, O>,
    I: Clone + Send + 'static,
    O: Send + 'static,
{
    async fn matches(&self, input: I) -> MatchResult<I> {
        if self.inner.matches(input.clone()).await.is_successful() {
            MatchResult::Failure
        } else {
            MatchResult::Success(input)
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::asynchronous::{from_fn, AsyncPatternExt};
    use crate::pattern::{greater_than, less_than, PatternExt};
    use parking_lot::Mutex;
    use std::any::Any;
    use std::sync::Arc;

    fn slow_positive() -> impl AsyncPattern<i32, i32> {
        from_fn(|x: i32| async move {
            tokio::task::yield_now().await;
            MatchResult::from((x > 0).then_some(x))
        })
        .with_description("x > 0")
    }

    #[tokio::test]
    async fn test_pipe_description_and_result() {
        let pattern = slow_positive().pipe(less_than(10).as_async());
        assert_eq!(pattern.description(), "x > 0 => x < 10");
        assert_eq!(pattern.matches(3).await, MatchResult::Success(3));
        assert_eq!(pattern.matches(30).await, MatchResult::Failure);
        assert_eq!(pattern.matches(-3).await, MatchResult::Failure);
    }

    #[tokio::test]
    async fn test_filter_and_guard() {
        let pattern = slow_positive()
            .filter(|x: &i32| x % 2 == 0)
            .when(|x: &i32| *x < 100);
        assert!(pattern.matches(4).await.is_successful());
        assert!(pattern.matches(5).await.is_failure());
        assert!(pattern.matches(104).await.is_failure());

        let guarded = slow_positive().filter_async(|x: &i32| {
            let x = *x;
            async move {
                tokio::task::yield_now().await;
                x != 7
            }
        });
        assert_eq!(guarded.matches(6).await, MatchResult::Success(6));
        assert_eq!(guarded.matches(7).await, MatchResult::Failure);
    }

    #[tokio::test]
    async fn test_filter_captures_borrowed_state() {
        let allowed = vec![2, 4, 6];
        let pattern = slow_positive()
            .filter(|x: &i32| allowed.contains(x))
            .when(|x: &i32| *x != 6);
        assert_eq!(pattern.matches(4).await, MatchResult::Success(4));
        assert_eq!(pattern.matches(6).await, MatchResult::Failure);
        assert_eq!(pattern.matches(-2).await, MatchResult::Failure);
    }

    #[tokio::test]
    async fn test_composite_awaits_left_before_right() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let left_log = Arc::clone(&order);
        let right_log = Arc::clone(&order);

        let left = from_fn(move |x: i32| {
            let log = Arc::clone(&left_log);
            async move {
                tokio::task::yield_now().await;
                log.lock().push("left");
                MatchResult::from((x > 0).then_some(x))
            }
        });
        let right = from_fn(move |x: i32| {
            let log = Arc::clone(&right_log);
            async move {
                log.lock().push("right");
                MatchResult::from((x < 10).then_some(x))
            }
        });

        let both = left.xor(right);
        assert_eq!(both.matches(20).await, MatchResult::Success(20));
        assert_eq!(both.matches(5).await, MatchResult::Failure);
        assert_eq!(*order.lock(), vec!["left", "right", "left", "right"]);
    }

    #[tokio::test]
    async fn test_negation_description() {
        let pattern = greater_than(0).as_async().negate();
        assert_eq!(pattern.description(), "not (x > 0)");
        assert_eq!(pattern.matches(-1).await, MatchResult::Success(-1));
        assert_eq!(pattern.matches(1).await, MatchResult::Failure);
    }

    #[tokio::test]
    async fn test_cast_narrows_values() {
        let pattern = from_fn(|x: Box<dyn Any + Send>| async move { MatchResult::Success(x) })
            .with_description("boxed")
            .cast::<u16>();
        assert_eq!(pattern.description(), "boxed => x is u16");

        let value: Box<dyn Any + Send> = Box::new(9_u16);
        assert_eq!(pattern.matches(value).await, MatchResult::Success(9));
        let value: Box<dyn Any + Send> = Box::new("nine");
        assert_eq!(pattern.matches(value).await, MatchResult::Failure);
    }
}
