//! Fluent builders that accumulate cases and freeze them into a match

use super::asynchronous::{AsyncCase, AsyncMatch};
use super::{Case, Match};
use crate::config::MatchConfig;
use crate::pattern::asynchronous::AsyncPattern;
use crate::pattern::Pattern;
use futures::Future;

/// Builder for a [`Match`]
///
/// Unlike [`Match::case`], which copies the case list on every call, the
/// builder pushes into a plain `Vec` and shares it only once, in
/// [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use matchkit_rs::pattern::{any, greater_than, less_than};
/// use matchkit_rs::MatchBuilder;
///
/// let m = MatchBuilder::new()
///     .case_with_fallthrough(greater_than(0), |_| "positive", true)
///     .case(less_than(10), |_| "small")
///     .case(any(), |_| "any")
///     .build();
///
/// let outputs: Vec<_> = m.execute_with_fallthrough(5).collect();
/// assert_eq!(outputs, vec!["positive", "small"]);
/// ```
#[derive(Debug)]
pub struct MatchBuilder<I, R> {
    cases: Vec<Case<I, R>>,
    default_fallthrough: bool,
}

impl<I, R> Default for MatchBuilder<I, R> {
    fn default() -> Self {
        Self {
            cases: Vec::new(),
            default_fallthrough: false,
        }
    }
}

impl<I, R> MatchBuilder<I, R>
where
    I: 'static,
    R: 'static,
{
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a case built from `pattern` and `handler`
    pub fn case<P, O, H>(mut self, pattern: P, handler: H) -> Self
    where
        P: Pattern<I, O> + Send + Sync + 'static,
        O: 'static,
        H: Fn(O) -> R + Send + Sync + 'static,
    {
        self.cases.push(Case::new(pattern, handler));
        self
    }

    /// Add a case with an explicit fallthrough
    pub fn case_with_fallthrough<P, O, H>(
        mut self,
        pattern: P,
        handler: H,
        fallthrough: bool,
    ) -> Self
    where
        P: Pattern<I, O> + Send + Sync + 'static,
        O: 'static,
        H: Fn(O) -> R + Send + Sync + 'static,
    {
        self.cases.push(Case::new(pattern, handler).with_fallthrough(fallthrough));
        self
    }

    /// Add a prebuilt case
    pub fn add_case(mut self, case: Case<I, R>) -> Self {
        self.cases.push(case);
        self
    }

    /// Set the fallthrough used by cases that do not set their own
    pub fn default_fallthrough(mut self, fallthrough: bool) -> Self {
        self.default_fallthrough = fallthrough;
        self
    }

    /// Apply settings from a configuration
    pub fn with_config(mut self, config: &MatchConfig) -> Self {
        self.default_fallthrough = config.default_fallthrough;
        self
    }

    /// Freeze the cases into a match
    pub fn build(self) -> Match<I, R> {
        Match::from_cases(self.cases, self.default_fallthrough)
    }
}

/// Builder for an [`AsyncMatch`]
#[derive(Debug)]
pub struct AsyncMatchBuilder<I, R> {
    cases: Vec<AsyncCase<I, R>>,
    default_fallthrough: bool,
}

impl<I, R> Default for AsyncMatchBuilder<I, R> {
    fn default() -> Self {
        Self {
            cases: Vec::new(),
            default_fallthrough: false,
        }
    }
}

impl<I, R> AsyncMatchBuilder<I, R>
where
    I: Send + 'static,
    R: Send + 'static,
{
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a case with an async handler
    pub fn case<P, O, H, Fut>(mut self, pattern: P, handler: H) -> Self
    where
        P: AsyncPattern<I, O> + 'static,
        O: Send + 'static,
        H: Fn(O) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        self.cases.push(AsyncCase::new(pattern, handler));
        self
    }

    /// Add a case with an async handler and an explicit fallthrough
    pub fn case_with_fallthrough<P, O, H, Fut>(
        mut self,
        pattern: P,
        handler: H,
        fallthrough: bool,
    ) -> Self
    where
        P: AsyncPattern<I, O> + 'static,
        O: Send + 'static,
        H: Fn(O) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        self.cases.push(AsyncCase::new(pattern, handler).with_fallthrough(fallthrough));
        self
    }

    /// Add a case with a synchronous handler
    pub fn sync_case<P, O, H>(mut self, pattern: P, handler: H) -> Self
    where
        P: AsyncPattern<I, O> + 'static,
        O: Send + 'static,
        H: Fn(O) -> R + Send + Sync + 'static,
    {
        self.cases.push(AsyncCase::with_sync_handler(pattern, handler));
        self
    }

    /// Add a prebuilt case
    pub fn add_case(mut self, case: AsyncCase<I, R>) -> Self {
        self.cases.push(case);
        self
    }

    /// Set the fallthrough used by cases that do not set their own
    pub fn default_fallthrough(mut self, fallthrough: bool) -> Self {
        self.default_fallthrough = fallthrough;
        self
    }

    /// Apply settings from a configuration
    pub fn with_config(mut self, config: &MatchConfig) -> Self {
        self.default_fallthrough = config.default_fallthrough;
        self
    }

    /// Freeze the cases into a match
    pub fn build(self) -> AsyncMatch<I, R> {
        AsyncMatch::from_cases(self.cases, self.default_fallthrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{any, equal_to, PatternExt};
    use crate::MatchResult;

    #[test]
    fn test_builder_preserves_order() {
        let m = MatchBuilder::new()
            .case(equal_to(1), |_| "one")
            .add_case(Case::new(any(), |_| "other").with_fallthrough(true))
            .case(any(), |_| "last")
            .build();

        assert_eq!(m.len(), 3);
        assert_eq!(m.descriptions(), vec!["x == 1", "any", "any"]);
        assert_eq!(m.execute_with_fallthrough(1).collect::<Vec<_>>(), vec!["one"]);
        assert_eq!(m.execute_with_fallthrough(2).collect::<Vec<_>>(), vec!["other", "last"]);
    }

    #[test]
    fn test_builder_config() {
        let config = MatchConfig::new().with_default_fallthrough(true);
        let m = MatchBuilder::new()
            .with_config(&config)
            .case(any(), |x: i32| x)
            .case(any(), |x: i32| -x)
            .build();
        assert!(m.default_fallthrough());
        assert_eq!(m.execute_with_fallthrough(3).collect::<Vec<_>>(), vec![3, -3]);
    }

    #[tokio::test]
    async fn test_async_builder() {
        let m = AsyncMatchBuilder::new()
            .default_fallthrough(true)
            .sync_case(equal_to(2).as_async(), |x: i32| x * 10)
            .case_with_fallthrough(any().as_async(), |x: i32| async move { x + 1 }, false)
            .case(any().as_async(), |_| async { 0 })
            .build();

        assert_eq!(m.len(), 3);
        assert_eq!(m.execute_non_strict(2).await, MatchResult::Success(20));
        assert_eq!(m.execute_non_strict(5).await, MatchResult::Success(6));
    }
}
