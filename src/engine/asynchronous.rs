//! Asynchronous match engine
//!
//! Same ordering and fallthrough rules as [`Match`](crate::Match). A case's
//! pattern is awaited to completion before its handler runs, and the handler
//! before the next case is looked at. Dropping a returned future or stream
//! abandons the evaluation at its current suspension point.

use crate::config::MatchConfig;
use crate::error::{MatchError, Result};
use crate::pattern::asynchronous::AsyncPattern;
use crate::result::MatchResult;
use async_stream::stream;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::BoxStream;
use futures::Future;
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, trace};

type AsyncEvaluator<I, R> = Arc<dyn Fn(I) -> BoxFuture<'static, MatchResult<R>> + Send + Sync>;

/// A (pattern, handler) pair inside an [`AsyncMatch`]
pub struct AsyncCase<I, R> {
    evaluate: AsyncEvaluator<I, R>,
    fallthrough: Option<bool>,
    description: String,
}

impl<I, R> AsyncCase<I, R>
where
    I: Send + 'static,
    R: Send + 'static,
{
    /// Create a case from an async pattern and an async handler
    pub fn new<P, O, H, Fut>(pattern: P, handler: H) -> Self
    where
        P: AsyncPattern<I, O> + 'static,
        O: Send + 'static,
        H: Fn(O) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let description = pattern.description().to_string();
        let pattern = Arc::new(pattern);
        let handler = Arc::new(handler);

        let evaluate: AsyncEvaluator<I, R> = Arc::new(move |input: I| {
            let pattern = Arc::clone(&pattern);
            let handler = Arc::clone(&handler);
            async move {
                match pattern.matches(input).await {
                    MatchResult::Success(value) => MatchResult::Success(handler(value).await),
                    MatchResult::Failure => MatchResult::Failure,
                }
            }
            .boxed()
        });

        Self {
            evaluate,
            fallthrough: None,
            description,
        }
    }

    /// Create a case from an async pattern and a synchronous handler
    pub fn with_sync_handler<P, O, H>(pattern: P, handler: H) -> Self
    where
        P: AsyncPattern<I, O> + 'static,
        O: Send + 'static,
        H: Fn(O) -> R + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        Self::new(pattern, move |value: O| {
            let output = handler(value);
            async move { output }
        })
    }
}

impl<I, R> AsyncCase<I, R> {
    /// Set this case's fallthrough, overriding the match default
    pub fn with_fallthrough(mut self, fallthrough: bool) -> Self {
        self.fallthrough = Some(fallthrough);
        self
    }

    /// Fallthrough set on this case, if any
    pub fn fallthrough(&self) -> Option<bool> {
        self.fallthrough
    }

    /// Description of the case's pattern
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Match the input and, on success, run the handler
    pub fn evaluate(&self, input: I) -> BoxFuture<'static, MatchResult<R>> {
        (self.evaluate)(input)
    }
}

impl<I, R> Clone for AsyncCase<I, R> {
    fn clone(&self) -> Self {
        Self {
            evaluate: Arc::clone(&self.evaluate),
            fallthrough: self.fallthrough,
            description: self.description.clone(),
        }
    }
}

impl<I, R> fmt::Debug for AsyncCase<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncCase")
            .field("description", &self.description)
            .field("fallthrough", &self.fallthrough)
            .finish()
    }
}

/// Immutable, ordered list of asynchronous cases
///
/// # Examples
///
/// ```
/// use matchkit_rs::pattern::{any, greater_than, less_than, PatternExt};
/// use matchkit_rs::AsyncMatch;
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let m = AsyncMatch::new()
///     .case_with_fallthrough(greater_than(0).as_async(), |_| async { "positive" }, true)
///     .case(less_than(10).as_async(), |_| async { "small" })
///     .case(any().as_async(), |_| async { "any" });
///
/// let outputs: Vec<_> = m.execute_with_fallthrough(5).collect().await;
/// assert_eq!(outputs, vec!["positive", "small"]);
/// # });
/// ```
pub struct AsyncMatch<I, R> {
    cases: Arc<Vec<AsyncCase<I, R>>>,
    default_fallthrough: bool,
}

impl<I, R> AsyncMatch<I, R> {
    /// Create an empty match with fallthrough disabled by default
    pub fn new() -> Self {
        Self {
            cases: Arc::new(Vec::new()),
            default_fallthrough: false,
        }
    }

    pub(crate) fn from_cases(cases: Vec<AsyncCase<I, R>>, default_fallthrough: bool) -> Self {
        Self {
            cases: Arc::new(cases),
            default_fallthrough,
        }
    }

    /// Return a new match with `case` appended
    pub fn with_case(&self, case: AsyncCase<I, R>) -> Self {
        let mut cases = Vec::with_capacity(self.cases.len() + 1);
        cases.extend(self.cases.iter().cloned());
        cases.push(case);
        Self {
            cases: Arc::new(cases),
            default_fallthrough: self.default_fallthrough,
        }
    }

    /// Return a new match with a different default fallthrough
    pub fn with_default_fallthrough(&self, fallthrough: bool) -> Self {
        Self {
            cases: Arc::clone(&self.cases),
            default_fallthrough: fallthrough,
        }
    }

    /// Return a new match with settings from `config` applied
    pub fn with_config(&self, config: &MatchConfig) -> Self {
        self.with_default_fallthrough(config.default_fallthrough)
    }

    /// Fallthrough used by cases that do not set their own
    pub fn default_fallthrough(&self) -> bool {
        self.default_fallthrough
    }

    /// Number of cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the match has no cases
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Case descriptions in evaluation order
    pub fn descriptions(&self) -> Vec<&str> {
        self.cases.iter().map(AsyncCase::description).collect()
    }
}

impl<I, R> AsyncMatch<I, R>
where
    I: Send + 'static,
    R: Send + 'static,
{
    /// Return a new match with a case built from `pattern` and an async handler
    pub fn case<P, O, H, Fut>(&self, pattern: P, handler: H) -> Self
    where
        P: AsyncPattern<I, O> + 'static,
        O: Send + 'static,
        H: Fn(O) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        self.with_case(AsyncCase::new(pattern, handler))
    }

    /// Like [`case`](Self::case) with an explicit fallthrough for the new case
    pub fn case_with_fallthrough<P, O, H, Fut>(
        &self,
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
        self.with_case(AsyncCase::new(pattern, handler).with_fallthrough(fallthrough))
    }

    /// Evaluate cases in order and return the first output
    ///
    /// Fails with [`MatchError::Exhausted`] when no case matches. Inputs
    /// without a `Debug` impl go through
    /// [`execute_strict_with`](Self::execute_strict_with).
    pub async fn execute_strict(&self, input: I) -> Result<R>
    where
        I: Clone + Debug,
    {
        self.execute_strict_with(input, |input| format!("{:?}", input))
            .await
    }

    /// Like [`execute_strict`](Self::execute_strict), rendering an unmatched
    /// input with `describe`
    pub async fn execute_strict_with<D>(&self, input: I, describe: D) -> Result<R>
    where
        I: Clone,
        D: FnOnce(&I) -> String,
    {
        match self.execute_non_strict(input.clone()).await {
            MatchResult::Success(output) => Ok(output),
            MatchResult::Failure => {
                let input = describe(&input);
                debug!(cases = self.cases.len(), "strict async match exhausted for {}", input);
                Err(MatchError::Exhausted { input })
            }
        }
    }

    /// Evaluate cases in order and return the first output, or `Failure`
    pub async fn execute_non_strict(&self, input: I) -> MatchResult<R>
    where
        I: Clone,
    {
        for (index, case) in self.cases.iter().enumerate() {
            let result = case.evaluate(input.clone()).await;
            if let MatchResult::Success(output) = result {
                trace!(case = index, description = case.description(), "async case matched");
                return MatchResult::Success(output);
            }
        }
        MatchResult::Failure
    }

    /// Lazily stream outputs starting at the first matching case
    ///
    /// No case is evaluated before the stream is first polled, and no case
    /// after the last pulled element is evaluated.
    pub fn execute_with_fallthrough(&self, input: I) -> BoxStream<'static, R>
    where
        I: Clone,
    {
        let cases = Arc::clone(&self.cases);
        let default_fallthrough = self.default_fallthrough;

        Box::pin(stream! {
            for (index, case) in cases.iter().enumerate() {
                let result = case.evaluate(input.clone()).await;
                if let MatchResult::Success(output) = result {
                    yield output;
                    if !case.fallthrough.unwrap_or(default_fallthrough) {
                        trace!(case = index, "async fallthrough stopped");
                        break;
                    }
                }
            }
        })
    }
}

impl<I, R> Default for AsyncMatch<I, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, R> Clone for AsyncMatch<I, R> {
    fn clone(&self) -> Self {
        Self {
            cases: Arc::clone(&self.cases),
            default_fallthrough: self.default_fallthrough,
        }
    }
}

impl<I, R> fmt::Debug for AsyncMatch<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncMatch")
            .field("cases", &self.cases)
            .field("default_fallthrough", &self.default_fallthrough)
            .finish()
    }
}
