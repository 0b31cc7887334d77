//! Case lists and the match engine
//!
//! A [`Match`] is an ordered list of [`Case`]s plus a default fallthrough
//! flag. Every evaluation is a fresh linear scan in insertion order:
//!
//! - [`Match::execute_strict`] returns the first matching case's output or
//!   [`MatchError::Exhausted`];
//! - [`Match::execute_non_strict`] returns `Failure` instead of an error;
//! - [`Match::execute_with_fallthrough`] lazily yields the output of the first
//!   matching case and keeps going while the yielding case falls through.
//!
//! Cases are never reordered and never evaluated concurrently. Adding a case
//! returns a new `Match` and leaves the receiver untouched.

use crate::config::MatchConfig;
use crate::error::{MatchError, Result};
use crate::pattern::Pattern;
use crate::result::MatchResult;
use std::fmt;
use std::fmt::Debug;
use std::iter::FusedIterator;
use std::sync::Arc;
use tracing::{debug, trace};

pub mod asynchronous;
pub mod builder;

pub use asynchronous::{AsyncCase, AsyncMatch};
pub use builder::{AsyncMatchBuilder, MatchBuilder};

type Evaluator<I, R> = Arc<dyn Fn(I) -> MatchResult<R> + Send + Sync>;

/// A (pattern, handler) pair inside a [`Match`]
///
/// The pattern and handler are fused into one closure so cases with
/// different pattern output types share a list. The handler only ever
/// receives the value its own pattern produced.
pub struct Case<I, R> {
    evaluate: Evaluator<I, R>,
    fallthrough: Option<bool>,
    description: String,
}

impl<I, R> Case<I, R>
where
    I: 'static,
    R: 'static,
{
    /// Create a case from a pattern and a handler over its output
    pub fn new<P, O, H>(pattern: P, handler: H) -> Self
    where
        P: Pattern<I, O> + Send + Sync + 'static,
        O: 'static,
        H: Fn(O) -> R + Send + Sync + 'static,
    {
        let description = pattern.description().to_string();
        Self {
            evaluate: Arc::new(move |input: I| pattern.matches(input).map(&handler)),
            fallthrough: None,
            description,
        }
    }
}

impl<I, R> Case<I, R> {
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
    pub fn evaluate(&self, input: I) -> MatchResult<R> {
        (self.evaluate)(input)
    }

    fn falls_through(&self, default_fallthrough: bool) -> bool {
        self.fallthrough.unwrap_or(default_fallthrough)
    }
}

impl<I, R> Clone for Case<I, R> {
    fn clone(&self) -> Self {
        Self {
            evaluate: Arc::clone(&self.evaluate),
            fallthrough: self.fallthrough,
            description: self.description.clone(),
        }
    }
}

impl<I, R> fmt::Debug for Case<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("description", &self.description)
            .field("fallthrough", &self.fallthrough)
            .finish()
    }
}

/// Immutable, ordered list of cases evaluated against an input
///
/// # Examples
///
/// ```
/// use matchkit_rs::pattern::{any, equal_to};
/// use matchkit_rs::Match;
///
/// let describe = Match::new()
///     .case(equal_to(1), |_| "one".to_string())
///     .case(equal_to(2), |_| "two".to_string())
///     .case(any(), |x: i32| x.to_string());
///
/// assert_eq!(describe.execute_strict(2).unwrap(), "two");
/// assert_eq!(describe.execute_strict(5).unwrap(), "5");
/// ```
pub struct Match<I, R> {
    cases: Arc<Vec<Case<I, R>>>,
    default_fallthrough: bool,
}

impl<I, R> Match<I, R> {
    /// Create an empty match with fallthrough disabled by default
    pub fn new() -> Self {
        Self {
            cases: Arc::new(Vec::new()),
            default_fallthrough: false,
        }
    }

    pub(crate) fn from_cases(cases: Vec<Case<I, R>>, default_fallthrough: bool) -> Self {
        Self {
            cases: Arc::new(cases),
            default_fallthrough,
        }
    }

    /// Return a new match with `case` appended
    pub fn with_case(&self, case: Case<I, R>) -> Self {
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
        self.cases.iter().map(Case::description).collect()
    }

    /// The cases in evaluation order
    pub fn cases(&self) -> &[Case<I, R>] {
        &self.cases
    }
}

impl<I, R> Match<I, R>
where
    I: 'static,
    R: 'static,
{
    /// Return a new match with a case built from `pattern` and `handler`
    pub fn case<P, O, H>(&self, pattern: P, handler: H) -> Self
    where
        P: Pattern<I, O> + Send + Sync + 'static,
        O: 'static,
        H: Fn(O) -> R + Send + Sync + 'static,
    {
        self.with_case(Case::new(pattern, handler))
    }

    /// Like [`case`](Self::case) with an explicit fallthrough for the new case
    pub fn case_with_fallthrough<P, O, H>(&self, pattern: P, handler: H, fallthrough: bool) -> Self
    where
        P: Pattern<I, O> + Send + Sync + 'static,
        O: 'static,
        H: Fn(O) -> R + Send + Sync + 'static,
    {
        self.with_case(Case::new(pattern, handler).with_fallthrough(fallthrough))
    }
}

impl<I, R> Match<I, R>
where
    I: Clone,
{
    /// Evaluate cases in order and return the first output
    ///
    /// Fails with [`MatchError::Exhausted`] when no case matches. The error
    /// renders the input with `Debug`; inputs without a `Debug` impl go
    /// through [`execute_strict_with`](Self::execute_strict_with).
    pub fn execute_strict(&self, input: I) -> Result<R>
    where
        I: Debug,
    {
        self.execute_strict_with(input, |input| format!("{:?}", input))
    }

    /// Like [`execute_strict`](Self::execute_strict), rendering an unmatched
    /// input with `describe`
    pub fn execute_strict_with<D>(&self, input: I, describe: D) -> Result<R>
    where
        D: FnOnce(&I) -> String,
    {
        match self.execute_non_strict(input.clone()) {
            MatchResult::Success(output) => Ok(output),
            MatchResult::Failure => {
                let input = describe(&input);
                debug!(cases = self.cases.len(), "strict match exhausted for {}", input);
                Err(MatchError::Exhausted { input })
            }
        }
    }

    /// Evaluate cases in order and return the first output, or `Failure`
    pub fn execute_non_strict(&self, input: I) -> MatchResult<R> {
        for (index, case) in self.cases.iter().enumerate() {
            if let MatchResult::Success(output) = case.evaluate(input.clone()) {
                trace!(case = index, description = case.description(), "case matched");
                return MatchResult::Success(output);
            }
        }
        MatchResult::Failure
    }

    /// Lazily yield outputs starting at the first matching case
    ///
    /// Nothing is evaluated until the iterator is pulled. After a yielded
    /// case that does not fall through, the iterator ends without looking at
    /// any further case.
    pub fn execute_with_fallthrough(&self, input: I) -> Fallthrough<I, R> {
        Fallthrough {
            cases: Arc::clone(&self.cases),
            input,
            position: 0,
            default_fallthrough: self.default_fallthrough,
            finished: false,
        }
    }
}

impl<I, R> Match<I, R>
where
    I: Clone + 'static,
    R: 'static,
{
    /// Turn this match into a function with strict semantics
    pub fn to_strict_fn(&self) -> impl Fn(I) -> Result<R> + Send + Sync + 'static
    where
        I: Debug,
    {
        let this = self.clone();
        move |input| this.execute_strict(input)
    }

    /// Turn this match into a function with non-strict semantics
    pub fn to_non_strict_fn(&self) -> impl Fn(I) -> MatchResult<R> + Send + Sync + 'static {
        let this = self.clone();
        move |input| this.execute_non_strict(input)
    }
}

impl<I, R> Default for Match<I, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, R> Clone for Match<I, R> {
    fn clone(&self) -> Self {
        Self {
            cases: Arc::clone(&self.cases),
            default_fallthrough: self.default_fallthrough,
        }
    }
}

impl<I, R> fmt::Debug for Match<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("cases", &self.cases)
            .field("default_fallthrough", &self.default_fallthrough)
            .finish()
    }
}

/// Lazy sequence of outputs produced by [`Match::execute_with_fallthrough`]
pub struct Fallthrough<I, R> {
    cases: Arc<Vec<Case<I, R>>>,
    input: I,
    position: usize,
    default_fallthrough: bool,
    finished: bool,
}

impl<I, R> Iterator for Fallthrough<I, R>
where
    I: Clone,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if self.finished {
            return None;
        }

        while let Some(case) = self.cases.get(self.position) {
            let index = self.position;
            self.position += 1;

            if let MatchResult::Success(output) = case.evaluate(self.input.clone()) {
                if !case.falls_through(self.default_fallthrough) {
                    trace!(case = index, "fallthrough stopped");
                    self.finished = true;
                }
                return Some(output);
            }
        }

        self.finished = true;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, Some(self.cases.len() - self.position))
        }
    }
}

impl<I: Clone, R> FusedIterator for Fallthrough<I, R> {}

impl<I, R> fmt::Debug for Fallthrough<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fallthrough")
            .field("position", &self.position)
            .field("remaining", &(self.cases.len() - self.position))
            .field("finished", &self.finished)
            .finish()
    }
}
