//! Primitive patterns backed by a predicate or a matching function

use crate::pattern::traits::Pattern;
use crate::result::MatchResult;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Pattern backed by a raw `input -> MatchResult` function
///
/// This is the leaf every other pattern is eventually built from. Use
/// [`from_fn`] for a function that transforms its input, or
/// [`from_predicate`] for a plain boolean test that passes the input through.
pub struct SimplePattern<I, O, F> {
    func: Arc<F>,
    description: String,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O, F> SimplePattern<I, O, F>
where
    F: Fn(I) -> MatchResult<O>,
{
    /// Create a pattern from a matching function
    pub fn new(func: F) -> Self {
        Self {
            func: Arc::new(func),
            description: String::new(),
            _marker: PhantomData,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl<I, O, F> Pattern<I, O> for SimplePattern<I, O, F>
where
    F: Fn(I) -> MatchResult<O>,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        (self.func)(input)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl<I, O, F> Clone for SimplePattern<I, O, F> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            description: self.description.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I, O, F> fmt::Debug for SimplePattern<I, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplePattern")
            .field("description", &self.description)
            .finish()
    }
}

/// Create a pattern from a function returning a [`MatchResult`]
///
/// # Examples
///
/// ```
/// use matchkit_rs::pattern::{from_fn, Pattern};
/// use matchkit_rs::MatchResult;
///
/// let parsed = from_fn(|s: String| s.parse::<i32>().ok().into());
/// assert_eq!(parsed.matches("12".to_string()), MatchResult::Success(12));
/// assert!(parsed.matches("twelve".to_string()).is_failure());
/// ```
pub fn from_fn<I, O, F>(func: F) -> SimplePattern<I, O, F>
where
    F: Fn(I) -> MatchResult<O>,
{
    SimplePattern::new(func)
}

/// Create a pattern that succeeds with its input iff `predicate` holds
///
/// # Examples
///
/// ```
/// use matchkit_rs::pattern::{from_predicate, Pattern};
///
/// let even = from_predicate(|x: &i32| x % 2 == 0).with_description("x is even");
/// assert!(even.matches(4).is_successful());
/// assert!(even.matches(3).is_failure());
/// assert_eq!(even.description(), "x is even");
/// ```
pub fn from_predicate<I, P>(predicate: P) -> SimplePattern<I, I, impl Fn(I) -> MatchResult<I>>
where
    P: Fn(&I) -> bool,
{
    SimplePattern::new(move |input: I| {
        if predicate(&input) {
            MatchResult::Success(input)
        } else {
            MatchResult::Failure
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_equivalence() {
        let positive = from_predicate(|x: &i64| *x > 0);
        for x in [-3_i64, 0, 1, 99] {
            assert_eq!(positive.matches(x).is_successful(), x > 0);
        }
    }

    #[test]
    fn test_function_backed_pattern_transforms() {
        let length = from_fn(|s: &str| {
            if s.is_empty() {
                MatchResult::Failure
            } else {
                MatchResult::Success(s.len())
            }
        });
        assert_eq!(length.matches("four"), MatchResult::Success(4));
        assert_eq!(length.matches(""), MatchResult::Failure);
        assert_eq!(length.description(), "");
    }

    #[test]
    fn test_clone_shares_function() {
        let pattern =
            from_predicate(|s: &String| s.starts_with('a')).with_description("starts with a");
        let copy = pattern.clone();
        assert!(copy.matches("apple".to_string()).is_successful());
        assert_eq!(format!("{:?}", copy), "SimplePattern { description: \"starts with a\" }");
    }
}
