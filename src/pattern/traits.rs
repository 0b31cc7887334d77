//! Core traits for pattern matching

use crate::result::MatchResult;
use std::sync::Arc;

/// A reusable, composable matcher
///
/// `matches` inspects an input and, on success, produces a (possibly
/// transformed) value. Evaluation must be a pure function of the input as far
/// as the matching decision goes: caching and composition rely on it.
///
/// `description` is advisory text for logging and debugging; an empty string
/// means the pattern carries no description.
pub trait Pattern<I, O> {
    /// Match an input against this pattern
    fn matches(&self, input: I) -> MatchResult<O>;

    /// Human-readable description of the pattern
    fn description(&self) -> &str {
        ""
    }
}

/// Shared, type-erased pattern handle
pub type SharedPattern<I, O> = Arc<dyn Pattern<I, O> + Send + Sync>;

impl<I, O, P> Pattern<I, O> for &P
where
    P: Pattern<I, O> + ?Sized,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        (**self).matches(input)
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}

impl<I, O, P> Pattern<I, O> for Box<P>
where
    P: Pattern<I, O> + ?Sized,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        (**self).matches(input)
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}

impl<I, O, P> Pattern<I, O> for Arc<P>
where
    P: Pattern<I, O> + ?Sized,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        (**self).matches(input)
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}

/// Combine two descriptions with a template, or yield an empty description
/// when either side has none.
pub(crate) fn combine_descriptions(
    left: &str,
    right: &str,
    template: impl Fn(&str, &str) -> String,
) -> String {
    if left.is_empty() || right.is_empty() {
        String::new()
    } else {
        template(left, right)
    }
}
