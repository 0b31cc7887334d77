//! Factory functions for common primitive patterns
//!
//! These are thin predicate-backed patterns with a description attached. They
//! pass their input through unchanged, except [`some`] which unwraps an
//! `Option` and [`type_of`] which narrows to a more specific type.

use crate::pattern::nodes::TypePattern;
use crate::pattern::simple::{from_fn, from_predicate, SimplePattern};
use crate::result::MatchResult;
use std::fmt::Debug;

/// Matches every input
pub fn any<T>() -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>> {
    from_fn(MatchResult::Success).with_description("any")
}

/// Matches no input
pub fn never<T>() -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>> {
    from_fn(|_: T| MatchResult::Failure).with_description("never")
}

/// Matches inputs equal to `expected`
pub fn equal_to<T>(expected: T) -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>>
where
    T: PartialEq + Debug,
{
    let description = format!("x == {:?}", expected);
    from_predicate(move |x: &T| *x == expected).with_description(description)
}

/// Matches inputs not equal to `expected`
pub fn not_equal_to<T>(expected: T) -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>>
where
    T: PartialEq + Debug,
{
    let description = format!("x != {:?}", expected);
    from_predicate(move |x: &T| *x != expected).with_description(description)
}

/// Matches inputs strictly less than `bound`
pub fn less_than<T>(bound: T) -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>>
where
    T: PartialOrd + Debug,
{
    let description = format!("x < {:?}", bound);
    from_predicate(move |x: &T| *x < bound).with_description(description)
}

/// Matches inputs less than or equal to `bound`
pub fn less_or_equal<T>(bound: T) -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>>
where
    T: PartialOrd + Debug,
{
    let description = format!("x <= {:?}", bound);
    from_predicate(move |x: &T| *x <= bound).with_description(description)
}

/// Matches inputs strictly greater than `bound`
pub fn greater_than<T>(bound: T) -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>>
where
    T: PartialOrd + Debug,
{
    let description = format!("x > {:?}", bound);
    from_predicate(move |x: &T| *x > bound).with_description(description)
}

/// Matches inputs greater than or equal to `bound`
pub fn greater_or_equal<T>(bound: T) -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>>
where
    T: PartialOrd + Debug,
{
    let description = format!("x >= {:?}", bound);
    from_predicate(move |x: &T| *x >= bound).with_description(description)
}

/// Matches inputs in the inclusive range `low..=high`
pub fn between<T>(low: T, high: T) -> SimplePattern<T, T, impl Fn(T) -> MatchResult<T>>
where
    T: PartialOrd + Debug,
{
    let description = format!("{:?} <= x <= {:?}", low, high);
    from_predicate(move |x: &T| *x >= low && *x <= high).with_description(description)
}

/// Matches `Some` and unwraps the value
pub fn some<T>() -> SimplePattern<Option<T>, T, impl Fn(Option<T>) -> MatchResult<T>> {
    from_fn(|x: Option<T>| MatchResult::from(x)).with_description("x is not none")
}

/// Matches `None`
pub fn is_none<T>(
) -> SimplePattern<Option<T>, Option<T>, impl Fn(Option<T>) -> MatchResult<Option<T>>> {
    from_predicate(|x: &Option<T>| x.is_none()).with_description("x is none")
}

/// Matches inputs that narrow to `U`
///
/// # Examples
///
/// ```
/// use matchkit_rs::pattern::{type_of, Pattern};
/// use matchkit_rs::MatchResult;
/// use std::any::Any;
///
/// let strings = type_of::<String>();
/// let value: Box<dyn Any> = Box::new(String::from("hi"));
/// assert_eq!(strings.matches(value), MatchResult::Success("hi".to_string()));
///
/// let value: Box<dyn Any> = Box::new(3_u8);
/// assert!(strings.matches(value).is_failure());
/// ```
pub fn type_of<U>() -> TypePattern<U> {
    TypePattern::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;
    use rstest::rstest;

    #[rstest]
    #[case(1, true, false, false, true)]
    #[case(5, false, false, true, true)]
    #[case(10, false, false, true, false)]
    #[case(-1, false, true, false, true)]
    fn test_comparisons(
        #[case] x: i32,
        #[case] is_one: bool,
        #[case] negative: bool,
        #[case] at_least_five: bool,
        #[case] small: bool,
    ) {
        assert_eq!(equal_to(1).matches(x).is_successful(), is_one);
        assert_eq!(not_equal_to(1).matches(x).is_successful(), !is_one);
        assert_eq!(less_than(0).matches(x).is_successful(), negative);
        assert_eq!(greater_or_equal(5).matches(x).is_successful(), at_least_five);
        assert_eq!(less_or_equal(9).matches(x).is_successful(), small);
        assert_eq!(greater_than(-1).matches(x).is_successful(), !negative);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(equal_to(1).description(), "x == 1");
        assert_eq!(less_than(2.5).description(), "x < 2.5");
        assert_eq!(between('a', 'f').description(), "'a' <= x <= 'f'");
        assert_eq!(any::<u8>().description(), "any");
        assert_eq!(is_none::<u8>().description(), "x is none");
    }

    #[test]
    fn test_any_and_never() {
        assert_eq!(any().matches("x"), MatchResult::Success("x"));
        assert_eq!(never().matches("x"), MatchResult::Failure);
    }

    #[test]
    fn test_option_patterns() {
        assert_eq!(some().matches(Some(4)), MatchResult::Success(4));
        assert_eq!(some::<i32>().matches(None), MatchResult::Failure);
        assert_eq!(is_none::<i32>().matches(None), MatchResult::Success(None));
        assert_eq!(is_none().matches(Some(1)), MatchResult::Failure);
    }

    #[test]
    fn test_between_is_inclusive() {
        let pattern = between(1, 3);
        assert!(pattern.matches(1).is_successful());
        assert!(pattern.matches(3).is_successful());
        assert!(pattern.matches(4).is_failure());
    }
}
