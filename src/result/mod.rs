//! The success/failure value patterns and cases communicate through

use crate::error::{MatchError, Result};
use crate::narrow::Narrow;

/// Outcome of a single match attempt
///
/// A `MatchResult` is either `Success` carrying the (possibly transformed)
/// value, or `Failure` carrying nothing. A value that is itself "absent" is
/// expressed as `MatchResult<Option<T>>`: `Success(None)` is a successful
/// match of a null-like value and is distinct from `Failure`.
///
/// # Examples
///
/// ```
/// use matchkit_rs::MatchResult;
///
/// let result = MatchResult::success(21).map(|x| x * 2);
/// assert_eq!(result, MatchResult::Success(42));
///
/// let failed: MatchResult<i32> = MatchResult::failure();
/// assert!(failed.value().is_err());
/// assert_eq!(failed.value_or(0), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum MatchResult<T> {
    /// The match succeeded with this value
    Success(T),
    /// The match failed
    Failure,
}

impl<T> MatchResult<T> {
    /// Create a successful result
    pub fn success(value: T) -> Self {
        MatchResult::Success(value)
    }

    /// Create a failed result
    pub fn failure() -> Self {
        MatchResult::Failure
    }

    /// Whether the match succeeded
    pub fn is_successful(&self) -> bool {
        matches!(self, MatchResult::Success(_))
    }

    /// Whether the match failed
    pub fn is_failure(&self) -> bool {
        !self.is_successful()
    }

    /// Borrow the successful value
    ///
    /// Reading the value of a failed result is a programming error and is
    /// reported as [`MatchError::NotSuccessful`].
    pub fn value(&self) -> Result<&T> {
        match self {
            MatchResult::Success(value) => Ok(value),
            MatchResult::Failure => Err(MatchError::NotSuccessful),
        }
    }

    /// Take the successful value
    pub fn into_value(self) -> Result<T> {
        match self {
            MatchResult::Success(value) => Ok(value),
            MatchResult::Failure => Err(MatchError::NotSuccessful),
        }
    }

    /// Transform the value of a successful result
    ///
    /// `f` is not called when the result is a failure.
    pub fn map<U, F>(self, f: F) -> MatchResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            MatchResult::Success(value) => MatchResult::Success(f(value)),
            MatchResult::Failure => MatchResult::Failure,
        }
    }

    /// Chain another fallible step onto a successful result
    ///
    /// `f` is not called when the result is a failure.
    pub fn bind<U, F>(self, f: F) -> MatchResult<U>
    where
        F: FnOnce(T) -> MatchResult<U>,
    {
        match self {
            MatchResult::Success(value) => f(value),
            MatchResult::Failure => MatchResult::Failure,
        }
    }

    /// Keep a successful result only if its value satisfies `predicate`
    pub fn filter<F>(self, predicate: F) -> MatchResult<T>
    where
        F: FnOnce(&T) -> bool,
    {
        match self {
            MatchResult::Success(value) if predicate(&value) => MatchResult::Success(value),
            _ => MatchResult::Failure,
        }
    }

    /// Return `self` if successful, otherwise `alternative`
    pub fn or_else(self, alternative: MatchResult<T>) -> MatchResult<T> {
        match self {
            MatchResult::Success(_) => self,
            MatchResult::Failure => alternative,
        }
    }

    /// Return `self` if successful, otherwise the result of `f`
    pub fn or_else_with<F>(self, f: F) -> MatchResult<T>
    where
        F: FnOnce() -> MatchResult<T>,
    {
        match self {
            MatchResult::Success(_) => self,
            MatchResult::Failure => f(),
        }
    }

    /// The successful value, or `default`
    pub fn value_or(self, default: T) -> T {
        match self {
            MatchResult::Success(value) => value,
            MatchResult::Failure => default,
        }
    }

    /// The successful value, or the value computed by `f`
    pub fn value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            MatchResult::Success(value) => value,
            MatchResult::Failure => f(),
        }
    }

    /// Narrow the value to a more specific type
    ///
    /// Succeeds iff the value is of type `U` at runtime. See [`Narrow`] for
    /// how optional values behave.
    pub fn cast<U>(self) -> MatchResult<U>
    where
        T: Narrow<U>,
    {
        self.bind(|value| MatchResult::from(Narrow::<U>::narrow(value).ok()))
    }

    /// Borrow the value without consuming the result
    pub fn as_ref(&self) -> MatchResult<&T> {
        match self {
            MatchResult::Success(value) => MatchResult::Success(value),
            MatchResult::Failure => MatchResult::Failure,
        }
    }

    /// Convert into an `Option`
    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T> Default for MatchResult<T> {
    fn default() -> Self {
        MatchResult::Failure
    }
}

impl<T> From<Option<T>> for MatchResult<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => MatchResult::Success(value),
            None => MatchResult::Failure,
        }
    }
}

impl<T> From<MatchResult<T>> for Option<T> {
    fn from(result: MatchResult<T>) -> Self {
        match result {
            MatchResult::Success(value) => Some(value),
            MatchResult::Failure => None,
        }
    }
}

impl<T> IntoIterator for MatchResult<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_option().into_iter()
    }
}
