//! Runtime narrowing from a wider type to a more specific one
//!
//! A Rust sum type plays the role a class hierarchy plays elsewhere: matching
//! "is this value a `Circle`?" means asking whether a `Shape` narrows to the
//! `Circle` variant. [`Narrow`] is that question. It backs
//! [`MatchResult::cast`](crate::MatchResult::cast),
//! [`type_of`](crate::pattern::type_of) and the `cast` combinators.
//!
//! # Examples
//!
//! ```
//! use matchkit_rs::Narrow;
//!
//! #[derive(Debug, PartialEq)]
//! struct Circle(f64);
//!
//! #[derive(Debug, PartialEq)]
//! enum Shape {
//!     Circle(Circle),
//!     Square(f64),
//! }
//!
//! impl Narrow<Circle> for Shape {
//!     fn narrow(self) -> Result<Circle, Self> {
//!         match self {
//!             Shape::Circle(circle) => Ok(circle),
//!             other => Err(other),
//!         }
//!     }
//! }
//!
//! let narrowed: Result<Circle, Shape> = Shape::Circle(Circle(1.0)).narrow();
//! assert_eq!(narrowed, Ok(Circle(1.0)));
//! assert!(Narrow::<Circle>::narrow(Shape::Square(2.0)).is_err());
//! ```

use std::any::Any;
use std::sync::Arc;

/// Conversion that succeeds only when the runtime value is of the target type
pub trait Narrow<U>: Sized {
    /// Narrow `self` to `U`, handing `self` back when it is something else
    fn narrow(self) -> Result<U, Self>;
}

impl<U: Any> Narrow<U> for Box<dyn Any> {
    fn narrow(self) -> Result<U, Self> {
        self.downcast::<U>().map(|value| *value)
    }
}

impl<U: Any> Narrow<U> for Box<dyn Any + Send> {
    fn narrow(self) -> Result<U, Self> {
        self.downcast::<U>().map(|value| *value)
    }
}

impl<U: Any + Send + Sync> Narrow<Arc<U>> for Arc<dyn Any + Send + Sync> {
    fn narrow(self) -> Result<Arc<U>, Self> {
        self.downcast::<U>()
    }
}

/// `None` narrows to `None`: the optional target admits the absent value.
impl<T, U> Narrow<Option<U>> for Option<T>
where
    T: Narrow<U>,
{
    fn narrow(self) -> Result<Option<U>, Self> {
        match self {
            None => Ok(None),
            Some(value) => value.narrow().map(Some).map_err(Some),
        }
    }
}
