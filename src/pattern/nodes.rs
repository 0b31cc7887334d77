//! Combinator nodes that wrap one or two patterns
//!
//! Each node owns its operands exclusively; a composed pattern is an
//! immutable expression tree.

use crate::narrow::Narrow;
use crate::pattern::traits::{combine_descriptions, Pattern};
use crate::result::MatchResult;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

/// Node that transforms the successful value of a pattern
pub struct MapPattern<P, F, O> {
    inner: P,
    mapper: F,
    _marker: PhantomData<fn() -> O>,
}

impl<P, F, O> MapPattern<P, F, O> {
    /// Create a new map node
    pub fn new(inner: P, mapper: F) -> Self {
        Self {
            inner,
            mapper,
            _marker: PhantomData,
        }
    }
}

impl<I, O, U, P, F> Pattern<I, U> for MapPattern<P, F, O>
where
    P: Pattern<I, O>,
    F: Fn(O) -> U,
{
    fn matches(&self, input: I) -> MatchResult<U> {
        self.inner.matches(input).map(&self.mapper)
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

/// Node that feeds one pattern's output into a second pattern
pub struct PipePattern<P, Q, M> {
    first: P,
    second: Q,
    description: String,
    _marker: PhantomData<fn() -> M>,
}

impl<P, Q, M> PipePattern<P, Q, M> {
    /// Create a new pipe node
    pub fn new<I, O>(first: P, second: Q) -> Self
    where
        P: Pattern<I, M>,
        Q: Pattern<M, O>,
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

impl<I, M, O, P, Q> Pattern<I, O> for PipePattern<P, Q, M>
where
    P: Pattern<I, M>,
    Q: Pattern<M, O>,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        self.first
            .matches(input)
            .bind(|value| self.second.matches(value))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Node that builds the second pattern from the first pattern's output
pub struct BindPattern<P, F, M, Q> {
    inner: P,
    binder: F,
    _marker: PhantomData<fn() -> (M, Q)>,
}

impl<P, F, M, Q> BindPattern<P, F, M, Q> {
    /// Create a new bind node
    pub fn new(inner: P, binder: F) -> Self {
        Self {
            inner,
            binder,
            _marker: PhantomData,
        }
    }
}

impl<I, M, O, P, F, Q> Pattern<I, O> for BindPattern<P, F, M, Q>
where
    P: Pattern<I, M>,
    F: Fn(&M) -> Q,
    Q: Pattern<M, O>,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        self.inner.matches(input).bind(|value| {
            let next = (self.binder)(&value);
            next.matches(value)
        })
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

/// Node that requires an extra predicate over a successful value
///
/// The condition runs only once the wrapped pattern has succeeded. Conditions
/// chained with [`when`](Self::when) run in the order they were added.
pub struct FilterPattern<P, F> {
    inner: P,
    condition: F,
}

impl<P, F> FilterPattern<P, F> {
    /// Create a new filter node
    pub fn new<I, O>(inner: P, condition: F) -> Self
    where
        P: Pattern<I, O>,
        F: Fn(&O) -> bool,
    {
        Self { inner, condition }
    }

    /// Append another condition, returning the extended pattern
    pub fn when<I, O, G>(self, condition: G) -> FilterPattern<Self, G>
    where
        Self: Pattern<I, O>,
        G: Fn(&O) -> bool,
    {
        FilterPattern::new(self, condition)
    }
}

impl<I, O, P, F> Pattern<I, O> for FilterPattern<P, F>
where
    P: Pattern<I, O>,
    F: Fn(&O) -> bool,
{
    fn matches(&self, input: I) -> MatchResult<O> {
        self.inner.matches(input).filter(|value| (self.condition)(value))
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}

/// Boolean operator for [`CompositePattern`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composition {
    /// Both sides must match
    And,
    /// At least one side must match
    Or,
    /// Exactly one side must match
    Xor,
}

impl Composition {
    /// Combine the outcomes of the left and right pattern
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Composition::And => left && right,
            Composition::Or => left || right,
            Composition::Xor => left != right,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Composition::And => "and",
            Composition::Or => "or",
            Composition::Xor => "xor",
        }
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Node combining two patterns over the same input with a boolean operator
///
/// Both operands are always evaluated, left before right; their
/// transformations are ignored and the original input is returned on success.
pub struct CompositePattern<L, R, O> {
    left: L,
    right: R,
    composition: Composition,
    description: String,
    _marker: PhantomData<fn() -> O>,
}

impl<L, R, O> CompositePattern<L, R, O> {
    /// Create a new composite node
    pub fn new<I>(left: L, right: R, composition: Composition) -> Self
    where
        L: Pattern<I, O>,
        R: Pattern<I, O>,
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

impl<I, O, L, R> Pattern<I, I> for CompositePattern<L, R, O>
where
    I: Clone,
    L: Pattern<I, O>,
    R: Pattern<I, O>,
{
    fn matches(&self, input: I) -> MatchResult<I> {
        let left = self.left.matches(input.clone()).is_successful();
        let right = self.right.matches(input.clone()).is_successful();

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

/// Combine two patterns with the given boolean operator
pub fn compose<I, O, L, R>(left: L, right: R, composition: Composition) -> CompositePattern<L, R, O>
where
    L: Pattern<I, O>,
    R: Pattern<I, O>,
{
    CompositePattern::new(left, right, composition)
}

/// Node that succeeds iff the wrapped pattern fails
pub struct NotPattern<P, O> {
    inner: P,
    description: String,
    _marker: PhantomData<fn() -> O>,
}

impl<P, O> NotPattern<P, O> {
    /// Create a new negation node
    pub fn new<I>(inner: P) -> Self
    where
        P: Pattern<I, O>,
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

impl<I, O, P> Pattern<I, I> for NotPattern<P, O>
where
    I: Clone,
    P: Pattern<I, O>,
{
    fn matches(&self, input: I) -> MatchResult<I> {
        if self.inner.matches(input.clone()).is_successful() {
            MatchResult::Failure
        } else {
            MatchResult::Success(input)
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Pattern that succeeds iff the input narrows to `U` at runtime
pub struct TypePattern<U> {
    description: String,
    _marker: PhantomData<fn() -> U>,
}

impl<U> TypePattern<U> {
    /// Create a new type-discrimination pattern
    pub fn new() -> Self {
        Self {
            description: format!("x is {}", type_name::<U>()),
            _marker: PhantomData,
        }
    }
}

impl<U> Default for TypePattern<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> Clone for TypePattern<U> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for TypePattern<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePattern")
            .field("description", &self.description)
            .finish()
    }
}

impl<I, U> Pattern<I, U> for TypePattern<U>
where
    I: Narrow<U>,
{
    fn matches(&self, input: I) -> MatchResult<U> {
        MatchResult::from(Narrow::<U>::narrow(input).ok())
    }

    fn description(&self) -> &str {
        &self.description
    }
}
