//! Pattern abstraction, primitives and combinators
//!
//! A pattern is a predicate plus an optional transformation: given an input it
//! either fails or succeeds with an output. Patterns compose into immutable
//! expression trees through [`PatternExt`]; the asynchronous family lives in
//! [`asynchronous`].

pub mod asynchronous;
pub mod cache;
pub mod ext;
pub mod factory;
pub mod nodes;
pub mod simple;
pub mod traits;

pub use asynchronous::{AsyncAdapter, AsyncPattern, AsyncPatternExt, SharedAsyncPattern};
pub use cache::{CacheStats, CachingPattern, UnsyncCachingPattern};
pub use ext::PatternExt;
pub use factory::*;
pub use nodes::{
    compose, BindPattern, CompositePattern, Composition, FilterPattern, MapPattern, NotPattern,
    PipePattern, TypePattern,
};
pub use simple::{from_fn, from_predicate, SimplePattern};
pub use traits::{Pattern, SharedPattern};
