//! Composable pattern matching for Rust
//!
//! This library describes *patterns* (a predicate plus an optional value
//! transformation), combines them algebraically, and evaluates ordered lists
//! of (pattern, handler) cases against an input, synchronously or
//! asynchronously, with configurable fallthrough.
//!
//! # Example
//!
//! ```
//! use matchkit_rs::pattern::{any, equal_to, greater_than, less_than, Pattern, PatternExt};
//! use matchkit_rs::{Match, MatchError, MatchResult};
//!
//! // Basic dispatch
//! let name = Match::new()
//!     .case(equal_to(1), |_| "one".to_string())
//!     .case(equal_to(2), |_| "two".to_string())
//!     .case(any(), |x: i32| x.to_string());
//! assert_eq!(name.execute_strict(2)?, "two");
//! assert_eq!(name.execute_strict(5)?, "5");
//!
//! // Fallthrough: the third case is never evaluated
//! let tags = Match::new()
//!     .case_with_fallthrough(greater_than(0), |_| "positive", true)
//!     .case_with_fallthrough(less_than(10), |_| "small", false)
//!     .case(any(), |_| "any");
//! let outputs: Vec<_> = tags.execute_with_fallthrough(5).collect();
//! assert_eq!(outputs, vec!["positive", "small"]);
//!
//! // Exhaustion
//! let only_one = Match::new().case(equal_to(1), |_| ());
//! assert!(matches!(only_one.execute_strict(2), Err(MatchError::Exhausted { .. })));
//! assert_eq!(only_one.execute_non_strict(2), MatchResult::Failure);
//!
//! // Patterns compose
//! let digit = greater_than(-1).and(less_than(10)).negate();
//! assert_eq!(digit.description(), "not ((x > -1) and (x < 10))");
//! # Ok::<(), MatchError>(())
//! ```
//!
//! # Async
//!
//! ```
//! use matchkit_rs::pattern::asynchronous::from_fn;
//! use matchkit_rs::pattern::{any, PatternExt};
//! use matchkit_rs::{AsyncMatchBuilder, MatchResult};
//!
//! # futures::executor::block_on(async {
//! let lookup = from_fn(|id: u32| async move { MatchResult::from((id == 7).then_some("admin")) });
//!
//! let role = AsyncMatchBuilder::new()
//!     .case(lookup, |role| async move { role.to_string() })
//!     .sync_case(any().as_async(), |_| "guest".to_string())
//!     .build();
//!
//! assert_eq!(role.execute_strict(7).await.unwrap(), "admin");
//! assert_eq!(role.execute_strict(8).await.unwrap(), "guest");
//! # });
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use config::MatchConfig;
pub use engine::{AsyncCase, AsyncMatch, AsyncMatchBuilder, Case, Fallthrough, Match, MatchBuilder};
pub use error::{ErrorContext, MatchError, Result};
pub use narrow::Narrow;
pub use registry::MatchRegistry;
pub use result::MatchResult;

/// Error types
pub mod error;

/// Runtime narrowing used by type tests and casts
pub mod narrow;

/// Success/failure result of a match attempt
pub mod result;

/// Patterns and combinators
pub mod pattern;

/// Case lists and evaluation
pub mod engine;

/// Named storage for built matches
pub mod registry;

/// Match configuration
pub mod config;

/// Commonly used traits and types
pub mod prelude {
    pub use crate::engine::{AsyncMatch, AsyncMatchBuilder, Match, MatchBuilder};
    pub use crate::pattern::asynchronous::{AsyncPattern, AsyncPatternExt};
    pub use crate::pattern::{Pattern, PatternExt};
    pub use crate::{MatchError, MatchResult, Narrow};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber with default settings
///
/// Filtering follows `RUST_LOG`. Fails if a global subscriber is already set.
pub fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()?;
    Ok(())
}
