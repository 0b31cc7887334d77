//! Integration tests for patterns and combinators

use matchkit_rs::pattern::*;
use matchkit_rs::{MatchError, MatchResult, Narrow};
use pretty_assertions::assert_eq;
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Circle { radius: f64 },
    Rect { width: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq)]
struct Circle {
    radius: f64,
}

impl Narrow<Circle> for Shape {
    fn narrow(self) -> Result<Circle, Self> {
        match self {
            Shape::Circle { radius } => Ok(Circle { radius }),
            other => Err(other),
        }
    }
}

#[test]
fn test_match_result_accessors() {
    let ok = MatchResult::success(3);
    assert_eq!(ok.value(), Ok(&3));
    assert_eq!(ok.map(|x| x + 1).into_value(), Ok(4));

    let failed: MatchResult<i32> = MatchResult::failure();
    assert_eq!(failed.value(), Err(MatchError::NotSuccessful));
    assert_eq!(failed.or_else(MatchResult::Success(9)), MatchResult::Success(9));
    assert_eq!(failed.value_or_else(|| 7), 7);
}

#[test]
fn test_primitive_from_predicate_and_function() {
    let even = from_predicate(|x: &u32| x % 2 == 0).with_description("even");
    let halve = from_fn(|x: u32| MatchResult::from((x % 2 == 0).then_some(x / 2)));

    assert_eq!(even.matches(4), MatchResult::Success(4));
    assert_eq!(even.matches(5), MatchResult::Failure);
    assert_eq!(even.description(), "even");
    assert_eq!(halve.matches(10), MatchResult::Success(5));
    assert_eq!(halve.description(), "");
}

#[test]
fn test_descriptions_compose() {
    let range = greater_than(0).and(less_than(10));
    assert_eq!(range.description(), "(x > 0) and (x < 10)");

    let piped = range.pipe(not_equal_to(5));
    assert_eq!(piped.description(), "(x > 0) and (x < 10) => x != 5");

    let negated = equal_to(3).or(equal_to(4)).negate();
    assert_eq!(negated.description(), "not ((x == 3) or (x == 4))");

    let undescribed = from_predicate(|x: &i32| *x > 1);
    assert_eq!(greater_than(0).xor(undescribed).description(), "");
}

#[test]
fn test_cast_on_enum_variants() {
    let circles = any::<Shape>().cast::<Circle>();
    assert_eq!(
        circles.matches(Shape::Circle { radius: 1.5 }),
        MatchResult::Success(Circle { radius: 1.5 })
    );
    assert_eq!(
        circles.matches(Shape::Rect {
            width: 1.0,
            height: 2.0
        }),
        MatchResult::Failure
    );
    assert!(circles.description().starts_with("any => x is "));
    assert!(circles.description().ends_with("Circle"));

    let big_circles = any::<Shape>().pipe(type_of::<Circle>()).filter(|c: &Circle| c.radius > 10.0);
    assert!(big_circles.matches(Shape::Circle { radius: 11.0 }).is_successful());
    assert!(big_circles.matches(Shape::Circle { radius: 1.0 }).is_failure());
}

#[test]
fn test_cast_on_dynamic_values() {
    let values: Vec<Box<dyn Any>> = vec![Box::new(1_i32), Box::new("two"), Box::new(3_i32)];
    let ints = type_of::<i32>();

    let found: Vec<i32> = values
        .into_iter()
        .filter_map(|v| ints.matches(v).into_option())
        .collect();
    assert_eq!(found, vec![1, 3]);
}

#[test]
fn test_null_like_values() {
    let absent_or_small = is_none::<i32>().or(some().pipe(less_than(5)).select(Some));
    assert!(absent_or_small.matches(None).is_successful());
    assert!(absent_or_small.matches(Some(1)).is_successful());
    assert!(absent_or_small.matches(Some(9)).is_failure());

    let optional: MatchResult<Option<Box<dyn Any>>> = MatchResult::Success(None);
    assert_eq!(optional.cast::<Option<u8>>(), MatchResult::Success(None));
}

#[test]
fn test_cached_pattern_is_transparent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let expensive = from_fn(move |x: Option<u64>| {
        counter.fetch_add(1, Ordering::SeqCst);
        MatchResult::from(x.map(|v| v * v))
    })
    .with_description("square");

    let plain = expensive.clone();
    let cached = expensive.cached();
    let inputs = [Some(2), None, Some(2), None, Some(3)];

    for input in inputs {
        assert_eq!(cached.matches(input), plain.matches(input));
    }
    assert_eq!(cached.description(), "square");
    assert_eq!(cached.stats().entries, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 5 + 3);
}

#[test]
fn test_unsync_cache_counts() {
    let cached = greater_than(10).cached_unsync();
    for x in [1, 20, 1, 20, 1] {
        let _ = cached.matches(x);
    }
    assert_eq!(
        cached.stats(),
        CacheStats {
            entries: 2,
            hits: 3,
            misses: 2
        }
    );
}

#[test]
fn test_bind_chooses_pattern_from_value() {
    let thresholds = any::<(u8, u32)>()
        .bind(|(kind, _): &(u8, u32)| match kind {
            0 => less_than((0_u8, 100_u32)).shared(),
            _ => less_than((*kind, 10_u32)).shared(),
        })
        .select(|(_, value): (u8, u32)| value);

    assert_eq!(thresholds.matches((0, 50)), MatchResult::Success(50));
    assert_eq!(thresholds.matches((1, 5)), MatchResult::Success(5));
    assert_eq!(thresholds.matches((1, 50)), MatchResult::Failure);
}

#[test]
fn test_compose_free_function() {
    let both = compose(greater_than(0), less_than(5), Composition::And);
    assert_eq!(both.composition(), Composition::And);
    assert_eq!(both.matches(3), MatchResult::Success(3));
    assert_eq!(both.matches(8), MatchResult::Failure);
}
