//! Property-based tests for the pattern algebra and the match engine
//! Uses proptest to generate random inputs and case lists

use matchkit_rs::pattern::{compose, from_fn, from_predicate, Composition, Pattern, PatternExt};
use futures::executor::block_on;
use futures::StreamExt;
use matchkit_rs::{AsyncMatch, Match, MatchResult};
use proptest::prelude::*;
use std::cell::Cell;

// Strategy for generating boolean operators
fn composition_strategy() -> impl Strategy<Value = Composition> {
    prop_oneof![
        Just(Composition::And),
        Just(Composition::Or),
        Just(Composition::Xor),
    ]
}

// A small family of predicates, picked by index so failures shrink readably
fn predicate(kind: u8) -> fn(&i64) -> bool {
    match kind % 6 {
        0 => |x| *x > 0,
        1 => |x| x % 2 == 0,
        2 => |x| x % 3 == 0,
        3 => |x| (-10..10).contains(x),
        4 => |_| true,
        _ => |_| false,
    }
}

// One generated case: which predicate it uses and whether it falls through
fn case_strategy() -> impl Strategy<Value = (u8, bool)> {
    (0u8..6, any::<bool>())
}

// Length of the run the engine should yield: start at the first matching
// case, then keep yielding matching cases while the last yielded one falls
// through
fn expected_outputs(cases: &[(u8, bool)], x: i64) -> Vec<usize> {
    let mut outputs = Vec::new();
    for (index, (kind, fallthrough)) in cases.iter().enumerate() {
        if predicate(*kind)(&x) {
            outputs.push(index);
            if !fallthrough {
                break;
            }
        }
    }
    outputs
}

fn build_match(cases: &[(u8, bool)]) -> Match<i64, usize> {
    cases
        .iter()
        .enumerate()
        .fold(Match::new(), |m, (index, (kind, fallthrough))| {
            m.case_with_fallthrough(from_predicate(predicate(*kind)), move |_| index, *fallthrough)
        })
}

fn build_async_match(cases: &[(u8, bool)]) -> AsyncMatch<i64, usize> {
    cases
        .iter()
        .enumerate()
        .fold(AsyncMatch::new(), |m, (index, (kind, fallthrough))| {
            m.case_with_fallthrough(
                from_predicate(predicate(*kind)).as_async(),
                move |_| async move { index },
                *fallthrough,
            )
        })
}

proptest! {
    #[test]
    fn prop_predicate_equivalence(kind in 0u8..6, x in any::<i64>()) {
        let p = predicate(kind);
        let pattern = from_predicate(p);
        prop_assert_eq!(pattern.matches(x).is_successful(), p(&x));
    }

    #[test]
    fn prop_map_and_bind_skip_failures(x in any::<i64>()) {
        let called = Cell::new(false);
        let failed: MatchResult<i64> = MatchResult::Failure;

        let mapped = failed.map(|v| { called.set(true); v + x });
        let bound = failed.bind(|v| { called.set(true); MatchResult::Success(v) });
        let filtered = failed.filter(|_| { called.set(true); true });

        prop_assert!(mapped.is_failure());
        prop_assert!(bound.is_failure());
        prop_assert!(filtered.is_failure());
        prop_assert!(!called.get());
    }

    #[test]
    fn prop_composition_truth_tables(
        left in 0u8..6,
        right in 0u8..6,
        op in composition_strategy(),
        x in -1000i64..1000,
    ) {
        let l = predicate(left)(&x);
        let r = predicate(right)(&x);
        let pattern =
            compose(from_predicate(predicate(left)), from_predicate(predicate(right)), op);

        let expected = match op {
            Composition::And => l && r,
            Composition::Or => l || r,
            Composition::Xor => l != r,
        };
        prop_assert_eq!(pattern.matches(x).is_successful(), expected);
        if expected {
            prop_assert_eq!(pattern.matches(x), MatchResult::Success(x));
        }
    }

    #[test]
    fn prop_negation_law(kind in 0u8..6, x in any::<i64>()) {
        let inner = from_predicate(predicate(kind));
        let negated = from_predicate(predicate(kind)).negate();
        prop_assert_eq!(negated.matches(x).is_successful(), inner.matches(x).is_failure());
    }

    #[test]
    fn prop_cache_transparency(
        inputs in prop::collection::vec(prop::option::of(-50i64..50), 0..64)
    ) {
        let pure = from_fn(|x: Option<i64>| match x {
            Some(v) if v % 5 != 0 => MatchResult::Success(Some(v * 2)),
            Some(_) => MatchResult::Failure,
            None => MatchResult::Success(None),
        });
        let cached = pure.clone().cached();
        let unsync = pure.clone().cached_unsync();

        for input in inputs.iter().chain(inputs.iter()) {
            prop_assert_eq!(cached.matches(*input), pure.matches(*input));
            prop_assert_eq!(unsync.matches(*input), pure.matches(*input));
        }
    }

    #[test]
    fn prop_fallthrough_count(
        cases in prop::collection::vec(case_strategy(), 0..8),
        x in -20i64..20,
    ) {
        let m = build_match(&cases);
        let outputs: Vec<usize> = m.execute_with_fallthrough(x).collect();
        prop_assert_eq!(outputs, expected_outputs(&cases, x));
    }

    #[test]
    fn prop_strict_non_strict_equivalence(
        cases in prop::collection::vec(case_strategy(), 0..8),
        x in -20i64..20,
    ) {
        let m = build_match(&cases);
        match (m.execute_strict(x), m.execute_non_strict(x)) {
            (Ok(strict), MatchResult::Success(lenient)) => prop_assert_eq!(strict, lenient),
            (Err(_), MatchResult::Failure) => {}
            (strict, lenient) => prop_assert!(false, "diverged: {:?} vs {:?}", strict, lenient),
        }
    }

    #[test]
    fn prop_first_fallthrough_output_is_non_strict_result(
        cases in prop::collection::vec(case_strategy(), 0..8),
        x in -20i64..20,
    ) {
        let m = build_match(&cases);
        prop_assert_eq!(
            m.execute_with_fallthrough(x).next(),
            m.execute_non_strict(x).into_option()
        );
    }

    #[test]
    fn prop_async_fallthrough_matches_sync(
        cases in prop::collection::vec(case_strategy(), 0..8),
        x in -20i64..20,
    ) {
        let m = build_async_match(&cases);
        let outputs: Vec<usize> = block_on(m.execute_with_fallthrough(x).collect());
        prop_assert_eq!(&outputs, &expected_outputs(&cases, x));
        let sync_outputs: Vec<usize> = build_match(&cases).execute_with_fallthrough(x).collect();
        prop_assert_eq!(outputs, sync_outputs);
    }

    #[test]
    fn prop_async_strict_non_strict_equivalence(
        cases in prop::collection::vec(case_strategy(), 0..8),
        x in -20i64..20,
    ) {
        let m = build_async_match(&cases);
        let strict = block_on(m.execute_strict(x));
        let lenient = block_on(m.execute_non_strict(x));
        prop_assert_eq!(lenient, build_match(&cases).execute_non_strict(x));
        prop_assert_eq!(lenient.into_option(), expected_outputs(&cases, x).first().copied());
        match (strict, lenient) {
            (Ok(strict), MatchResult::Success(lenient)) => prop_assert_eq!(strict, lenient),
            (Err(_), MatchResult::Failure) => {}
            (strict, lenient) => prop_assert!(false, "diverged: {:?} vs {:?}", strict, lenient),
        }
    }
}
