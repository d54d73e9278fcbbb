//! Property-based tests for the dispatch engine and router.
//!
//! Random unit lists over every target and a fixed catalog are dispatched
//! through a recording registry, and the call log is checked for:
//! 1. Idempotence: the same input yields the same ordered call sequence
//! 2. Per-unit pairing on synchronous backends
//! 3. Single startup and shutdown on run-wide backends
//! 4. Skipped and artificial types never reaching a leaf hook

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use glue_dispatch::testing::{catalog, unit, Call, RecordingFactory};
use glue_dispatch::{
    AsyncBackendId, BackendId, BackendRegistry, CustomBackendRouter, DispatchEngine, RunConfig,
    RunState, SyncBackendId,
};
use glue_ir::{GenerationUnit, TargetLanguage, TypeCatalog};
use proptest::prelude::*;

const TYPES: [&str; 5] = ["T1", "T2", "T3", "T4", "T5"];

fn fixture_catalog() -> TypeCatalog {
    let mut catalog = catalog(&[
        ("T1", "SEQUENCE"),
        ("T2", "INTEGER"),
        ("~T3", "ENUMERATED"),
        ("T4", "CHOICE"),
        ("T5", "SET OF"),
    ]);
    catalog.skip("T4");
    catalog
}

/// A unit on any target with up to four parameters. GUI telecommands
/// without parameters are fatal in the router, so they get a polling name.
fn unit_strategy() -> impl Strategy<Value = GenerationUnit> {
    (
        0..TargetLanguage::ALL.len(),
        prop::collection::vec(0..TYPES.len(), 0..4),
        0..1000u32,
    )
        .prop_map(|(target, params, n)| {
            let target = TargetLanguage::ALL[target];
            let types: Vec<&str> = params.iter().map(|&i| TYPES[i]).collect();
            unit(target, &format!("gui_polling_{n}"), &types)
        })
}

fn dispatch(units: &[GenerationUnit], catalog: &TypeCatalog) -> Vec<Call> {
    let mut factory = RecordingFactory::new();
    let log = factory.log();
    let mut registry = BackendRegistry::build(&mut factory);
    let config = RunConfig::default();
    let mut state = RunState::new();
    DispatchEngine::new(&mut registry, &config)
        .run(units, catalog, &mut state)
        .unwrap();
    CustomBackendRouter::new(&mut registry, &config)
        .run(units, catalog, &mut state)
        .unwrap();
    let calls = log.borrow().clone();
    calls
}

fn calls_of(calls: &[Call], backend: BackendId) -> Vec<&Call> {
    calls.iter().filter(|c| c.backend() == backend).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Re-running on identical input yields the identical call sequence.
    #[test]
    fn prop_dispatch_is_idempotent(units in prop::collection::vec(unit_strategy(), 0..12)) {
        let catalog = fixture_catalog();
        let first = dispatch(&units, &catalog);
        let second = dispatch(&units, &catalog);
        prop_assert_eq!(first, second);
    }

    /// Every leaf on a synchronous backend lies between a startup and its
    /// shutdown, and sessions never nest.
    #[test]
    fn prop_sync_sessions_are_paired(units in prop::collection::vec(unit_strategy(), 0..12)) {
        let calls = dispatch(&units, &fixture_catalog());
        for id in SyncBackendId::ALL {
            let mut open = false;
            for call in calls_of(&calls, BackendId::Sync(id)) {
                match call {
                    Call::Startup { .. } => {
                        prop_assert!(!open, "{} started twice", id.as_str());
                        open = true;
                    }
                    Call::Leaf { .. } => prop_assert!(open, "{} leaf outside session", id.as_str()),
                    Call::Shutdown { .. } => {
                        prop_assert!(open, "{} shut down without startup", id.as_str());
                        open = false;
                    }
                    Call::Final { .. } => prop_assert!(!open, "{} finalized mid-session", id.as_str()),
                }
            }
            prop_assert!(!open, "{} left open", id.as_str());
        }
    }

    /// A run-wide backend starts at most once, before any leaf, and shuts
    /// down exactly once, last.
    #[test]
    fn prop_async_lifecycle_spans_the_run(units in prop::collection::vec(unit_strategy(), 0..12)) {
        let calls = dispatch(&units, &fixture_catalog());
        for id in AsyncBackendId::ALL {
            let own = calls_of(&calls, BackendId::Async(id));
            if own.is_empty() {
                continue;
            }
            prop_assert!(
                matches!(own[0], Call::Startup { .. }),
                "{} did not start with a startup",
                id.as_str()
            );
            prop_assert!(
                matches!(own[own.len() - 1], Call::Shutdown { .. }),
                "{} did not end with a shutdown",
                id.as_str()
            );
            let startups = own.iter().filter(|c| matches!(c, Call::Startup { .. })).count();
            let shutdowns = own.iter().filter(|c| matches!(c, Call::Shutdown { .. })).count();
            prop_assert_eq!(startups, 1);
            prop_assert_eq!(shutdowns, 1);
        }
    }

    /// Skipped and artificial types are excluded on every path.
    #[test]
    fn prop_excluded_types_never_reach_leaves(units in prop::collection::vec(unit_strategy(), 0..12)) {
        let calls = dispatch(&units, &fixture_catalog());
        for call in &calls {
            if let Call::Leaf { type_name, .. } = call {
                prop_assert!(type_name != "T3" && type_name != "T4", "{} reached a leaf", type_name);
            }
        }
    }
}
