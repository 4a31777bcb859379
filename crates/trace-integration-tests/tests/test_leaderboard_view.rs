//! # Leaderboard — Read-Side View Integration Tests
//!
//! The leaderboard is recomputed from the registry's current contents
//! on every call: these tests check ranking, the top-10 cap, and that
//! the view tracks the registry without holding state of its own.

use trace_core::{Role, State};
use trace_registry::{leaderboard, BatchRegistry, LEADERBOARD_LIMIT};

fn complete_chain(registry: &BatchRegistry, id: &str) {
    registry
        .transition(id, State::Produced, Role::Manufacturer, None)
        .expect("produce");
    registry
        .transition(id, State::Collected, Role::Collector, None)
        .expect("collect");
    registry
        .transition(id, State::Cleared, Role::Customs, None)
        .expect("clear");
    registry
        .transition(id, State::Retail, Role::Retailer, None)
        .expect("retail");
}

#[test]
fn board_grows_as_batches_complete() {
    let registry = BatchRegistry::new();
    for i in 0..3 {
        registry
            .create(&format!("B-{i}"), None, None)
            .expect("create");
    }
    assert!(leaderboard(&registry).is_empty());

    complete_chain(&registry, "B-0");
    assert_eq!(leaderboard(&registry).len(), 1);

    complete_chain(&registry, "B-2");
    let rows = leaderboard(&registry);
    assert_eq!(rows.len(), 2);
    // B-1 never finished and stays off the board.
    assert!(rows.iter().all(|r| r.batch_id != "B-1"));
}

#[test]
fn board_is_sorted_and_never_exceeds_the_cap() {
    let registry = BatchRegistry::new();
    for i in 0..(LEADERBOARD_LIMIT + 5) {
        let id = format!("B-{i:02}");
        registry.create(&id, None, None).expect("create");
        complete_chain(&registry, &id);
    }

    let rows = leaderboard(&registry);
    assert_eq!(rows.len(), LEADERBOARD_LIMIT);
    for pair in rows.windows(2) {
        assert!(pair[0].duration_seconds <= pair[1].duration_seconds);
    }
}

#[test]
fn durations_are_non_negative_wall_clock_deltas() {
    let registry = BatchRegistry::new();
    registry
        .create("B-1", None, Some("A;B;C"))
        .expect("create");
    complete_chain(&registry, "B-1");

    let rows = leaderboard(&registry);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].duration_seconds >= 0.0);
    assert_eq!(rows[0].item_count, 3);
}
