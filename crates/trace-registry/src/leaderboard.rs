// SPDX-License-Identifier: BUSL-1.1
//! # Completion-Time Leaderboard
//!
//! Pure derived view over the registry's current contents: batches that
//! have both timing marks set, ranked ascending by elapsed custody
//! duration (fastest first, ties keep registration order), truncated to
//! the top 10. The view holds no state of its own and is recomputed
//! from scratch on every call, so it can never go stale.

use serde::Serialize;

use crate::registry::BatchRegistry;

/// Maximum number of leaderboard rows returned.
pub const LEADERBOARD_LIMIT: usize = 10;

/// One ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub batch_id: String,
    pub item_count: usize,
    pub duration_seconds: f64,
}

/// Rank completed batches by elapsed custody duration.
pub fn leaderboard(registry: &BatchRegistry) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<LeaderboardEntry> = registry
        .list()
        .into_iter()
        .filter_map(|batch| {
            batch.duration_seconds().map(|duration_seconds| LeaderboardEntry {
                batch_id: batch.id,
                item_count: batch.items.len(),
                duration_seconds,
            })
        })
        .collect();
    // sort_by is stable, so equal durations keep registration order.
    rows.sort_by(|a, b| a.duration_seconds.total_cmp(&b.duration_seconds));
    rows.truncate(LEADERBOARD_LIMIT);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use trace_core::{Batch, Role, State};

    /// Build a completed batch with a fixed custody duration.
    fn completed_batch(id: &str, items: usize, seconds: i64) -> Batch {
        let start = Utc::now() - Duration::hours(1);
        let mut batch = Batch::new(
            id,
            None,
            (0..items).map(|i| format!("ITEM-{i:04}")).collect(),
        );
        batch.record_transition(State::Produced, Role::Manufacturer, None, start);
        batch.record_transition(State::Collected, Role::Collector, None, start);
        batch.record_transition(State::Cleared, Role::Customs, None, start);
        batch.record_transition(
            State::Retail,
            Role::Retailer,
            None,
            start + Duration::seconds(seconds),
        );
        batch
    }

    #[test]
    fn only_completed_batches_are_ranked() {
        let registry = BatchRegistry::new();
        registry.create("B-open", None, None).expect("create");
        registry
            .transition("B-open", State::Produced, Role::Manufacturer, None)
            .expect("produce");
        registry.insert(completed_batch("B-done", 3, 600));

        let rows = leaderboard(&registry);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].batch_id, "B-done");
        assert_eq!(rows[0].item_count, 3);
        assert_eq!(rows[0].duration_seconds, 600.0);
    }

    #[test]
    fn fastest_first() {
        let registry = BatchRegistry::new();
        registry.insert(completed_batch("B-slow", 0, 900));
        registry.insert(completed_batch("B-fast", 0, 60));
        registry.insert(completed_batch("B-mid", 0, 300));

        let ids: Vec<String> = leaderboard(&registry)
            .into_iter()
            .map(|r| r.batch_id)
            .collect();
        assert_eq!(ids, vec!["B-fast", "B-mid", "B-slow"]);
    }

    #[test]
    fn sorted_non_decreasing_and_capped_at_limit() {
        let registry = BatchRegistry::new();
        for i in 0..15 {
            registry.insert(completed_batch(&format!("B-{i:02}"), 0, 1000 - i * 10));
        }

        let rows = leaderboard(&registry);
        assert_eq!(rows.len(), LEADERBOARD_LIMIT);
        for pair in rows.windows(2) {
            assert!(pair[0].duration_seconds <= pair[1].duration_seconds);
        }
        // The five slowest batches fall off the board.
        assert!(rows.iter().all(|r| r.duration_seconds <= 950.0));
    }

    #[test]
    fn equal_durations_keep_registration_order() {
        let registry = BatchRegistry::new();
        let base = Utc::now() - Duration::hours(2);

        let mut earlier = completed_batch("B-later-id-earlier-reg", 0, 300);
        earlier.created_at = base;
        let mut later = completed_batch("B-a-earlier-id-later-reg", 0, 300);
        later.created_at = base + Duration::minutes(5);

        // Map insertion order is irrelevant; registration time decides.
        registry.insert(later);
        registry.insert(earlier);

        let ids: Vec<String> = leaderboard(&registry)
            .into_iter()
            .map(|r| r.batch_id)
            .collect();
        assert_eq!(
            ids,
            vec!["B-later-id-earlier-reg", "B-a-earlier-id-later-reg"]
        );
    }

    #[test]
    fn empty_registry_yields_empty_board() {
        let registry = BatchRegistry::new();
        assert!(leaderboard(&registry).is_empty());
    }

    #[test]
    fn sub_second_durations_rank_by_milliseconds() {
        let start = Utc::now();
        let mut batch = Batch::new("B-1", None, Vec::new());
        batch.record_transition(State::Produced, Role::Manufacturer, None, start);
        batch.record_transition(State::Collected, Role::Collector, None, start);
        batch.record_transition(State::Cleared, Role::Customs, None, start);
        batch.record_transition(
            State::Retail,
            Role::Retailer,
            None,
            start + Duration::milliseconds(1500),
        );

        let registry = BatchRegistry::new();
        registry.insert(batch);
        let rows = leaderboard(&registry);
        assert_eq!(rows[0].duration_seconds, 1.5);
    }
}
