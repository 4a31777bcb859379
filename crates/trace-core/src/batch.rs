// SPDX-License-Identifier: BUSL-1.1
//! # Batch Aggregate
//!
//! The tracked unit of custody. A batch is created at `Init` with an
//! empty history and is mutated only by committing transitions: each
//! commit appends one immutable [`TransitionRecord`] and advances
//! `status` to that record's `to` state. History is never edited,
//! removed, or reordered.
//!
//! Timing metrics are set exactly once each: `started_at` the first time
//! the batch reaches `Produced`, `finished_at` the first time it reaches
//! `Retail`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{Role, State};

/// A single committed transition within a batch's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub record_id: Uuid,
    pub from: State,
    pub to: State,
    pub by: Role,
    pub at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Timing and rejection counters for a batch.
///
/// `error_count` only ever increments. The engine currently records no
/// guard failures against it; it is carried for boundary layers that do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    pub error_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// The batch aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Registry-unique identifier, immutable after creation.
    pub id: String,
    pub status: State,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Item identifiers carried by this batch, in input order.
    pub items: Vec<String>,
    /// Append-only transition history, insertion order = chronological.
    pub history: Vec<TransitionRecord>,
    pub metrics: BatchMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Batch {
    /// Create a batch at the start of the custody chain.
    pub fn new(id: impl Into<String>, product: Option<String>, items: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            status: State::Init,
            product,
            items,
            history: Vec::new(),
            metrics: BatchMetrics::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Timestamp of the last committed transition, or the batch's
    /// creation time when no transition has been committed yet.
    pub fn last_transition_at(&self) -> DateTime<Utc> {
        self.history.last().map(|r| r.at).unwrap_or(self.created_at)
    }

    /// Linear progress percentage for the batch's current state.
    pub fn progress(&self) -> u8 {
        self.status.progress()
    }

    /// Elapsed custody duration in seconds, once both ends of the chain
    /// have been reached.
    pub fn duration_seconds(&self) -> Option<f64> {
        match (self.metrics.started_at, self.metrics.finished_at) {
            (Some(started), Some(finished)) => {
                Some((finished - started).num_milliseconds() as f64 / 1000.0)
            }
            _ => None,
        }
    }

    /// Commit a transition: append the history record, advance the
    /// status, and update the timing metrics.
    ///
    /// Guards must already have passed: this is the commit half of the
    /// registry's read-validate-commit step, and it cannot fail.
    pub fn record_transition(
        &mut self,
        to: State,
        by: Role,
        note: Option<String>,
        at: DateTime<Utc>,
    ) {
        self.history.push(TransitionRecord {
            record_id: Uuid::new_v4(),
            from: self.status,
            to,
            by,
            at,
            note,
        });
        self.status = to;
        self.updated_at = at;
        if to == State::Produced && self.metrics.started_at.is_none() {
            self.metrics.started_at = Some(at);
        }
        if to == State::Retail && self.metrics.finished_at.is_none() {
            self.metrics.finished_at = Some(at);
        }
    }
}

/// Split a free-form items field into item identifiers.
///
/// Accepts ASCII commas and semicolons, any whitespace, and the
/// full-width variants `，` `；` `、` as delimiters; empty tokens are
/// dropped. Token order is preserved.
pub fn tokenize_items(text: &str) -> Vec<String> {
    text.split(|c: char| matches!(c, ',' | ';' | '，' | '；' | '、') || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
