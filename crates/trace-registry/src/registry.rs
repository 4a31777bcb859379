// SPDX-License-Identifier: BUSL-1.1
//! # Batch Registry
//!
//! In-memory batch collection backed by `DashMap`. Manages creation,
//! guarded custody transitions, and read access.
//!
//! The `get_mut` pattern keeps transitions TOCTOU-free: the guard chain
//! and the commit run under a single shard write lock, so concurrent
//! callers can never commit two transitions from the same prior state.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use trace_core::{check_transition, next_step, tokenize_items};
use trace_core::{Batch, Role, State, TraceError, TransitionRecord};

/// In-memory batch registry.
///
/// Owned by the caller and passed by reference into all operations —
/// there is no ambient registry, so tests and tenants each get their
/// own independent instance.
pub struct BatchRegistry {
    batches: DashMap<String, Batch>,
}

impl BatchRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            batches: DashMap::new(),
        }
    }

    /// Register a new batch at the start of the custody chain.
    ///
    /// `items_text`, if given, is tokenized on common delimiters
    /// (commas, semicolons, whitespace, full-width variants).
    pub fn create(
        &self,
        id: &str,
        product: Option<&str>,
        items_text: Option<&str>,
    ) -> Result<Batch, TraceError> {
        match self.batches.entry(id.to_string()) {
            Entry::Occupied(_) => Err(TraceError::DuplicateId { id: id.to_string() }),
            Entry::Vacant(slot) => {
                let batch = Batch::new(
                    id,
                    product.map(str::to_string),
                    items_text.map(tokenize_items).unwrap_or_default(),
                );
                tracing::debug!(batch_id = %id, items = batch.items.len(), "batch registered");
                slot.insert(batch.clone());
                Ok(batch)
            }
        }
    }

    /// Attempt a custody transition.
    ///
    /// Runs the guard chain (existence, terminal, target order, role)
    /// and, only if every guard passes, atomically commits the status
    /// update, the history append, and the timing metrics. A rejected
    /// attempt leaves the batch entirely unchanged.
    pub fn transition(
        &self,
        id: &str,
        target: State,
        actor: Role,
        note: Option<String>,
    ) -> Result<Batch, TraceError> {
        let mut entry = self
            .batches
            .get_mut(id)
            .ok_or_else(|| TraceError::NotFound { id: id.to_string() })?;
        let batch = entry.value_mut();

        let next = check_transition(batch, target, actor)?;

        let from = batch.status;
        let now = Utc::now();
        batch.record_transition(next, actor, note, now);
        tracing::info!(
            batch_id = %id,
            %from,
            to = %next,
            by = %actor,
            "custody transition committed"
        );
        Ok(batch.clone())
    }

    /// Get a batch snapshot by id.
    pub fn get(&self, id: &str) -> Option<Batch> {
        self.batches.get(id).map(|entry| entry.value().clone())
    }

    /// List all batch snapshots, oldest registration first.
    pub fn list(&self) -> Vec<Batch> {
        let mut batches: Vec<Batch> = self
            .batches
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; registration order is
        // the stable order every read-side view builds on.
        batches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        batches
    }

    /// Transition history of a batch, in commit order.
    pub fn history(&self, id: &str) -> Result<Vec<TransitionRecord>, TraceError> {
        self.batches
            .get(id)
            .map(|entry| entry.value().history.clone())
            .ok_or_else(|| TraceError::NotFound { id: id.to_string() })
    }

    /// The next allowed step for a batch, or `None` once the chain is
    /// complete. Reads the same table the transition guards read.
    pub fn next_action(&self, id: &str) -> Result<Option<(State, Role)>, TraceError> {
        self.batches
            .get(id)
            .map(|entry| next_step(entry.value().status))
            .ok_or_else(|| TraceError::NotFound { id: id.to_string() })
    }

    /// Insert a batch snapshot directly (used for hydration from a
    /// boundary-layer state file).
    pub fn insert(&self, batch: Batch) {
        self.batches.insert(batch.id.clone(), batch);
    }

    /// Number of registered batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether the registry holds no batches.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

impl Default for BatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRegistry")
            .field("batch_count", &self.batches.len())
            .finish()
    }
}
