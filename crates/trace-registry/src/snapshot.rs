// SPDX-License-Identifier: BUSL-1.1
//! # Status Snapshots for External Publication
//!
//! An external publisher periodically mirrors a batch's status to a
//! ledger it manages on its own. The engine's part of that contract is
//! small: hand the publisher a consistent `(batch id, status)` snapshot
//! of a committed batch. Everything else — the ledger RPC, credentials,
//! and the status-hash computation — happens outside this workspace,
//! and the hash arrives here as an opaque string.
//!
//! ## Architecture
//!
//! The [`PublishTarget`] trait defines the publisher interface. The
//! trait is **sealed** — only implementations within this crate are
//! permitted, which keeps unaudited targets out of the commit path.
//! [`MockPublishTarget`] simulates a ledger for development and tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trace_core::{Batch, State};

/// Errors from status publication.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The target rejected the commitment.
    #[error("publish rejected: {0}")]
    Rejected(String),

    /// The target ledger is unavailable.
    #[error("target unavailable: {target_id}")]
    TargetUnavailable {
        /// The publish target identifier.
        target_id: String,
    },
}

/// A consistent read of one batch's externally observed status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub batch_id: String,
    pub status: State,
    /// When the snapshot was taken, not when the status was committed.
    pub taken_at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Snapshot a committed batch.
    pub fn of(batch: &Batch) -> Self {
        Self {
            batch_id: batch.id.clone(),
            status: batch.status,
            taken_at: Utc::now(),
        }
    }
}

/// A snapshot paired with the externally computed status hash, ready
/// for submission to a publish target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCommitment {
    pub snapshot: StatusSnapshot,
    /// Opaque hash supplied by the external data pipeline.
    pub status_hash: String,
}

/// Receipt of a successful publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub commitment: StatusCommitment,
    pub target_id: String,
    /// Target-side reference for the publication (transaction id or
    /// equivalent).
    pub reference: String,
    pub published_at: DateTime<Utc>,
}

/// Trait for status publish targets.
///
/// Sealed — only implementations within this crate are permitted.
pub trait PublishTarget: private::Sealed {
    /// Submit a status commitment to the target ledger.
    fn publish(&self, commitment: StatusCommitment) -> Result<PublishReceipt, PublishError>;

    /// Return the identifier of this target.
    fn target_id(&self) -> &str;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::MockPublishTarget {}
}

/// Mock publish target for development and testing.
///
/// Accepts every commitment and issues deterministic references. It
/// provides no durability whatsoever.
#[derive(Debug)]
pub struct MockPublishTarget {
    target_id: String,
    next_seq: std::sync::atomic::AtomicU64,
}

impl MockPublishTarget {
    /// Create a new mock target.
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            next_seq: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

impl Default for MockPublishTarget {
    fn default() -> Self {
        Self::new("mock-ledger")
    }
}

impl PublishTarget for MockPublishTarget {
    fn publish(&self, commitment: StatusCommitment) -> Result<PublishReceipt, PublishError> {
        let seq = self
            .next_seq
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let reference = format!("mock-pub-{seq}-{}", commitment.snapshot.batch_id);
        Ok(PublishReceipt {
            commitment,
            target_id: self.target_id.clone(),
            reference,
            published_at: Utc::now(),
        })
    }

    fn target_id(&self) -> &str {
        &self.target_id
    }
}
