//! # trace-registry — Batch Registry Operations
//!
//! Provides the operational layer over the custody primitives in
//! `trace-core`:
//!
//! - **Registry** ([`registry`]): in-memory batch collection backed by
//!   `DashMap`. Create, guarded transition with atomic commit, read
//!   accessors, and the next-action label derived from the same table
//!   that drives the guards.
//!
//! - **Leaderboard** ([`leaderboard`]): pure read-side ranking of
//!   completed batches by elapsed custody duration, fastest first,
//!   truncated to the top 10. Recomputed from scratch on every call.
//!
//! - **Snapshot** ([`snapshot`]): the `(batch id, status)` read surface
//!   an external publisher consumes, plus a sealed publish-target trait
//!   with a mock implementation. The publisher's ledger mechanics and
//!   status-hash computation live outside this workspace.

pub mod leaderboard;
pub mod registry;
pub mod snapshot;

// Re-export primary types.
pub use leaderboard::{leaderboard, LeaderboardEntry, LEADERBOARD_LIMIT};
pub use registry::BatchRegistry;
pub use snapshot::{
    MockPublishTarget, PublishError, PublishReceipt, PublishTarget, StatusCommitment,
    StatusSnapshot,
};
