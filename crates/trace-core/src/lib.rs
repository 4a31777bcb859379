//! # trace-core — Custody Chain Primitives
//!
//! Foundational types for the TraceLane stack:
//!
//! - **States & Roles** ([`state`]): the ordered custody chain
//!   (`Init → Produced → Collected → Cleared → Retail`), the four acting
//!   roles, and linear progress derived from chain position.
//!
//! - **Batch Model** ([`batch`]): the batch aggregate with its append-only
//!   transition history, timing metrics, and item tokenization.
//!
//! - **Lifecycle FSM** ([`fsm`]): the static transition table mapping each
//!   state to its single allowed successor and the role authorized to
//!   advance it, plus the guard chain evaluated before any commit.
//!
//! - **Rejection Taxonomy** ([`error`]): one variant per guard failure,
//!   carrying the structured fields a boundary layer needs to render a
//!   message. Rejections are returned values, never panics.
//!
//! ## Design Principle
//!
//! The same table drives both the guard chain and the "next action" label
//! shown to callers, so the two can never diverge. History is append-only:
//! a batch's `status` always equals the `to` of its last history entry, or
//! `Init` when the history is empty.

pub mod batch;
pub mod error;
pub mod fsm;
pub mod state;

// Re-export primary types.
pub use batch::{tokenize_items, Batch, BatchMetrics, TransitionRecord};
pub use error::TraceError;
pub use fsm::{check_transition, next_step};
pub use state::{ParseRoleError, ParseStateError, Role, State};
