// SPDX-License-Identifier: BUSL-1.1
//! # Rejection Taxonomy
//!
//! One variant per guard failure, each carrying exactly the structured
//! fields a boundary layer needs to render a message. Rejections are
//! data returned to the caller, never faults raised up the stack, and a
//! rejected operation leaves the batch entirely unchanged.
//!
//! Code families are machine-stable: `E001` ordering, `E002` identity
//! (unknown id on transition, conflicting id on create), `E003` role,
//! `E004` terminal. `DuplicateId` and `NotFound` are distinct variants
//! even though they share the `E002` family.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::state::{Role, State};

/// Errors arising from custody chain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// Requested target is not the single allowed next state.
    #[error("out of order: cannot move from {current} directly to {target}")]
    OutOfOrder {
        /// The batch's current state.
        current: State,
        /// The state the caller requested.
        target: State,
    },

    /// No batch with this id is registered.
    #[error("unknown batch: {id}")]
    NotFound {
        /// The id that failed to resolve.
        id: String,
    },

    /// A batch with this id already exists in the registry.
    #[error("batch already registered: {id}")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// The acting role is not the one required at this step.
    #[error("role mismatch: step requires {required}, acting as {actual}")]
    RoleMismatch {
        /// Role the transition table requires at the current state.
        required: Role,
        /// Role the caller acted as.
        actual: Role,
    },

    /// The batch has already completed the custody chain.
    #[error("custody chain already complete (last transition at {last_at})")]
    AlreadyTerminal {
        /// Timestamp of the last recorded transition.
        last_at: DateTime<Utc>,
    },
}

impl TraceError {
    /// Machine-stable code family for this rejection.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfOrder { .. } => "E001",
            Self::NotFound { .. } | Self::DuplicateId { .. } => "E002",
            Self::RoleMismatch { .. } => "E003",
            Self::AlreadyTerminal { .. } => "E004",
        }
    }
}
