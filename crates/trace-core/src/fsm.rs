// SPDX-License-Identifier: BUSL-1.1
//! # Lifecycle State Machine
//!
//! A static table maps each custody state to its single allowed
//! successor and the role authorized to advance it. Only the terminal
//! state has neither. [`check_transition`] evaluates the guard chain in
//! a fixed order — terminal, target match, role match — and the first
//! failing guard wins; batch existence is the registry's guard and runs
//! before this one.
//!
//! [`next_step`] is the one source of truth: the guard chain and the
//! "next action" label shown to callers both read it, so they cannot
//! diverge.

use crate::batch::Batch;
use crate::error::TraceError;
use crate::state::{Role, State};

/// The allowed next state and the role required to reach it, or `None`
/// at the end of the custody chain.
pub fn next_step(state: State) -> Option<(State, Role)> {
    match state {
        State::Init => Some((State::Produced, Role::Manufacturer)),
        State::Produced => Some((State::Collected, Role::Collector)),
        State::Collected => Some((State::Cleared, Role::Customs)),
        State::Cleared => Some((State::Retail, Role::Retailer)),
        State::Retail => None,
    }
}

/// Evaluate the guard chain for an attempted transition.
///
/// Returns the committed-to state on success. On failure the batch must
/// be left untouched by the caller; no partial side effects occur here.
pub fn check_transition(batch: &Batch, target: State, actor: Role) -> Result<State, TraceError> {
    let Some((next, required)) = next_step(batch.status) else {
        return Err(TraceError::AlreadyTerminal {
            last_at: batch.last_transition_at(),
        });
    };
    if target != next {
        return Err(TraceError::OutOfOrder {
            current: batch.status,
            target,
        });
    }
    if actor != required {
        return Err(TraceError::RoleMismatch {
            required,
            actual: actor,
        });
    }
    Ok(next)
}
