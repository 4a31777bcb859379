// SPDX-License-Identifier: BUSL-1.1
//! # Custody States and Roles
//!
//! The custody chain is a fixed, ordered enumeration. Order is
//! significant: it defines the only legal direction of travel (strictly
//! forward, one step at a time) and the linear progress percentage.
//!
//! Progress is always recomputed from the enumeration's length so that
//! reordering or extending the chain keeps the percentage correct —
//! there is no hard-coded 25% step width anywhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Custody lifecycle state, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Init,
    Produced,
    Collected,
    Cleared,
    Retail,
}

impl State {
    /// All states in custody order. The last entry is the terminal state.
    pub const ALL: [State; 5] = [
        State::Init,
        State::Produced,
        State::Collected,
        State::Cleared,
        State::Retail,
    ];

    /// Position of this state within the custody chain.
    pub fn index(self) -> usize {
        match self {
            Self::Init => 0,
            Self::Produced => 1,
            Self::Collected => 2,
            Self::Cleared => 3,
            Self::Retail => 4,
        }
    }

    /// Linear progress percentage (0–100) for this state.
    ///
    /// `round(index / (len - 1) * 100)`, so the five-state chain yields
    /// exactly 0, 25, 50, 75, 100.
    pub fn progress(self) -> u8 {
        let span = (Self::ALL.len() - 1) as f64;
        ((self.index() as f64 / span) * 100.0).round() as u8
    }

    /// Whether this state is the end of the custody chain.
    pub fn is_terminal(self) -> bool {
        self.index() == Self::ALL.len() - 1
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init => write!(f, "Init"),
            Self::Produced => write!(f, "Produced"),
            Self::Collected => write!(f, "Collected"),
            Self::Cleared => write!(f, "Cleared"),
            Self::Retail => write!(f, "Retail"),
        }
    }
}

/// Error for an unrecognized state name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown state: {0}")]
pub struct ParseStateError(pub String);

impl std::str::FromStr for State {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Init" => Ok(Self::Init),
            "Produced" => Ok(Self::Produced),
            "Collected" => Ok(Self::Collected),
            "Cleared" => Ok(Self::Cleared),
            "Retail" => Ok(Self::Retail),
            other => Err(ParseStateError(other.to_string())),
        }
    }
}

/// Acting role in the custody chain. Each non-terminal state has exactly
/// one role authorized to advance it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Manufacturer,
    Collector,
    Customs,
    Retailer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manufacturer => write!(f, "Manufacturer"),
            Self::Collector => write!(f, "Collector"),
            Self::Customs => write!(f, "Customs"),
            Self::Retailer => write!(f, "Retailer"),
        }
    }
}

/// Error for an unrecognized role name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manufacturer" => Ok(Self::Manufacturer),
            "Collector" => Ok(Self::Collector),
            "Customs" => Ok(Self::Customs),
            "Retailer" => Ok(Self::Retailer),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn progress_values_for_five_state_chain() {
        assert_eq!(State::Init.progress(), 0);
        assert_eq!(State::Produced.progress(), 25);
        assert_eq!(State::Collected.progress(), 50);
        assert_eq!(State::Cleared.progress(), 75);
        assert_eq!(State::Retail.progress(), 100);
    }

    #[test]
    fn only_retail_is_terminal() {
        for s in State::ALL {
            assert_eq!(s.is_terminal(), s == State::Retail);
        }
    }

    #[test]
    fn index_matches_chain_order() {
        for (i, s) in State::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn state_display_fromstr_roundtrip() {
        for s in State::ALL {
            let parsed: State = s.to_string().parse().expect("parse state");
            assert_eq!(parsed, s);
        }
        assert!("Shipped".parse::<State>().is_err());
    }

    #[test]
    fn role_display_fromstr_roundtrip() {
        for r in [
            Role::Manufacturer,
            Role::Collector,
            Role::Customs,
            Role::Retailer,
        ] {
            let parsed: Role = r.to_string().parse().expect("parse role");
            assert_eq!(parsed, r);
        }
        assert!("Auditor".parse::<Role>().is_err());
    }

    proptest! {
        #[test]
        fn progress_is_bounded_and_monotone(i in 0usize..State::ALL.len(), j in 0usize..State::ALL.len()) {
            let (a, b) = (State::ALL[i], State::ALL[j]);
            prop_assert!(a.progress() <= 100);
            if i < j {
                prop_assert!(a.progress() < b.progress());
            }
        }
    }
}
