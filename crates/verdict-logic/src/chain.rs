// crates/verdict-logic/src/chain.rs
// ============================================================================
// Module: Verdict Chain Reducer
// Description: Pure reducer folding ordered gate verdicts into one outcome.
// Purpose: Implement the asymmetric merge rule and short-circuit signals for
//          priority-ordered gate chains.
// Dependencies: crate::verdict
// ============================================================================

//! ## Overview
//! The chain reducer folds verdicts in priority order. The merge rule: an
//! unset or `Denied` running state is overwritten by the incoming verdict;
//! `Granted` and `CantDecide` are sticky once reached. A chain allows only
//! when it ends in `Granted`; a chain ending in `CantDecide` denies even if a
//! grant arrived after the deferral.
//!
//! The stickiness of `CantDecide` against a later `Denied` is intentional and
//! locked down by tests; do not "simplify" this to last-writer-wins or
//! any-deny-wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::verdict::GateVerdict;

// ============================================================================
// SECTION: Merge Rule
// ============================================================================

/// Merges one verdict into the running chain state.
///
/// Only an unset or `Denied` state is overwritten; `Granted` and `CantDecide`
/// survive every later verdict.
#[must_use]
pub const fn merge(state: Option<GateVerdict>, next: GateVerdict) -> GateVerdict {
    match state {
        None | Some(GateVerdict::Denied) => next,
        Some(kept) => kept,
    }
}

// ============================================================================
// SECTION: Chain State
// ============================================================================

/// Running state of one chain evaluation.
///
/// # Invariants
/// - `state` transitions only through [`VerdictChain::absorb`].
/// - Once `Granted` or `CantDecide` is reached the state never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerdictChain {
    /// Running merged verdict; unset until the first verdict is absorbed.
    state: Option<GateVerdict>,
}

impl VerdictChain {
    /// Creates an empty chain with no verdict absorbed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: None,
        }
    }

    /// Absorbs the next verdict in priority order.
    pub const fn absorb(&mut self, verdict: GateVerdict) {
        self.state = Some(merge(self.state, verdict));
    }

    /// Returns the running merged verdict, if any verdict was absorbed.
    #[must_use]
    pub const fn state(self) -> Option<GateVerdict> {
        self.state
    }

    /// Returns true when the chain has settled on `Granted`.
    ///
    /// A settled chain cannot change state, so evaluation may stop.
    #[must_use]
    pub const fn settled(self) -> bool {
        matches!(self.state, Some(GateVerdict::Granted))
    }

    /// Returns true when evaluation must stop after the given step.
    ///
    /// Evaluation halts when the chain is settled on `Granted`, or when the
    /// step came from a binding that is final for the operation and the
    /// step's own verdict was decisive.
    #[must_use]
    pub const fn halts(self, step: GateVerdict, final_binding: bool) -> bool {
        self.settled() || (step.is_decisive() && final_binding)
    }

    /// Returns true when the chain outcome is an allow.
    ///
    /// Only `Granted` allows; `Denied`, `CantDecide`, and an empty chain all
    /// deny.
    #[must_use]
    pub const fn allows(self) -> bool {
        matches!(self.state, Some(GateVerdict::Granted))
    }
}
