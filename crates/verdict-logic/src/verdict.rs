// crates/verdict-logic/src/verdict.rs
// ============================================================================
// Module: Gate Verdicts
// Description: Closed tri-state answer rendered by an access gate.
// Purpose: Provide a stable, serializable verdict vocabulary.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A gate answers exactly one of three ways for an operation on a resource:
//! it grants, it denies, or it cannot decide and defers down the chain. A
//! gate that fails while evaluating is an error at the call site, never a
//! fourth verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Tri-state answer a gate renders for one operation on one resource.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - No other values are legal; gate faults are surfaced as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateVerdict {
    /// The gate explicitly allows the operation.
    Granted,
    /// The gate explicitly refuses the operation.
    Denied,
    /// The gate has no opinion and defers to the rest of the chain.
    CantDecide,
}

impl GateVerdict {
    /// Returns true when the verdict is an explicit grant or denial.
    #[must_use]
    pub const fn is_decisive(self) -> bool {
        !matches!(self, Self::CantDecide)
    }

    /// Returns a stable label for the verdict.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::CantDecide => "cant_decide",
        }
    }
}

impl fmt::Display for GateVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
