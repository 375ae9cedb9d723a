// crates/access-gate-core/src/core/report.rs
// ============================================================================
// Module: Decision Reports
// Description: Serializable per-binding traces for one chain evaluation.
// Purpose: Give deployments an observability surface for decisions without a
//          logging dependency.
// Dependencies: crate::core::{identifiers, operation}, verdict-logic, serde
// ============================================================================

//! ## Overview
//! A decision report records the bindings consulted for one check, in the
//! order they were consulted, together with the verdict each rendered and the
//! final outcome. Reports are plain data; embedding deployments can log,
//! export, or discard them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use verdict_logic::GateVerdict;

use crate::core::identifiers::GateId;
use crate::core::identifiers::ResourcePath;
use crate::core::operation::Operation;

// ============================================================================
// SECTION: Trace Entries
// ============================================================================

/// One consulted binding in a chain evaluation.
///
/// # Invariants
/// - Entries appear in consultation (priority) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Registration identity of the consulted gate.
    pub gate_id: GateId,
    /// Verdict the gate rendered (or the fast-path grant).
    pub verdict: GateVerdict,
    /// True when the binding was final for the checked operation.
    pub final_binding: bool,
}

// ============================================================================
// SECTION: Decision Report
// ============================================================================

/// Outcome and trace of one authorization check.
///
/// # Invariants
/// - `allowed` reflects the merge rule applied to `trace`, or the unmatched
///   default when `trace` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionReport {
    /// Operation that was checked.
    pub operation: Operation,
    /// Path the check ran against.
    pub path: ResourcePath,
    /// Final authorization outcome.
    pub allowed: bool,
    /// True when no binding matched and the engine default applied.
    pub unmatched_default: bool,
    /// Consulted bindings in priority order, up to the short-circuit point.
    pub trace: Vec<TraceEntry>,
}
