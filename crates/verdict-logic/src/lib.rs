// crates/verdict-logic/src/lib.rs
// ============================================================================
// Module: Verdict Logic Crate Root
// Description: Tri-state authorization verdicts and ordered merge semantics.
// Purpose: Provide the verdict vocabulary and the pure chain reducer shared
//          by access decision engines.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This crate defines the tri-state [`GateVerdict`] vocabulary and the
//! [`VerdictChain`] reducer that folds an ordered sequence of verdicts into a
//! single outcome. The merge rule is deliberately asymmetric: an explicit
//! grant or deferral, once reached, is never overwritten by a later denial.
//! The reducer is a pure value type with no I/O and no shared state, so it is
//! safe to drive from any number of concurrent evaluations.
//!
//! Security posture: verdicts arrive from untrusted plugins; consumers must
//! fail closed when a chain ends without an explicit grant.

mod chain;
mod verdict;

pub use chain::VerdictChain;
pub use chain::merge;
pub use verdict::GateVerdict;
