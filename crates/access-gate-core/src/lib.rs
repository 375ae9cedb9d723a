// crates/access-gate-core/src/lib.rs
// ============================================================================
// Module: Access Gate Core Crate Root
// Description: Verdict-merging authorization engine over pluggable gates.
// Purpose: Aggregate per-operation verdicts from a priority-ordered gate set
//          into one decision, and value-filtered views for reads.
// Dependencies: verdict-logic, regex, serde, serde_json, smallvec, thiserror
// ============================================================================

//! ## Overview
//! Access Gate merges the opinions of independently supplied gate plugins
//! into a single authorization decision for an operation on a
//! hierarchically-addressed resource. Gates are opaque capabilities; the
//! core only matches their registered scopes, chains their tri-state
//! verdicts under an asymmetric merge rule, and — for reads — builds a view
//! that hides the values individual gates refuse to disclose.
//!
//! Gate discovery, ranking assignment, and the resource tree itself live
//! outside this crate; the engine consumes an already-ordered binding
//! snapshot and already-resolved resources.
//!
//! Security posture: gates and their registrations are untrusted input; the
//! engine fails closed whenever a matched chain ends without an explicit
//! grant.

pub mod core;
pub mod interfaces;
pub mod runtime;

pub use crate::core::BindingError;
pub use crate::core::BindingMetadata;
pub use crate::core::DecisionReport;
pub use crate::core::GateBinding;
pub use crate::core::GateId;
pub use crate::core::Operation;
pub use crate::core::OperationSet;
pub use crate::core::ResourcePath;
pub use crate::core::TraceEntry;
pub use crate::interfaces::AccessContext;
pub use crate::interfaces::AccessError;
pub use crate::interfaces::AccessGate;
pub use crate::interfaces::GateError;
pub use crate::interfaces::Resource;
pub use crate::interfaces::ResourceError;
