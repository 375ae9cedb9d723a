// crates/access-gate-core/src/core/mod.rs
// ============================================================================
// Module: Access Gate Core Types
// Description: Identifiers, operations, bindings, and decision reports.
// Purpose: Group the pure data types consumed by the runtime engine.
// Dependencies: crate::interfaces, verdict-logic, regex, serde
// ============================================================================

//! ## Overview
//! Pure data types of the decision core. Everything here is constructed once
//! and read concurrently; nothing performs I/O.

pub mod binding;
pub mod identifiers;
pub mod operation;
pub mod report;

pub use binding::BindingError;
pub use binding::BindingMetadata;
pub use binding::GateBinding;
pub use identifiers::GateId;
pub use identifiers::ResourcePath;
pub use operation::Operation;
pub use operation::OperationSet;
pub use report::DecisionReport;
pub use report::TraceEntry;
