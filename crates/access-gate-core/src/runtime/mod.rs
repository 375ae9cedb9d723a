// crates/access-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Access Gate Runtime
// Description: The decision engine, filtered views, and in-memory helpers.
// Purpose: Group the evaluation machinery built on the core types and
//          interfaces.
// Dependencies: crate::core, crate::interfaces, verdict-logic
// ============================================================================

//! ## Overview
//! Runtime machinery of the decision core: the engine that folds gate chains
//! into decisions, the read-view decorators it produces, and an in-memory
//! resource for embedding and tests.

pub mod engine;
pub mod memory;
pub mod view;

pub use engine::DecisionEngine;
pub use engine::ReadAccess;
pub use memory::InMemoryResource;
pub use view::FilteredResource;
pub use view::WritableResource;
