// crates/access-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Access Gate Interfaces
// Description: Capability contracts between the engine, resources, and gates.
// Purpose: Define the in-process boundary the decision core consumes and
//          exposes, without embedding any resource-tree or registry details.
// Dependencies: crate::core, verdict-logic, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The decision core has no network or file-format surface; its boundary is
//! the trait surface in this module. A [`Resource`] is the already-resolved
//! target of a check. An [`AccessGate`] is the opaque capability object a
//! plugin registers; the core only chains its answers and never interprets
//! what "restricted" means. Gate faults propagate as errors, never as
//! substituted verdicts, because the core has no basis for guessing a gate's
//! intended answer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use verdict_logic::GateVerdict;

use crate::core::identifiers::GateId;
use crate::core::identifiers::ResourcePath;

// ============================================================================
// SECTION: Access Context
// ============================================================================

/// Resolver context handed through to gates on every check.
///
/// # Invariants
/// - Values are snapshots; gates must not rely on them mutating mid-check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessContext {
    /// Principal the check runs on behalf of, if authenticated.
    pub principal: Option<String>,
    /// Opaque context attributes gates may consult.
    pub attributes: BTreeMap<String, Value>,
}

impl AccessContext {
    /// Creates an anonymous context with no attributes.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a context for the given principal.
    #[must_use]
    pub fn for_principal(principal: impl Into<String>) -> Self {
        Self {
            principal: Some(principal.into()),
            attributes: BTreeMap::new(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gate invocation fault.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Never converted into a [`GateVerdict`] by the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The gate failed while evaluating a decision.
    #[error("gate failure: {0}")]
    Failure(String),
}

/// Resource mutation and lookup errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The view is read-only; no mutation reaches the underlying resource.
    #[error("resource view is read-only")]
    ReadOnly,
    /// A gate restricts the named value in this view.
    #[error("value `{name}` is restricted in this view")]
    ValueRestricted {
        /// Name of the restricted value.
        name: String,
    },
    /// The named value does not exist on the resource.
    #[error("no such value: {name}")]
    NoSuchValue {
        /// Name of the missing value.
        name: String,
    },
    /// The underlying resource storage reported an error.
    #[error("resource storage error: {0}")]
    Storage(String),
}

/// Errors surfaced by the decision engine.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Faults always name the offending gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A gate raised a fault during evaluation; propagated, not masked.
    #[error("gate `{gate_id}` failed during evaluation: {source}")]
    Gate {
        /// Registration identity of the faulting gate.
        gate_id: GateId,
        /// The underlying gate fault.
        source: GateError,
    },
    /// A query-transform step yielded no result where one is required.
    #[error("query transform in gate `{gate_id}` returned no result")]
    QueryTransformContract {
        /// Registration identity of the offending gate.
        gate_id: GateId,
    },
}

// ============================================================================
// SECTION: Resource
// ============================================================================

/// Already-resolved target of an authorization check.
///
/// The core treats resources as bags of named values under a path; the tree
/// representation and its resolver live outside this crate.
pub trait Resource {
    /// Returns the hierarchical address of the resource.
    fn path(&self) -> &ResourcePath;

    /// Returns the named value, or `None` when it does not exist.
    fn value(&self, name: &str) -> Option<Value>;

    /// Returns the names of all values on the resource.
    fn value_names(&self) -> Vec<String>;

    /// Sets the named value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] when the value cannot be written.
    fn set_value(&mut self, name: &str, value: Value) -> Result<(), ResourceError>;

    /// Deletes the named value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] when the value cannot be deleted.
    fn delete_value(&mut self, name: &str) -> Result<(), ResourceError>;
}

// ============================================================================
// SECTION: Access Gate
// ============================================================================

/// Opaque authorization capability registered by a plugin.
///
/// Each operation comes as a pair: a cheap restriction predicate and a
/// decision method. When `has_*_restrictions` answers false for a context,
/// the engine treats the gate as granting without invoking the decision
/// method. Default implementations defer (`CantDecide`) and fail closed
/// (restrictions present, no full-value certification, per-value access
/// denied); the query transform defaults to the identity.
pub trait AccessGate: Send + Sync {
    /// Returns the registration identity of the gate.
    fn id(&self) -> &GateId;

    /// Returns true when the gate restricts reads for the context.
    fn has_read_restrictions(&self, _ctx: &AccessContext) -> bool {
        true
    }

    /// Decides whether the resource may be read.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the gate fails to evaluate.
    fn can_read(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        Ok(GateVerdict::CantDecide)
    }

    /// Returns true when the gate restricts creates for the context.
    fn has_create_restrictions(&self, _ctx: &AccessContext) -> bool {
        true
    }

    /// Decides whether a resource may be created at the path.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the gate fails to evaluate.
    fn can_create(
        &self,
        _path: &ResourcePath,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        Ok(GateVerdict::CantDecide)
    }

    /// Returns true when the gate restricts updates for the context.
    fn has_update_restrictions(&self, _ctx: &AccessContext) -> bool {
        true
    }

    /// Decides whether the resource may be updated.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the gate fails to evaluate.
    fn can_update(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        Ok(GateVerdict::CantDecide)
    }

    /// Returns true when the gate restricts deletes for the context.
    fn has_delete_restrictions(&self, _ctx: &AccessContext) -> bool {
        true
    }

    /// Decides whether the resource may be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the gate fails to evaluate.
    fn can_delete(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        Ok(GateVerdict::CantDecide)
    }

    /// Returns true when the gate restricts executes for the context.
    fn has_execute_restrictions(&self, _ctx: &AccessContext) -> bool {
        true
    }

    /// Decides whether the resource may be executed.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the gate fails to evaluate.
    fn can_execute(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        Ok(GateVerdict::CantDecide)
    }

    /// Returns true when the gate restricts child reordering for the context.
    fn has_order_children_restrictions(&self, _ctx: &AccessContext) -> bool {
        true
    }

    /// Decides whether the resource's children may be reordered.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the gate fails to evaluate.
    fn can_order_children(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        Ok(GateVerdict::CantDecide)
    }

    /// Returns true when the gate certifies every value of the resource as
    /// readable.
    fn can_read_all_values(&self, _resource: &dyn Resource) -> bool {
        false
    }

    /// Returns true when the named value may be read through this gate.
    fn can_read_value(&self, _resource: &dyn Resource, _name: &str) -> bool {
        false
    }

    /// Returns true when the named value may be set through this gate.
    fn can_set_value(&self, _resource: &dyn Resource, _name: &str) -> bool {
        false
    }

    /// Returns true when the named value may be deleted through this gate.
    fn can_delete_value(&self, _resource: &dyn Resource, _name: &str) -> bool {
        false
    }

    /// Rewrites a query for the gate's restrictions.
    ///
    /// Returning `None` signals that no transformation is possible; the
    /// engine treats that as a contract violation, not as a skip.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the gate fails to transform the query.
    fn transform_query(
        &self,
        query: &str,
        _language: &str,
        _ctx: &AccessContext,
    ) -> Result<Option<String>, GateError> {
        Ok(Some(query.to_owned()))
    }
}
