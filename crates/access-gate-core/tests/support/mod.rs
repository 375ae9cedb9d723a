// crates/access-gate-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared doubles and helpers for access-gate-core tests.
// Purpose: Provide scripted gates with invocation counters and a
//          write-recording resource.
// Dependencies: access-gate-core, verdict-logic
// ============================================================================

//! ## Overview
//! Scripted test doubles shared across test files: a gate with
//! per-operation verdicts and counters, and a resource that records write
//! attempts reaching it.

#![allow(dead_code, reason = "Support items are shared across test targets with different usage.")]

use std::sync::Arc;
use std::sync::Mutex;

use access_gate_core::AccessContext;
use access_gate_core::AccessGate;
use access_gate_core::BindingMetadata;
use access_gate_core::GateBinding;
use access_gate_core::GateError;
use access_gate_core::GateId;
use access_gate_core::Operation;
use access_gate_core::Resource;
use access_gate_core::ResourceError;
use access_gate_core::ResourcePath;
use access_gate_core::runtime::InMemoryResource;
use serde_json::Value;
use verdict_logic::GateVerdict;

/// Result alias for panic-free tests.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Fails the test with `message` unless `condition` holds.
///
/// # Errors
///
/// Returns `message` as the test failure when `condition` is false.
pub fn ensure(condition: bool, message: &str) -> TestResult {
    if condition { Ok(()) } else { Err(message.into()) }
}

// ============================================================================
// SECTION: Transform Behavior
// ============================================================================

/// Scripted query-transform behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformBehavior {
    /// Pass the query through unchanged.
    Identity,
    /// Append the marker to the query.
    Append(&'static str),
    /// Yield no transformation (contract violation).
    Refuse,
    /// Fail with a gate fault.
    Fault,
}

// ============================================================================
// SECTION: Scripted Gate
// ============================================================================

/// Gate double with scripted verdicts, value rules, and counters.
pub struct ScriptedGate {
    /// Registration identity.
    id: GateId,
    /// Per-operation verdicts, indexed by position in [`Operation::ALL`].
    verdicts: [GateVerdict; 6],
    /// Whether the gate reports restrictions for any context.
    restricted: bool,
    /// Whether the gate certifies all values as readable.
    full_value_access: bool,
    /// Value names the gate refuses to disclose.
    hidden_values: Vec<String>,
    /// Value names the gate refuses to mutate.
    locked_values: Vec<String>,
    /// Scripted transform behavior.
    transform: TransformBehavior,
    /// Whether decision methods fault instead of answering.
    faulty: bool,
    /// Number of decision-method invocations.
    decide_calls: Mutex<usize>,
}

impl ScriptedGate {
    /// Creates a deferring gate with restrictions and no value access.
    pub fn new(id: &str) -> Self {
        Self {
            id: GateId::new(id),
            verdicts: [GateVerdict::CantDecide; 6],
            restricted: true,
            full_value_access: false,
            hidden_values: Vec::new(),
            locked_values: Vec::new(),
            transform: TransformBehavior::Identity,
            faulty: false,
            decide_calls: Mutex::new(0),
        }
    }

    /// Scripts the verdict for one operation.
    #[must_use]
    pub fn with_verdict(mut self, operation: Operation, verdict: GateVerdict) -> Self {
        self.verdicts[Self::slot(operation)] = verdict;
        self
    }

    /// Scripts the same verdict for every operation.
    #[must_use]
    pub fn with_verdict_for_all(mut self, verdict: GateVerdict) -> Self {
        self.verdicts = [verdict; 6];
        self
    }

    /// Reports no restrictions for any context (fast-path exemption).
    #[must_use]
    pub const fn without_restrictions(mut self) -> Self {
        self.restricted = false;
        self
    }

    /// Certifies all values as readable.
    #[must_use]
    pub const fn with_full_value_access(mut self) -> Self {
        self.full_value_access = true;
        self
    }

    /// Refuses to disclose the named value.
    #[must_use]
    pub fn hiding_value(mut self, name: &str) -> Self {
        self.hidden_values.push(name.to_owned());
        self
    }

    /// Refuses to mutate the named value.
    #[must_use]
    pub fn locking_value(mut self, name: &str) -> Self {
        self.locked_values.push(name.to_owned());
        self
    }

    /// Scripts the query-transform behavior.
    #[must_use]
    pub const fn with_transform(mut self, transform: TransformBehavior) -> Self {
        self.transform = transform;
        self
    }

    /// Makes every decision method fault.
    #[must_use]
    pub const fn faulty(mut self) -> Self {
        self.faulty = true;
        self
    }

    /// Returns the number of decision-method invocations so far.
    pub fn decide_calls(&self) -> usize {
        self.decide_calls.lock().map_or(usize::MAX, |calls| *calls)
    }

    /// Returns the slot of the operation in the verdict table.
    fn slot(operation: Operation) -> usize {
        Operation::ALL
            .iter()
            .position(|candidate| *candidate == operation)
            .unwrap_or_default()
    }

    /// Records a decision invocation and returns the scripted verdict.
    fn decide(&self, operation: Operation) -> Result<GateVerdict, GateError> {
        if let Ok(mut calls) = self.decide_calls.lock() {
            *calls += 1;
        }
        if self.faulty {
            return Err(GateError::Failure("scripted fault".to_owned()));
        }
        Ok(self.verdicts[Self::slot(operation)])
    }
}

impl AccessGate for ScriptedGate {
    fn id(&self) -> &GateId {
        &self.id
    }

    fn has_read_restrictions(&self, _ctx: &AccessContext) -> bool {
        self.restricted
    }

    fn can_read(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        self.decide(Operation::Read)
    }

    fn has_create_restrictions(&self, _ctx: &AccessContext) -> bool {
        self.restricted
    }

    fn can_create(
        &self,
        _path: &ResourcePath,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        self.decide(Operation::Create)
    }

    fn has_update_restrictions(&self, _ctx: &AccessContext) -> bool {
        self.restricted
    }

    fn can_update(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        self.decide(Operation::Update)
    }

    fn has_delete_restrictions(&self, _ctx: &AccessContext) -> bool {
        self.restricted
    }

    fn can_delete(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        self.decide(Operation::Delete)
    }

    fn has_execute_restrictions(&self, _ctx: &AccessContext) -> bool {
        self.restricted
    }

    fn can_execute(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        self.decide(Operation::Execute)
    }

    fn has_order_children_restrictions(&self, _ctx: &AccessContext) -> bool {
        self.restricted
    }

    fn can_order_children(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        self.decide(Operation::OrderChildren)
    }

    fn can_read_all_values(&self, _resource: &dyn Resource) -> bool {
        self.full_value_access
    }

    fn can_read_value(&self, _resource: &dyn Resource, name: &str) -> bool {
        !self.hidden_values.iter().any(|hidden| hidden == name)
    }

    fn can_set_value(&self, _resource: &dyn Resource, name: &str) -> bool {
        !self.locked_values.iter().any(|locked| locked == name)
    }

    fn can_delete_value(&self, _resource: &dyn Resource, name: &str) -> bool {
        !self.locked_values.iter().any(|locked| locked == name)
    }

    fn transform_query(
        &self,
        query: &str,
        _language: &str,
        _ctx: &AccessContext,
    ) -> Result<Option<String>, GateError> {
        match self.transform {
            TransformBehavior::Identity => Ok(Some(query.to_owned())),
            TransformBehavior::Append(marker) => Ok(Some(format!("{query}{marker}"))),
            TransformBehavior::Refuse => Ok(None),
            TransformBehavior::Fault => Err(GateError::Failure("scripted fault".to_owned())),
        }
    }
}

/// Builds a binding over a scripted gate.
///
/// # Errors
///
/// Returns the binding construction error when the metadata is invalid.
pub fn bind(
    gate: &Arc<ScriptedGate>,
    metadata: &BindingMetadata,
) -> Result<GateBinding, Box<dyn std::error::Error>> {
    Ok(GateBinding::new(Arc::clone(gate) as Arc<dyn AccessGate>, metadata)?)
}

/// Metadata scoped to the given operations with a priority.
pub fn metadata_for(operations: &[&str], priority: i64) -> BindingMetadata {
    BindingMetadata {
        path_pattern: None,
        operations: Some(operations.iter().map(|token| (*token).to_owned()).collect()),
        final_operations: None,
        priority,
    }
}

// ============================================================================
// SECTION: Counting Resource
// ============================================================================

/// Resource double that records write attempts reaching it.
pub struct CountingResource {
    /// Backing resource.
    inner: InMemoryResource,
    /// Number of set/delete calls that reached the resource.
    writes: Arc<Mutex<usize>>,
}

impl CountingResource {
    /// Wraps the resource with a fresh write counter.
    pub fn new(inner: InMemoryResource) -> (Self, Arc<Mutex<usize>>) {
        let writes = Arc::new(Mutex::new(0));
        (
            Self {
                inner,
                writes: Arc::clone(&writes),
            },
            writes,
        )
    }

    /// Records one write reaching the underlying resource.
    fn record_write(&self) {
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
    }
}

impl Resource for CountingResource {
    fn path(&self) -> &ResourcePath {
        self.inner.path()
    }

    fn value(&self, name: &str) -> Option<Value> {
        self.inner.value(name)
    }

    fn value_names(&self) -> Vec<String> {
        self.inner.value_names()
    }

    fn set_value(&mut self, name: &str, value: Value) -> Result<(), ResourceError> {
        self.record_write();
        self.inner.set_value(name, value)
    }

    fn delete_value(&mut self, name: &str) -> Result<(), ResourceError> {
        self.record_write();
        self.inner.delete_value(name)
    }
}

/// Reads a shared write counter.
pub fn write_count(counter: &Arc<Mutex<usize>>) -> usize {
    counter.lock().map_or(usize::MAX, |writes| *writes)
}
