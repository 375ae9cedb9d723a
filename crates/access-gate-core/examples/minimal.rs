// crates/access-gate-core/examples/minimal.rs
// ============================================================================
// Module: Access Gate Minimal Example
// Description: Minimal end-to-end decision flow using in-memory resources.
// Purpose: Demonstrate binding registration, operation checks, and filtered
//          reads.
// Dependencies: access-gate-core, verdict-logic
// ============================================================================

//! ## Overview
//! Registers one path-scoped gate, runs the operation checks, and reads a
//! resource through the value-filtering view.

use std::sync::Arc;

use access_gate_core::AccessContext;
use access_gate_core::AccessGate;
use access_gate_core::BindingMetadata;
use access_gate_core::GateBinding;
use access_gate_core::GateError;
use access_gate_core::GateId;
use access_gate_core::Resource;
use access_gate_core::runtime::DecisionEngine;
use access_gate_core::runtime::InMemoryResource;
use access_gate_core::runtime::ReadAccess;
use serde_json::json;
use verdict_logic::GateVerdict;

/// Error type for example preconditions.
#[derive(Debug)]
struct ExampleError(&'static str);

impl std::fmt::Display for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ExampleError {}

/// Gate that grants content reads but keeps the `secret` value hidden.
struct ContentGate {
    /// Registration identity.
    id: GateId,
}

impl AccessGate for ContentGate {
    fn id(&self) -> &GateId {
        &self.id
    }

    fn can_read(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        Ok(GateVerdict::Granted)
    }

    fn can_update(
        &self,
        _resource: &dyn Resource,
        _ctx: &AccessContext,
    ) -> Result<GateVerdict, GateError> {
        Ok(GateVerdict::Granted)
    }

    fn can_read_value(&self, _resource: &dyn Resource, name: &str) -> bool {
        name != "secret"
    }

    fn can_set_value(&self, _resource: &dyn Resource, name: &str) -> bool {
        name != "secret"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gate = Arc::new(ContentGate {
        id: GateId::new("content-gate"),
    });
    let metadata = BindingMetadata {
        path_pattern: Some("/content(/.*)?".to_owned()),
        operations: Some(vec!["read".to_owned(), "update".to_owned()]),
        final_operations: Some(vec!["read".to_owned()]),
        priority: 10,
    };
    let binding = GateBinding::new(gate, &metadata)?;
    let engine = DecisionEngine::application_defaults(vec![binding]);

    let ctx = AccessContext::for_principal("alice");
    let resource = InMemoryResource::with_values("/content/page", [
        ("title".to_owned(), json!("hello")),
        ("secret".to_owned(), json!("classified")),
    ]);

    let can_update = engine.can_update(&resource, &ctx)?;
    let can_delete = engine.can_delete(&resource, &ctx)?;
    let _ = (can_update, can_delete);

    let access = engine.read(resource, &ctx)?;
    let ReadAccess::Filtered(mut view) = access else {
        return Err(ExampleError("expected a filtered view").into());
    };

    let title = view.value("title").ok_or(ExampleError("title must be visible"))?;
    let secret = view.value("secret");
    let _ = (title, secret.is_none());

    let mut writable = view.writable().ok_or(ExampleError("update was granted"))?;
    writable.set_value("title", json!("hello again"))?;

    Ok(())
}
