// crates/access-gate-core/tests/end_to_end.rs
// ============================================================================
// Module: End-To-End Tests
// Description: Full decision flows from registration to filtered mutation.
// Purpose: Verify the complete path through binding, engine, and view for
//          representative deployments.
// Dependencies: access-gate-core, verdict-logic, serde_json
// ============================================================================
//! ## Overview
//! Runs whole scenarios: a content gate guarding one subtree with a hidden
//! property, and an empty locked-down deployment.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::sync::Arc;

use access_gate_core::AccessContext;
use access_gate_core::BindingMetadata;
use access_gate_core::Operation;
use access_gate_core::Resource;
use access_gate_core::ResourceError;
use access_gate_core::ResourcePath;
use access_gate_core::runtime::DecisionEngine;
use access_gate_core::runtime::InMemoryResource;
use access_gate_core::runtime::ReadAccess;
use serde_json::json;
use support::ScriptedGate;
use support::TestResult;
use support::bind;
use support::ensure;
use verdict_logic::GateVerdict;

// ============================================================================
// SECTION: Content Subtree Scenario
// ============================================================================

/// Builds the content-subtree deployment: one gate guarding `/content`,
/// scoped to read and update, final for read, hiding the `secret` value.
fn content_engine() -> Result<(DecisionEngine, Arc<ScriptedGate>), Box<dyn std::error::Error>> {
    let gate = Arc::new(
        ScriptedGate::new("content-gate")
            .with_verdict(Operation::Read, GateVerdict::Granted)
            .with_verdict(Operation::Update, GateVerdict::Granted)
            .hiding_value("secret")
            .locking_value("secret"),
    );
    let metadata = BindingMetadata {
        path_pattern: Some("/content(/.*)?".to_owned()),
        operations: Some(vec!["read".to_owned(), "update".to_owned()]),
        final_operations: Some(vec!["read".to_owned()]),
        priority: 10,
    };
    let binding = bind(&gate, &metadata)?;
    Ok((DecisionEngine::application_defaults(vec![binding]), gate))
}

/// Tests the operation surface of the content deployment.
#[test]
fn test_content_gate_operation_surface() -> TestResult {
    let (engine, _gate) = content_engine()?;
    let ctx = AccessContext::for_principal("alice");
    let resource = InMemoryResource::new("/content/page");

    ensure(engine.can_update(&resource, &ctx)?, "Expected the scoped gate to grant updates")?;
    ensure(
        !engine.can_delete(&resource, &ctx)?,
        "Expected delete to fall outside the gate's scope and take the deny default",
    )?;
    ensure(
        !engine.can_execute(&resource, &ctx)?,
        "Expected execute to fall outside the gate's scope and take the deny default",
    )?;

    let outside = InMemoryResource::new("/other/page");
    ensure(
        !engine.can_update(&outside, &ctx)?,
        "Expected paths outside the subtree to take the deny default",
    )
}

/// Tests the filtered read and the per-value write discipline end to end.
#[test]
fn test_content_gate_filtered_read_and_write() -> TestResult {
    let (engine, _gate) = content_engine()?;
    let ctx = AccessContext::for_principal("alice");
    let resource = InMemoryResource::with_values("/content/page", [
        ("title".to_owned(), json!("hello")),
        ("secret".to_owned(), json!("classified")),
    ]);

    let access = engine.read(resource, &ctx)?;
    let ReadAccess::Filtered(mut view) = access else {
        return Err("Expected the partial value access to produce a wrapped resource".into());
    };

    ensure(view.value("title").is_some(), "Expected the public value to be readable")?;
    ensure(view.value("secret").is_none(), "Expected the hidden value to be unreadable")?;

    let mut writable = view.writable().ok_or("Expected a writable handle; update is granted")?;
    match writable.set_value("secret", json!("overwrite")) {
        Err(ResourceError::ValueRestricted {
            name,
        }) => ensure(name == "secret", "Expected the restricted write to name the value")?,
        other => return Err(format!("Expected the restricted write to fail, got {other:?}").into()),
    }
    writable.set_value("title", json!("hello again"))?;
    ensure(
        writable.value("title") == Some(json!("hello again")),
        "Expected the permitted write to land",
    )
}

// ============================================================================
// SECTION: Locked-Down Scenario
// ============================================================================

/// Tests that an empty deny-by-default deployment refuses everything.
#[test]
fn test_empty_deployment_denies_every_operation() -> TestResult {
    let engine = DecisionEngine::application_defaults(Vec::new());
    let ctx = AccessContext::anonymous();
    let resource = InMemoryResource::new("/content/page");

    ensure(!engine.can_create(&ResourcePath::new("/content/new"), &ctx)?, "Expected create to be denied")?;
    ensure(!engine.can_update(&resource, &ctx)?, "Expected update to be denied")?;
    ensure(!engine.can_delete(&resource, &ctx)?, "Expected delete to be denied")?;
    ensure(!engine.can_execute(&resource, &ctx)?, "Expected execute to be denied")?;
    ensure(
        !engine.can_order_children(&resource, &ctx)?,
        "Expected ordering children to be denied",
    )?;
    ensure(
        engine.read(resource, &ctx)?.is_denied(),
        "Expected the read to be denied",
    )
}
