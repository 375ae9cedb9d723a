// crates/verdict-logic/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared helpers for verdict-logic integration tests.
// Purpose: Provide panic-free assertion helpers with readable failures.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Small assertion helpers shared across test files.

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
