// crates/access-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Access Gate Identifiers
// Description: Canonical opaque identifiers for gates and resource paths.
// Purpose: Provide strongly typed, serializable identifiers with stable wire
//          forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout Access Gate.
//! Identifiers are opaque strings on the wire. [`GateId`] is the registration
//! identity of a gate plugin; binding equality is defined over it, never over
//! binding metadata. [`ResourcePath`] is an opaque hierarchical address; the
//! core never interprets its segments, it only matches configured patterns
//! against the full string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Registration identity of a gate plugin.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this
///   type.
/// - Assigned once when the gate is registered and stable for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(String);

impl GateId {
    /// Creates a new gate identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for GateId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GateId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Hierarchical address of a resource.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this
///   type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Creates a new resource path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ResourcePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourcePath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
