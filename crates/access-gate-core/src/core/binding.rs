// crates/access-gate-core/src/core/binding.rs
// ============================================================================
// Module: Gate Bindings
// Description: Registration metadata and the compiled gate binding.
// Purpose: Associate one gate with its matching scope (path pattern,
//          operations, final operations) and priority.
// Dependencies: crate::core::{identifiers, operation}, crate::interfaces,
//               regex, serde, thiserror
// ============================================================================

//! ## Overview
//! The plugin registry hands the core one [`BindingMetadata`] per registered
//! gate. [`GateBinding`] is the compiled, immutable form consulted on every
//! check. The construction defaults are asymmetric and deliberate: an
//! unspecified operation list scopes the binding to every operation, while an
//! unspecified final-operation list makes it final for none. A missing path
//! pattern matches everything.
//!
//! Binding identity is the gate's registration identity; two bindings that
//! wrap the same gate are equal regardless of their other fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::ResourcePath;
use crate::core::operation::Operation;
use crate::core::operation::OperationSet;
use crate::interfaces::AccessGate;

// ============================================================================
// SECTION: Binding Metadata
// ============================================================================

/// Registration metadata supplied alongside a gate.
///
/// # Invariants
/// - All fields are optional registration surface; compiled defaults are
///   applied by [`GateBinding::new`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BindingMetadata {
    /// Regular expression matched in full against the resource path.
    /// Absent means match everything.
    pub path_pattern: Option<String>,
    /// Case-insensitive operation tokens the binding participates in.
    /// Absent means every operation. Unrecognized tokens are ignored.
    pub operations: Option<Vec<String>>,
    /// Tokens naming the operations for which the binding is final.
    /// Absent means final for none.
    pub final_operations: Option<Vec<String>>,
    /// Priority rank; higher ranks are consulted first.
    #[serde(default)]
    pub priority: i64,
}

impl BindingMetadata {
    /// Creates metadata with defaults for every field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// SECTION: Binding Errors
// ============================================================================

/// Gate binding construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum BindingError {
    /// The registered path pattern is not a valid regular expression.
    #[error("invalid path pattern `{pattern}`: {source}")]
    InvalidPathPattern {
        /// The rejected pattern text.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

// ============================================================================
// SECTION: Gate Binding
// ============================================================================

/// Immutable association of one gate with its matching scope and priority.
///
/// # Invariants
/// - Constructed once when the gate becomes available; never mutated.
/// - Equality and hashing use the gate's registration identity only.
#[derive(Clone)]
pub struct GateBinding {
    /// The registered gate capability.
    gate: Arc<dyn AccessGate>,
    /// Compiled path pattern, anchored for full matches.
    path_pattern: Regex,
    /// Operations the binding participates in.
    operations: OperationSet,
    /// Operations for which the binding terminates evaluation.
    final_operations: OperationSet,
    /// Priority rank; higher ranks are consulted first.
    priority: i64,
}

impl GateBinding {
    /// Compiles a binding from a gate and its registration metadata.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InvalidPathPattern`] when the registered
    /// pattern does not compile. A missing pattern falls back to match-all;
    /// unrecognized operation tokens are skipped.
    pub fn new(gate: Arc<dyn AccessGate>, metadata: &BindingMetadata) -> Result<Self, BindingError> {
        let pattern = metadata.path_pattern.as_deref().unwrap_or(".*");
        // Anchor the pattern so registrations match the full path, never a
        // prefix or substring.
        let path_pattern = Regex::new(&format!(r"\A(?:{pattern})\z")).map_err(|source| {
            BindingError::InvalidPathPattern {
                pattern: pattern.to_owned(),
                source,
            }
        })?;

        let operations = metadata.operations.as_ref().map_or(OperationSet::ALL, |tokens| {
            OperationSet::from_tokens(tokens.iter().map(String::as_str))
        });
        let final_operations = metadata.final_operations.as_ref().map_or(OperationSet::NONE, |tokens| {
            OperationSet::from_tokens(tokens.iter().map(String::as_str))
        });

        Ok(Self {
            gate,
            path_pattern,
            operations,
            final_operations,
            priority: metadata.priority,
        })
    }

    /// Returns true when the binding participates in the operation at the
    /// path.
    ///
    /// An absent path always matches once the operation is in scope; callers
    /// without a concrete path must consult every participating gate.
    #[must_use]
    pub fn matches(&self, path: Option<&ResourcePath>, operation: Operation) -> bool {
        if !self.operations.contains(operation) {
            return false;
        }
        path.is_none_or(|path| self.path_pattern.is_match(path.as_str()))
    }

    /// Returns true when the binding is final for the operation.
    #[must_use]
    pub const fn is_final(&self, operation: Operation) -> bool {
        self.final_operations.contains(operation)
    }

    /// Returns the wrapped gate.
    #[must_use]
    pub const fn gate(&self) -> &Arc<dyn AccessGate> {
        &self.gate
    }

    /// Returns the binding priority.
    #[must_use]
    pub const fn priority(&self) -> i64 {
        self.priority
    }
}

impl PartialEq for GateBinding {
    fn eq(&self, other: &Self) -> bool {
        self.gate.id() == other.gate.id()
    }
}

impl Eq for GateBinding {}

impl std::hash::Hash for GateBinding {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.gate.id().hash(state);
    }
}

impl fmt::Debug for GateBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateBinding")
            .field("gate", &self.gate.id())
            .field("path_pattern", &self.path_pattern.as_str())
            .field("operations", &self.operations)
            .field("final_operations", &self.final_operations)
            .field("priority", &self.priority)
            .finish()
    }
}
