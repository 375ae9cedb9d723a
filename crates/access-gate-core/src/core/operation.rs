// crates/access-gate-core/src/core/operation.rs
// ============================================================================
// Module: Operations
// Description: Closed operation taxonomy and operation sets for gate scopes.
// Purpose: Provide the six operation kinds, lenient token parsing, and a
//          compact set type for binding scopes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Authorization checks are keyed by a closed set of six operation kinds.
//! Binding registrations name operations by case-insensitive string tokens;
//! unrecognized tokens are a configuration anomaly and are ignored rather
//! than rejected. [`OperationSet`] is a copyable bitset used for the binding
//! scope and final-operation sets.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Operation
// ============================================================================

/// Operation kinds subject to authorization.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - The enumeration is closed; gates and bindings never see other kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Read a resource.
    Read,
    /// Create a resource at a prospective path.
    Create,
    /// Update an existing resource.
    Update,
    /// Delete an existing resource.
    Delete,
    /// Execute a resource.
    Execute,
    /// Reorder the children of a resource.
    OrderChildren,
}

impl Operation {
    /// All operation kinds in declaration order.
    pub const ALL: [Self; 6] =
        [Self::Read, Self::Create, Self::Update, Self::Delete, Self::Execute, Self::OrderChildren];

    /// Parses a registration token into an operation kind.
    ///
    /// Tokens are case-insensitive; `order-children` and `order_children`
    /// both name [`Operation::OrderChildren`]. Returns `None` for tokens
    /// outside the taxonomy so callers can skip them.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let normalized = token.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "read" => Some(Self::Read),
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "execute" => Some(Self::Execute),
            "order_children" => Some(Self::OrderChildren),
            _ => None,
        }
    }

    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Execute => "execute",
            Self::OrderChildren => "order_children",
        }
    }

    /// Returns the bit assigned to the operation inside [`OperationSet`].
    const fn bit(self) -> u8 {
        match self {
            Self::Read => 1,
            Self::Create => 1 << 1,
            Self::Update => 1 << 2,
            Self::Delete => 1 << 3,
            Self::Execute => 1 << 4,
            Self::OrderChildren => 1 << 5,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Operation Set
// ============================================================================

/// Compact set of operation kinds.
///
/// # Invariants
/// - Only the six low bits are ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationSet(u8);

impl OperationSet {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// The set containing every operation kind.
    pub const ALL: Self = Self(0b11_1111);

    /// Builds a set from registration tokens, skipping unrecognized ones.
    ///
    /// Unknown tokens are a non-fatal configuration anomaly.
    #[must_use]
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::NONE;
        for token in tokens {
            if let Some(operation) = Operation::from_token(token) {
                set.insert(operation);
            }
        }
        set
    }

    /// Adds an operation to the set.
    pub const fn insert(&mut self, operation: Operation) {
        self.0 |= operation.bit();
    }

    /// Returns true when the set contains the operation.
    #[must_use]
    pub const fn contains(self, operation: Operation) -> bool {
        self.0 & operation.bit() != 0
    }

    /// Returns true when the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the operations contained in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Operation> {
        Operation::ALL.into_iter().filter(move |operation| self.contains(*operation))
    }
}

impl FromIterator<Operation> for OperationSet {
    fn from_iter<T: IntoIterator<Item = Operation>>(iter: T) -> Self {
        let mut set = Self::NONE;
        for operation in iter {
            set.insert(operation);
        }
        set
    }
}
