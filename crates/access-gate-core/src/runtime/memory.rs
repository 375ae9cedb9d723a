// crates/access-gate-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Resource
// Description: Map-backed resource for tests, examples, and embedding.
// Purpose: Provide a ready-made Resource implementation with deterministic
//          value ordering.
// Dependencies: crate::core, crate::interfaces, serde_json
// ============================================================================

//! ## Overview
//! A minimal [`Resource`] backed by a `BTreeMap`. Deployments with a real
//! resource tree implement [`Resource`] themselves; this type exists so the
//! engine can be exercised without one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::identifiers::ResourcePath;
use crate::interfaces::Resource;
use crate::interfaces::ResourceError;

// ============================================================================
// SECTION: In-Memory Resource
// ============================================================================

/// Map-backed resource with deterministic value ordering.
///
/// # Invariants
/// - `path` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryResource {
    /// Hierarchical address of the resource.
    path: ResourcePath,
    /// Named values.
    values: BTreeMap<String, Value>,
}

impl InMemoryResource {
    /// Creates an empty resource at the path.
    #[must_use]
    pub fn new(path: impl Into<ResourcePath>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    /// Creates a resource at the path with the given values.
    #[must_use]
    pub fn with_values<I, K>(path: impl Into<ResourcePath>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            path: path.into(),
            values: values.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}

impl Resource for InMemoryResource {
    fn path(&self) -> &ResourcePath {
        &self.path
    }

    fn value(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn value_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn set_value(&mut self, name: &str, value: Value) -> Result<(), ResourceError> {
        self.values.insert(name.to_owned(), value);
        Ok(())
    }

    fn delete_value(&mut self, name: &str) -> Result<(), ResourceError> {
        if self.values.remove(name).is_none() {
            return Err(ResourceError::NoSuchValue {
                name: name.to_owned(),
            });
        }
        Ok(())
    }
}
