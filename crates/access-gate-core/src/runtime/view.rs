// crates/access-gate-core/src/runtime/view.rs
// ============================================================================
// Module: Filtered Read Views
// Description: Value-filtering resource decorator built from read-check
//              metadata.
// Purpose: Enforce per-value restrictions and the read-only guarantee at the
//          granularity of individual property access.
// Dependencies: crate::core, crate::interfaces, serde_json
// ============================================================================

//! ## Overview
//! A [`FilteredResource`] wraps a resource whose top-level read was granted
//! but whose values may be individually restricted, or whose caller lacks
//! update rights. Value reads consult the recorded gates in order; the first
//! denial wins, and an unrestricted value passes through unchanged.
//!
//! Mutation follows one discipline everywhere: entry points on a read-only
//! view fail with [`ResourceError::ReadOnly`] before touching the underlying
//! resource, and the mutable-capability accessor [`FilteredResource::writable`]
//! returns `None` instead of handing out a silently downgraded handle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::core::identifiers::ResourcePath;
use crate::interfaces::AccessGate;
use crate::interfaces::Resource;
use crate::interfaces::ResourceError;

// ============================================================================
// SECTION: Filtered Resource
// ============================================================================

/// Value-filtering decorator around a readable resource.
///
/// # Invariants
/// - `value_gates` is consulted in recorded (priority) order; the first gate
///   that denies a value name wins.
/// - When `can_update` is false, no mutation entry point ever reaches the
///   underlying resource.
pub struct FilteredResource<R: Resource> {
    /// The wrapped resource.
    inner: R,
    /// Gates that may restrict individual values, in recorded order.
    value_gates: Vec<Arc<dyn AccessGate>>,
    /// Whether the caller holds update rights on the resource.
    can_update: bool,
}

impl<R: Resource> FilteredResource<R> {
    /// Creates a view over `inner` with the recorded restriction gates and
    /// update permission.
    #[must_use]
    pub fn new(inner: R, value_gates: Vec<Arc<dyn AccessGate>>, can_update: bool) -> Self {
        Self {
            inner,
            value_gates,
            can_update,
        }
    }

    /// Returns whether the view permits mutation at all.
    #[must_use]
    pub const fn can_update(&self) -> bool {
        self.can_update
    }

    /// Returns a mutable handle to the view, or `None` when the view is
    /// read-only.
    ///
    /// The handle still enforces per-value restrictions on every write.
    #[must_use]
    pub fn writable(&mut self) -> Option<WritableResource<'_, R>> {
        if self.can_update {
            Some(WritableResource {
                view: self,
            })
        } else {
            None
        }
    }

    /// Returns true when every recorded gate permits reading the value.
    fn value_readable(&self, name: &str) -> bool {
        self.value_gates.iter().all(|gate| gate.can_read_value(&self.inner, name))
    }

    /// Returns true when every recorded gate permits setting the value.
    fn value_settable(&self, name: &str) -> bool {
        self.value_gates.iter().all(|gate| gate.can_set_value(&self.inner, name))
    }

    /// Returns true when every recorded gate permits deleting the value.
    fn value_deletable(&self, name: &str) -> bool {
        self.value_gates.iter().all(|gate| gate.can_delete_value(&self.inner, name))
    }
}

impl<R: Resource> Resource for FilteredResource<R> {
    fn path(&self) -> &ResourcePath {
        self.inner.path()
    }

    fn value(&self, name: &str) -> Option<Value> {
        if self.value_readable(name) { self.inner.value(name) } else { None }
    }

    fn value_names(&self) -> Vec<String> {
        self.inner.value_names().into_iter().filter(|name| self.value_readable(name)).collect()
    }

    fn set_value(&mut self, name: &str, value: Value) -> Result<(), ResourceError> {
        if !self.can_update {
            return Err(ResourceError::ReadOnly);
        }
        if !self.value_settable(name) {
            return Err(ResourceError::ValueRestricted {
                name: name.to_owned(),
            });
        }
        self.inner.set_value(name, value)
    }

    fn delete_value(&mut self, name: &str) -> Result<(), ResourceError> {
        if !self.can_update {
            return Err(ResourceError::ReadOnly);
        }
        if !self.value_deletable(name) {
            return Err(ResourceError::ValueRestricted {
                name: name.to_owned(),
            });
        }
        self.inner.delete_value(name)
    }
}

impl<R: Resource> fmt::Debug for FilteredResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredResource")
            .field("path", &self.inner.path())
            .field("value_gates", &self.value_gates.len())
            .field("can_update", &self.can_update)
            .finish()
    }
}

// ============================================================================
// SECTION: Writable Handle
// ============================================================================

/// Mutable capability over a filtered view.
///
/// # Invariants
/// - Only obtainable through [`FilteredResource::writable`], so it exists
///   only when the view permits updates.
pub struct WritableResource<'a, R: Resource> {
    /// The view being written through.
    view: &'a mut FilteredResource<R>,
}

impl<R: Resource> WritableResource<'_, R> {
    /// Returns the named value as visible through the view.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<Value> {
        self.view.value(name)
    }

    /// Sets the named value, subject to per-value restrictions.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValueRestricted`] when a recorded gate
    /// refuses the value, or the underlying resource's error.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), ResourceError> {
        self.view.set_value(name, value)
    }

    /// Deletes the named value, subject to per-value restrictions.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ValueRestricted`] when a recorded gate
    /// refuses the value, or the underlying resource's error.
    pub fn delete_value(&mut self, name: &str) -> Result<(), ResourceError> {
        self.view.delete_value(name)
    }
}

impl<R: Resource> fmt::Debug for WritableResource<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WritableResource").field("path", &self.view.path()).finish()
    }
}
