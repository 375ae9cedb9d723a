// crates/access-gate-core/src/runtime/engine.rs
// ============================================================================
// Module: Decision Engine
// Description: Priority-ordered verdict merging over a gate binding snapshot.
// Purpose: Produce one authorization decision per operation, and a
//          value-filtered view for reads.
// Dependencies: crate::core, crate::interfaces, crate::runtime::view,
//               verdict-logic, smallvec
// ============================================================================

//! ## Overview
//! The engine holds an immutable, priority-ordered snapshot of gate bindings
//! and a fixed unmatched-default policy. Every check selects the bindings in
//! scope for the path and operation, folds their verdicts through the
//! [`VerdictChain`] merge rule, and short-circuits on a settled grant or a
//! decisive verdict from a final binding. Gates reporting no restrictions for
//! a context are treated as granting without invoking their decision method.
//!
//! Rebinding is external: a registry change builds a new engine value, so an
//! in-flight evaluation only ever observes the snapshot it started with.
//! Checks are pure per call and safe for any number of concurrent callers;
//! the engine never blocks, retries, or caches on its own.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use verdict_logic::GateVerdict;
use verdict_logic::VerdictChain;

use crate::core::binding::GateBinding;
use crate::core::identifiers::ResourcePath;
use crate::core::operation::Operation;
use crate::core::report::DecisionReport;
use crate::core::report::TraceEntry;
use crate::interfaces::AccessContext;
use crate::interfaces::AccessError;
use crate::interfaces::AccessGate;
use crate::interfaces::GateError;
use crate::interfaces::Resource;
use crate::runtime::view::FilteredResource;

// ============================================================================
// SECTION: Read Access
// ============================================================================

/// Outcome of a read check.
///
/// # Invariants
/// - `Open` preserves the identity of the original resource; fully-open reads
///   never allocate a wrapper.
pub enum ReadAccess<R: Resource> {
    /// Read access is denied; no view of the resource exists.
    Denied,
    /// The resource is fully readable and updatable; returned unwrapped.
    Open(R),
    /// The resource is readable but value- or update-restricted.
    Filtered(FilteredResource<R>),
}

impl<R: Resource> ReadAccess<R> {
    /// Returns true when read access was denied.
    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }

    /// Returns the readable resource surface, if any.
    #[must_use]
    pub fn as_resource(&self) -> Option<&dyn Resource> {
        match self {
            Self::Denied => None,
            Self::Open(resource) => Some(resource),
            Self::Filtered(view) => Some(view),
        }
    }
}

impl<R: Resource> fmt::Debug for ReadAccess<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied => f.write_str("ReadAccess::Denied"),
            Self::Open(_) => f.write_str("ReadAccess::Open"),
            Self::Filtered(_) => f.write_str("ReadAccess::Filtered"),
        }
    }
}

// ============================================================================
// SECTION: Chain Outcome
// ============================================================================

/// Result of folding one matching-binding selection.
struct ChainOutcome {
    /// Merged chain state after the fold.
    chain: VerdictChain,
    /// True when at least one binding matched the path and operation.
    matched_any: bool,
}

// ============================================================================
// SECTION: Decision Engine
// ============================================================================

/// Authorization decision engine over an ordered gate binding snapshot.
///
/// # Invariants
/// - `bindings` is sorted highest priority first; ties keep registration
///   order.
/// - The engine never allows an operation when a matched chain ends in
///   `Denied` or `CantDecide`; the unmatched default applies only when no
///   binding matched at all.
pub struct DecisionEngine {
    /// Binding snapshot in consultation order.
    bindings: Vec<GateBinding>,
    /// Fallback decision when no binding scope covers a check.
    default_allow_if_unmatched: bool,
}

impl DecisionEngine {
    /// Creates an engine over the given bindings.
    ///
    /// Bindings are sorted by descending priority; registrations with equal
    /// priority keep their order.
    #[must_use]
    pub fn new(mut bindings: Vec<GateBinding>, default_allow_if_unmatched: bool) -> Self {
        bindings.sort_by_key(|binding| std::cmp::Reverse(binding.priority()));
        Self {
            bindings,
            default_allow_if_unmatched,
        }
    }

    /// Creates an engine with the provider-deployment default: operations
    /// unmatched by any gate are allowed.
    #[must_use]
    pub fn provider_defaults(bindings: Vec<GateBinding>) -> Self {
        Self::new(bindings, true)
    }

    /// Creates an engine with the application-deployment default: operations
    /// unmatched by any gate are denied.
    #[must_use]
    pub fn application_defaults(bindings: Vec<GateBinding>) -> Self {
        Self::new(bindings, false)
    }

    /// Returns the binding snapshot in consultation order.
    #[must_use]
    pub fn bindings(&self) -> &[GateBinding] {
        &self.bindings
    }

    /// Returns the configured unmatched-default policy.
    #[must_use]
    pub const fn default_allow_if_unmatched(&self) -> bool {
        self.default_allow_if_unmatched
    }

    // ------------------------------------------------------------------
    // Operation checks
    // ------------------------------------------------------------------

    /// Checks whether a resource may be created at the path.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when a gate faults during evaluation.
    pub fn can_create(
        &self,
        path: &ResourcePath,
        ctx: &AccessContext,
    ) -> Result<bool, AccessError> {
        self.can_do_operation(
            Operation::Create,
            Some(path),
            |gate| gate.has_create_restrictions(ctx),
            |gate| gate.can_create(path, ctx),
            None,
        )
    }

    /// Checks whether the resource may be updated.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when a gate faults during evaluation.
    pub fn can_update(
        &self,
        resource: &dyn Resource,
        ctx: &AccessContext,
    ) -> Result<bool, AccessError> {
        self.can_do_operation(
            Operation::Update,
            Some(resource.path()),
            |gate| gate.has_update_restrictions(ctx),
            |gate| gate.can_update(resource, ctx),
            None,
        )
    }

    /// Checks whether the resource may be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when a gate faults during evaluation.
    pub fn can_delete(
        &self,
        resource: &dyn Resource,
        ctx: &AccessContext,
    ) -> Result<bool, AccessError> {
        self.can_do_operation(
            Operation::Delete,
            Some(resource.path()),
            |gate| gate.has_delete_restrictions(ctx),
            |gate| gate.can_delete(resource, ctx),
            None,
        )
    }

    /// Checks whether the resource may be executed.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when a gate faults during evaluation.
    pub fn can_execute(
        &self,
        resource: &dyn Resource,
        ctx: &AccessContext,
    ) -> Result<bool, AccessError> {
        self.can_do_operation(
            Operation::Execute,
            Some(resource.path()),
            |gate| gate.has_execute_restrictions(ctx),
            |gate| gate.can_execute(resource, ctx),
            None,
        )
    }

    /// Checks whether the resource's children may be reordered.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when a gate faults during evaluation.
    pub fn can_order_children(
        &self,
        resource: &dyn Resource,
        ctx: &AccessContext,
    ) -> Result<bool, AccessError> {
        self.can_do_operation(
            Operation::OrderChildren,
            Some(resource.path()),
            |gate| gate.has_order_children_restrictions(ctx),
            |gate| gate.can_order_children(resource, ctx),
            None,
        )
    }

    // ------------------------------------------------------------------
    // Read check
    // ------------------------------------------------------------------

    /// Runs the read check and returns the readable view of the resource.
    ///
    /// The chain is folded with the same merge and short-circuit rule as the
    /// other checks. Along the way, every granting gate either certifies all
    /// values as readable or is recorded as a partial value restrictor. A
    /// granted read comes back unwrapped only when some gate certified full
    /// value access and the caller also passes the update check; otherwise
    /// the resource is wrapped in a [`FilteredResource`].
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when a gate faults during evaluation.
    pub fn read<R: Resource>(
        &self,
        resource: R,
        ctx: &AccessContext,
    ) -> Result<ReadAccess<R>, AccessError> {
        let mut chain = VerdictChain::new();
        let mut matched_any = false;
        let mut full_value_access = false;
        let mut value_gates: SmallVec<[Arc<dyn AccessGate>; 4]> = SmallVec::new();

        for binding in &self.bindings {
            if !binding.matches(Some(resource.path()), Operation::Read) {
                continue;
            }
            matched_any = true;
            let gate = binding.gate();

            let verdict = if gate.has_read_restrictions(ctx) {
                gate.can_read(&resource, ctx).map_err(|source| gate_fault(gate.as_ref(), source))?
            } else {
                GateVerdict::Granted
            };

            // Track which granting gates may still restrict individual
            // values. One full certification discards the partial list.
            if verdict == GateVerdict::Granted && !full_value_access {
                if gate.can_read_all_values(&resource) {
                    full_value_access = true;
                    value_gates.clear();
                } else {
                    value_gates.push(Arc::clone(gate));
                }
            }

            chain.absorb(verdict);
            if chain.halts(verdict, binding.is_final(Operation::Read)) {
                break;
            }
        }

        if !matched_any {
            return Ok(if self.default_allow_if_unmatched {
                ReadAccess::Open(resource)
            } else {
                ReadAccess::Denied
            });
        }

        if !chain.allows() {
            return Ok(ReadAccess::Denied);
        }

        let can_update = self.can_update(&resource, ctx)?;
        if full_value_access && can_update {
            Ok(ReadAccess::Open(resource))
        } else {
            Ok(ReadAccess::Filtered(FilteredResource::new(
                resource,
                value_gates.into_vec(),
                can_update,
            )))
        }
    }

    // ------------------------------------------------------------------
    // Query transform passthrough
    // ------------------------------------------------------------------

    /// Feeds a query through every binding's transform capability in
    /// priority order.
    ///
    /// This is not a per-gate optional step: a gate yielding no
    /// transformation violates its contract and fails the whole call.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::QueryTransformContract`] naming the offending
    /// gate, or [`AccessError::Gate`] when a gate faults.
    pub fn transform_query(
        &self,
        query: &str,
        language: &str,
        ctx: &AccessContext,
    ) -> Result<String, AccessError> {
        let mut current = query.to_owned();
        for binding in &self.bindings {
            let gate = binding.gate();
            let transformed = gate
                .transform_query(&current, language, ctx)
                .map_err(|source| gate_fault(gate.as_ref(), source))?;
            match transformed {
                Some(next) => current = next,
                None => {
                    return Err(AccessError::QueryTransformContract {
                        gate_id: gate.id().clone(),
                    });
                }
            }
        }
        Ok(current)
    }

    // ------------------------------------------------------------------
    // Decision reports
    // ------------------------------------------------------------------

    /// Runs a check and returns the outcome with its per-binding trace.
    ///
    /// For [`Operation::Create`] the resource stands in for the prospective
    /// target; only its path is consulted.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when a gate faults during evaluation.
    pub fn explain(
        &self,
        operation: Operation,
        resource: &dyn Resource,
        ctx: &AccessContext,
    ) -> Result<DecisionReport, AccessError> {
        let path = resource.path();
        let mut trace = Vec::new();
        let allowed = match operation {
            Operation::Read => self.can_do_operation(
                operation,
                Some(path),
                |gate| gate.has_read_restrictions(ctx),
                |gate| gate.can_read(resource, ctx),
                Some(&mut trace),
            )?,
            Operation::Create => self.can_do_operation(
                operation,
                Some(path),
                |gate| gate.has_create_restrictions(ctx),
                |gate| gate.can_create(path, ctx),
                Some(&mut trace),
            )?,
            Operation::Update => self.can_do_operation(
                operation,
                Some(path),
                |gate| gate.has_update_restrictions(ctx),
                |gate| gate.can_update(resource, ctx),
                Some(&mut trace),
            )?,
            Operation::Delete => self.can_do_operation(
                operation,
                Some(path),
                |gate| gate.has_delete_restrictions(ctx),
                |gate| gate.can_delete(resource, ctx),
                Some(&mut trace),
            )?,
            Operation::Execute => self.can_do_operation(
                operation,
                Some(path),
                |gate| gate.has_execute_restrictions(ctx),
                |gate| gate.can_execute(resource, ctx),
                Some(&mut trace),
            )?,
            Operation::OrderChildren => self.can_do_operation(
                operation,
                Some(path),
                |gate| gate.has_order_children_restrictions(ctx),
                |gate| gate.can_order_children(resource, ctx),
                Some(&mut trace),
            )?,
        };
        let unmatched_default = trace.is_empty();
        Ok(DecisionReport {
            operation,
            path: path.clone(),
            allowed,
            unmatched_default,
            trace,
        })
    }

    // ------------------------------------------------------------------
    // Chain evaluation
    // ------------------------------------------------------------------

    /// Runs the generic per-operation check.
    fn can_do_operation<F, G>(
        &self,
        operation: Operation,
        path: Option<&ResourcePath>,
        has_restrictions: F,
        decide: G,
        trace: Option<&mut Vec<TraceEntry>>,
    ) -> Result<bool, AccessError>
    where
        F: Fn(&dyn AccessGate) -> bool,
        G: Fn(&dyn AccessGate) -> Result<GateVerdict, GateError>,
    {
        let outcome = self.run_chain(operation, path, has_restrictions, decide, trace)?;
        if outcome.matched_any {
            Ok(outcome.chain.allows())
        } else {
            Ok(self.default_allow_if_unmatched)
        }
    }

    /// Folds the matching bindings through the verdict chain.
    fn run_chain<F, G>(
        &self,
        operation: Operation,
        path: Option<&ResourcePath>,
        has_restrictions: F,
        decide: G,
        mut trace: Option<&mut Vec<TraceEntry>>,
    ) -> Result<ChainOutcome, AccessError>
    where
        F: Fn(&dyn AccessGate) -> bool,
        G: Fn(&dyn AccessGate) -> Result<GateVerdict, GateError>,
    {
        let mut chain = VerdictChain::new();
        let mut matched_any = false;

        for binding in &self.bindings {
            if !binding.matches(path, operation) {
                continue;
            }
            matched_any = true;
            let gate = binding.gate().as_ref();

            // Fast-path exemption: a gate without restrictions for this
            // context grants without being asked to decide.
            let verdict = if has_restrictions(gate) {
                decide(gate).map_err(|source| gate_fault(gate, source))?
            } else {
                GateVerdict::Granted
            };

            if let Some(entries) = trace.as_mut() {
                entries.push(TraceEntry {
                    gate_id: gate.id().clone(),
                    verdict,
                    final_binding: binding.is_final(operation),
                });
            }

            chain.absorb(verdict);
            if chain.halts(verdict, binding.is_final(operation)) {
                break;
            }
        }

        Ok(ChainOutcome {
            chain,
            matched_any,
        })
    }
}

impl fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("bindings", &self.bindings.len())
            .field("default_allow_if_unmatched", &self.default_allow_if_unmatched)
            .finish()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Wraps a gate fault with the identity of the faulting gate.
fn gate_fault(gate: &dyn AccessGate, source: GateError) -> AccessError {
    AccessError::Gate {
        gate_id: gate.id().clone(),
        source,
    }
}
