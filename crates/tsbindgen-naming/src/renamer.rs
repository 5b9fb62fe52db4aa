//! The renamer.
//!
//! A single process-wide authority for naming decisions. Reservations are
//! monotonic: once a final name is assigned to a `(stable id, scope)` pair
//! it never changes, and every write goes through `reserve_*` so the order
//! of decisions is deterministic.

use crate::reserved::{is_reserved_word, sanitize_identifier};
use crate::scope::{Scope, ScopeForm, Side};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, RwLock};
use tracing::trace;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, DiagnosticSink, Location, ReservedWordStrategy};
use tsbindgen_model::{StableId, TypeSymbol};

/// One naming decision.
#[derive(Clone, Debug)]
pub struct Reservation {
    pub stable_id: StableId,
    pub scope: Scope,
    pub preferred: String,
    pub final_name: String,
    /// Free-form rewrite reason; the phase gate correlates it with emit
    /// scopes.
    pub provenance: String,
    pub is_static: bool,
}

#[derive(Default)]
struct RenamerState {
    /// `(stable id, surface scope)` → reservation, in decision order.
    reservations: IndexMap<(StableId, Scope), Reservation>,
    /// Names taken per scope.
    taken: FxHashMap<Scope, FxHashSet<String>>,
}

pub struct Renamer {
    state: RwLock<RenamerState>,
    sink: Arc<DiagnosticSink>,
    strategy: ReservedWordStrategy,
}

impl Renamer {
    #[must_use]
    pub fn new(sink: Arc<DiagnosticSink>, strategy: ReservedWordStrategy) -> Self {
        Self {
            state: RwLock::new(RenamerState::default()),
            sink,
            strategy,
        }
    }

    /// Reserve a top-level name for a type in a namespace scope.
    ///
    /// `preferred` is the CLR simple name (arity suffix allowed; it becomes
    /// `<Name>_<arity>`). Returns the final name; idempotent per
    /// `(stable id, scope)`.
    pub fn reserve_type(
        &self,
        stable_id: &StableId,
        preferred: &str,
        scope: &Scope,
        provenance: &str,
    ) -> String {
        debug_assert!(
            matches!(
                scope.form(),
                ScopeForm::NamespacePublic | ScopeForm::NamespaceInternal
            ),
            "type reservation in non-namespace scope '{scope}'"
        );
        self.reserve_in(stable_id, preferred, scope.clone(), provenance, false)
    }

    /// Reserve a member name. `base_scope` must be a base (unsided) scope;
    /// the renamer derives the surface from `is_static`.
    pub fn reserve_member(
        &self,
        stable_id: &StableId,
        preferred: &str,
        base_scope: &Scope,
        reason: &str,
        is_static: bool,
    ) -> String {
        let surface = base_scope.surface(Side::for_static(is_static));
        self.reserve_in(stable_id, preferred, surface, reason, is_static)
    }

    fn reserve_in(
        &self,
        stable_id: &StableId,
        preferred: &str,
        scope: Scope,
        provenance: &str,
        is_static: bool,
    ) -> String {
        let mut state = self.state.write().expect("renamer poisoned");
        let key = (stable_id.clone(), scope.clone());
        if let Some(existing) = state.reservations.get(&key) {
            if existing.preferred != preferred {
                self.sink.report(Diagnostic::new(
                    codes::RESERVATION_NOT_MONOTONIC,
                    &[
                        stable_id.as_str(),
                        scope.as_str(),
                        &existing.preferred,
                        preferred,
                    ],
                    Location::symbol(stable_id.as_str()).with_scope(scope.as_str()),
                ));
            }
            return existing.final_name.clone();
        }

        let candidate = self.target_safe(preferred, &scope);
        let taken = state.taken.entry(scope.clone()).or_default();
        let final_name = if !taken.contains(&candidate) {
            candidate
        } else {
            let mut n = 1usize;
            loop {
                let suffixed = format!("{candidate}_{n}");
                if !taken.contains(&suffixed) {
                    break suffixed;
                }
                n += 1;
            }
        };
        taken.insert(final_name.clone());
        trace!(id = %stable_id, %scope, %final_name, "reserved");
        state.reservations.insert(
            key,
            Reservation {
                stable_id: stable_id.clone(),
                scope,
                preferred: preferred.to_string(),
                final_name: final_name.clone(),
                provenance: provenance.to_string(),
                is_static,
            },
        );
        final_name
    }

    /// Derive the first target-safe candidate from a preferred name:
    /// sanitize CLR punctuation, then apply the reserved-word strategy
    /// (recorded, never silent).
    fn target_safe(&self, preferred: &str, scope: &Scope) -> String {
        let sanitized = sanitize_identifier(preferred);
        if is_reserved_word(&sanitized) {
            let renamed = self.strategy.apply(&sanitized);
            self.sink.report(Diagnostic::new(
                codes::RESERVED_WORD_RENAMED,
                &[&sanitized, &renamed],
                Location::scope(scope.as_str()),
            ));
            renamed
        } else {
            sanitized
        }
    }

    /// Final name of a type in its namespace scope. This is the alias form
    /// (`Foo`); value positions use [`Renamer::instance_type_name`].
    #[must_use]
    pub fn final_type_name(&self, ty: &TypeSymbol) -> Option<String> {
        let state = self.state.read().expect("renamer poisoned");
        for scope in [
            crate::scope::ScopeFactory::namespace_public(&ty.namespace),
            crate::scope::ScopeFactory::namespace_internal(&ty.namespace),
        ] {
            if let Some(r) = state.reservations.get(&(ty.stable_id.clone(), scope)) {
                return Some(r.final_name.clone());
            }
        }
        None
    }

    /// Final member name; `surface_scope` must be a surface scope.
    #[must_use]
    pub fn final_member_name(&self, stable_id: &StableId, surface_scope: &Scope) -> Option<String> {
        debug_assert!(
            surface_scope.form().is_surface(),
            "member lookup in base scope '{surface_scope}'"
        );
        self.state
            .read()
            .expect("renamer poisoned")
            .reservations
            .get(&(stable_id.clone(), surface_scope.clone()))
            .map(|r| r.final_name.clone())
    }

    /// The `$instance` form naming the concrete declarable entity.
    #[must_use]
    pub fn instance_type_name(&self, ty: &TypeSymbol) -> Option<String> {
        self.final_type_name(ty).map(|name| format!("{name}$instance"))
    }

    /// The `__<Name>$views` form naming the views side of the alias union.
    #[must_use]
    pub fn views_type_name(&self, ty: &TypeSymbol) -> Option<String> {
        self.final_type_name(ty).map(|name| format!("__{name}$views"))
    }

    /// Every reservation, in decision order. The phase gate validates over
    /// this snapshot.
    #[must_use]
    pub fn reservations(&self) -> Vec<Reservation> {
        self.state
            .read()
            .expect("renamer poisoned")
            .reservations
            .values()
            .cloned()
            .collect()
    }
}
