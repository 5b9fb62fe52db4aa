//! The symbol graph.
//!
//! A [`SymbolGraph`] is a namespace list plus a type index keyed by stable
//! id. It is a value: every rewriting operation returns a new graph and
//! refreshes the index, so passes can never observe a half-updated state.

use crate::ids::StableId;
use crate::namespace::NamespaceSymbol;
use crate::types::TypeSymbol;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

#[derive(Clone, Debug, Default)]
pub struct SymbolGraph {
    namespaces: Vec<NamespaceSymbol>,
    index: IndexMap<StableId, TypeSymbol>,
    /// CLR full name → stable id, for heritage resolution.
    full_names: FxHashMap<String, StableId>,
}

impl SymbolGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type, creating its namespace on first use. Insertion order is
    /// preserved everywhere; it is part of the determinism contract.
    pub fn add_type(&mut self, ty: TypeSymbol) {
        let ns_name = ty.namespace.clone();
        let ns = match self.namespaces.iter_mut().find(|n| n.name == ns_name) {
            Some(ns) => ns,
            None => {
                self.namespaces.push(NamespaceSymbol::new(&ns_name));
                self.namespaces.last_mut().expect("just pushed")
            }
        };
        ns.types.insert(ty.stable_id.clone());
        ns.contributing_assemblies.insert(ty.assembly.clone());
        self.full_names
            .insert(ty.clr_full_name.clone(), ty.stable_id.clone());
        self.index.insert(ty.stable_id.clone(), ty);
    }

    /// Functional update: returns a new graph with `f` applied to the type
    /// at `id`. The stable id of a type is its identity and must not change
    /// under `f`.
    #[must_use]
    pub fn with_type(&self, id: &StableId, f: impl FnOnce(TypeSymbol) -> TypeSymbol) -> Self {
        let mut next = self.clone();
        if let Some(ty) = next.index.get(id).cloned() {
            let updated = f(ty);
            assert_eq!(
                &updated.stable_id, id,
                "with_type must not change a type's stable id"
            );
            next.full_names
                .insert(updated.clr_full_name.clone(), updated.stable_id.clone());
            next.index.insert(id.clone(), updated);
        } else {
            trace!(%id, "with_type on unknown id; graph unchanged");
        }
        next
    }

    /// Functional update over every type in one rebuild. Passes that touch
    /// many types use this instead of chaining `with_type`.
    #[must_use]
    pub fn map_types(&self, mut f: impl FnMut(&TypeSymbol) -> TypeSymbol) -> Self {
        let mut next = self.clone();
        let ids: Vec<StableId> = next.index.keys().cloned().collect();
        for id in ids {
            let updated = f(&next.index[&id]);
            assert_eq!(
                updated.stable_id, id,
                "map_types must not change a type's stable id"
            );
            next.index.insert(id, updated);
        }
        next
    }

    #[must_use]
    pub fn type_by_id(&self, id: &StableId) -> Option<&TypeSymbol> {
        self.index.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &StableId) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve a CLR full name to its in-graph type, if any.
    #[must_use]
    pub fn resolve_full_name(&self, full_name: &str) -> Option<&TypeSymbol> {
        self.full_names
            .get(full_name)
            .and_then(|id| self.index.get(id))
    }

    #[must_use]
    pub fn namespaces(&self) -> &[NamespaceSymbol] {
        &self.namespaces
    }

    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&NamespaceSymbol> {
        self.namespaces.iter().find(|n| n.name == name)
    }

    /// Types of one namespace in insertion order.
    #[must_use]
    pub fn types_in(&self, namespace: &str) -> Vec<&TypeSymbol> {
        self.namespace(namespace)
            .map(|ns| {
                ns.types
                    .iter()
                    .filter_map(|id| self.index.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All types sorted by stable id; the canonical pass iteration order.
    #[must_use]
    pub fn types_sorted(&self) -> Vec<&TypeSymbol> {
        let mut types: Vec<&TypeSymbol> = self.index.values().collect();
        types.sort_by(|a, b| a.stable_id.cmp(&b.stable_id));
        types
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Check the structural invariants that must hold between passes.
    /// Returns human-readable violations; empty means the graph is sound.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();

        // Namespace ↔ index consistency, both directions.
        for ns in &self.namespaces {
            for id in &ns.types {
                if !self.index.contains_key(id) {
                    violations.push(format!(
                        "type '{id}' reachable from namespace '{}' missing from index",
                        ns.name
                    ));
                }
            }
        }
        for ty in self.index.values() {
            let reachable = self
                .namespace(&ty.namespace)
                .is_some_and(|ns| ns.types.contains(&ty.stable_id));
            if !reachable {
                violations.push(format!(
                    "type '{}' in index but not reachable from namespace '{}'",
                    ty.stable_id, ty.namespace
                ));
            }
        }

        for ty in self.index.values() {
            // Unique member stable ids within a type.
            let ids = ty.members.stable_ids();
            let mut seen = rustc_hash::FxHashSet::default();
            for id in &ids {
                if !seen.insert(id.as_str()) {
                    violations.push(format!(
                        "duplicate member stable id '{id}' on '{}'",
                        ty.stable_id
                    ));
                }
            }

            // ViewOnly members carry a source interface.
            for m in &ty.members.methods {
                if m.emit_scope == crate::members::EmitScope::ViewOnly
                    && m.source_interface.is_none()
                {
                    violations.push(format!(
                        "ViewOnly method '{}' on '{}' lacks a source interface",
                        m.stable_id, ty.stable_id
                    ));
                }
            }
            for p in &ty.members.properties {
                if p.emit_scope == crate::members::EmitScope::ViewOnly
                    && p.source_interface.is_none()
                {
                    violations.push(format!(
                        "ViewOnly property '{}' on '{}' lacks a source interface",
                        p.stable_id, ty.stable_id
                    ));
                }
            }

            // Kind invariants.
            if let Some(violation) = ty.kind_violation() {
                violations.push(format!("'{}': {violation}", ty.stable_id));
            }
        }

        violations
    }
}
