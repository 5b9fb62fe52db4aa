//! Property-override unification.
//!
//! The target language requires a derived property's type to be identical
//! to (or a subtype of) the base's, while the source platform freely
//! redeclares a property at a narrower or unrelated type. Unification maps
//! every level of such a chain to one union string so all declarations
//! agree.
//!
//! Safety filter: when any component type mentions a generic parameter and
//! the chain's levels do not declare identical parameter lists, the union
//! would mix tokens from disjoint scopes and not type-check; the chain is
//! skipped and recorded instead.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::{StableId, SymbolGraph, TypeKind, TypeReference, TypeSymbol};
use tsbindgen_naming::{BuildContext, TypePrinter};

/// `(type stable id, property stable id)` → union type string.
#[derive(Debug, Default)]
pub struct PropertyOverridePlan {
    pub overrides: IndexMap<(StableId, StableId), String>,
}

impl PropertyOverridePlan {
    #[must_use]
    pub fn union_for(&self, type_id: &StableId, property_id: &StableId) -> Option<&str> {
        self.overrides
            .get(&(type_id.clone(), property_id.clone()))
            .map(String::as_str)
    }
}

/// One property occurrence at one level of a chain.
struct Occurrence {
    type_id: StableId,
    property_id: StableId,
    rendered: String,
    is_generic: bool,
    generic_names: Vec<String>,
}

pub struct PropertyOverrideUnifier;

impl PropertyOverrideUnifier {
    #[must_use]
    pub fn run(ctx: &BuildContext, graph: &SymbolGraph) -> PropertyOverridePlan {
        let printer = TypePrinter::new(graph, &ctx.renamer);
        // Chains grouped by the root-most declaration of each property
        // name, so a whole inheritance tree agrees on one union.
        let mut groups: FxHashMap<(StableId, String, bool), Vec<Occurrence>> = FxHashMap::default();
        let mut group_order: Vec<(StableId, String, bool)> = Vec::new();

        for ty in graph.types_sorted() {
            if ty.kind != TypeKind::Class {
                continue;
            }
            for p in &ty.members.properties {
                let root = root_declaration(graph, ty, &p.clr_name, p.is_static());
                let key = (root, p.clr_name.clone(), p.is_static());
                let occurrence = Occurrence {
                    type_id: ty.stable_id.clone(),
                    property_id: p.stable_id.clone(),
                    rendered: printer.render(&p.property_type),
                    is_generic: p.property_type.contains_generic_param(),
                    generic_names: ty.generic_params.iter().map(|g| g.name.clone()).collect(),
                };
                let entry = groups.entry(key.clone()).or_default();
                if entry.is_empty() {
                    group_order.push(key);
                }
                entry.push(occurrence);
            }
        }

        let mut plan = PropertyOverridePlan::default();
        for key in group_order {
            let occurrences = &groups[&key];
            if occurrences.len() < 2 {
                continue;
            }
            let mut distinct: Vec<&str> = Vec::new();
            for occ in occurrences {
                if !distinct.contains(&occ.rendered.as_str()) {
                    distinct.push(&occ.rendered);
                }
            }
            if distinct.len() < 2 {
                continue;
            }

            if occurrences.iter().any(|o| o.is_generic) {
                let first = &occurrences[0].generic_names;
                if occurrences.iter().any(|o| &o.generic_names != first) {
                    ctx.report(Diagnostic::new(
                        codes::OVERRIDE_UNIFICATION_SKIPPED,
                        &[&key.1, key.0.as_str()],
                        Location::symbol(key.0.as_str()),
                    ));
                    continue;
                }
            }

            distinct.sort_unstable();
            let union = distinct.join(" | ");
            debug!(property = %key.1, %union, "unified property override chain");
            for occ in occurrences {
                plan.overrides.insert(
                    (occ.type_id.clone(), occ.property_id.clone()),
                    union.clone(),
                );
            }
        }
        plan
    }
}

/// Walk up the in-graph base chain to the topmost type declaring a
/// property with this name and staticness.
fn root_declaration(
    graph: &SymbolGraph,
    ty: &TypeSymbol,
    name: &str,
    is_static: bool,
) -> StableId {
    let mut root = ty;
    loop {
        let base = match root.base.as_ref() {
            Some(TypeReference::Named { full_name, .. }) => graph.resolve_full_name(full_name),
            _ => None,
        };
        match base {
            Some(base)
                if base
                    .members
                    .properties
                    .iter()
                    .any(|p| p.clr_name == name && p.is_static() == is_static) =>
            {
                root = base;
            }
            _ => return root.stable_id.clone(),
        }
    }
}
