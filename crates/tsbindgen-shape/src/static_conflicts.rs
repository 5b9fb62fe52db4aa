//! Static-conflict suppression.
//!
//! `Derived extends Base` makes the target language compare static sides.
//! A derived static whose signature narrows or repurposes a same-named
//! base static fails that comparison, so the derived member is suppressed
//! from the class surface (and preserved in metadata).
//!
//! Conflict definition: a property conflicts when its type differs from
//! the base's same-named static property; a method conflicts when no
//! identical-signature counterpart exists among the base's same-named
//! static methods; a field conflicts when its type differs.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;
use tsbindgen_model::{StableId, SymbolGraph, TypeKind, TypeReference, TypeSubstitution, TypeSymbol};
use tsbindgen_naming::BuildContext;

/// Derived statics to omit from class surfaces.
#[derive(Debug, Default)]
pub struct StaticConflictPlan {
    pub suppressed_members_by_type: IndexMap<StableId, IndexSet<StableId>>,
    /// Member stable id → human-readable conflict reason.
    pub reasons: IndexMap<StableId, String>,
}

impl StaticConflictPlan {
    #[must_use]
    pub fn is_suppressed(&self, type_id: &StableId, member_id: &StableId) -> bool {
        self.suppressed_members_by_type
            .get(type_id)
            .is_some_and(|set| set.contains(member_id))
    }

    fn suppress(&mut self, type_id: &StableId, member_id: &StableId, reason: String) {
        self.suppressed_members_by_type
            .entry(type_id.clone())
            .or_default()
            .insert(member_id.clone());
        self.reasons.insert(member_id.clone(), reason);
    }
}

pub struct StaticConflictDetector;

impl StaticConflictDetector {
    #[must_use]
    pub fn run(_ctx: &BuildContext, graph: &SymbolGraph) -> StaticConflictPlan {
        let mut plan = StaticConflictPlan::default();
        for ty in graph.types_sorted() {
            if ty.kind != TypeKind::Class {
                continue;
            }
            let Some((base, edge)) = in_graph_base(graph, ty) else {
                continue;
            };
            // Static-only chains lose their extends clause to flattening;
            // without it there is no static-side comparison to fail.
            if ty.is_static_only() && base.is_static_only() {
                continue;
            }

            for p in &ty.members.properties {
                if !p.is_static() {
                    continue;
                }
                let Some(base_p) = base
                    .members
                    .properties
                    .iter()
                    .find(|bp| bp.is_static() && bp.clr_name == p.clr_name)
                else {
                    continue;
                };
                let base_ty = base_p.property_type.substitute(&edge).canonical_key();
                let derived_ty = p.property_type.canonical_key();
                if base_ty != derived_ty {
                    plan.suppress(
                        &ty.stable_id,
                        &p.stable_id,
                        format!("static property type '{derived_ty}' narrows base '{base_ty}'"),
                    );
                }
            }

            for m in &ty.members.methods {
                if !m.is_static() {
                    continue;
                }
                let same_named: Vec<_> = base
                    .members
                    .methods
                    .iter()
                    .filter(|bm| bm.is_static() && bm.clr_name == m.clr_name)
                    .collect();
                if same_named.is_empty() {
                    continue;
                }
                let derived_sig = m.canonical_signature();
                let compatible = same_named
                    .iter()
                    .any(|bm| substituted_signature(bm, &edge) == derived_sig);
                if !compatible {
                    plan.suppress(
                        &ty.stable_id,
                        &m.stable_id,
                        format!(
                            "static method '{}' has no identical-signature counterpart on '{}'",
                            m.clr_name, base.clr_full_name
                        ),
                    );
                }
            }

            for f in &ty.members.fields {
                if !f.is_static() {
                    continue;
                }
                let Some(base_f) = base
                    .members
                    .fields
                    .iter()
                    .find(|bf| bf.is_static() && bf.clr_name == f.clr_name)
                else {
                    continue;
                };
                let base_ty = base_f.field_type.substitute(&edge).canonical_key();
                let derived_ty = f.field_type.canonical_key();
                if base_ty != derived_ty {
                    plan.suppress(
                        &ty.stable_id,
                        &f.stable_id,
                        format!("static field type '{derived_ty}' narrows base '{base_ty}'"),
                    );
                }
            }
        }
        if !plan.suppressed_members_by_type.is_empty() {
            debug!(
                types = plan.suppressed_members_by_type.len(),
                members = plan.reasons.len(),
                "suppressed conflicting statics"
            );
        }
        plan
    }
}

fn substituted_signature(
    method: &tsbindgen_model::Method,
    edge: &TypeSubstitution,
) -> String {
    let mut m = method.clone();
    m.params = m
        .params
        .iter()
        .map(|p| {
            let mut p = p.clone();
            p.ty = p.ty.substitute(edge);
            p
        })
        .collect();
    m.return_type = m.return_type.substitute(edge);
    m.canonical_signature()
}

fn in_graph_base<'g>(
    graph: &'g SymbolGraph,
    ty: &TypeSymbol,
) -> Option<(&'g TypeSymbol, TypeSubstitution)> {
    match ty.base.as_ref()? {
        TypeReference::Named {
            full_name,
            type_args,
            ..
        } => graph
            .resolve_full_name(full_name)
            .map(|base| (base, TypeSubstitution::new(type_args.clone()))),
        _ => None,
    }
}
