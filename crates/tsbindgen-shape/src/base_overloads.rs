//! Base-class overload completion.
//!
//! The target language resolves an overloaded call against a single
//! declaration site: a derived class that redeclares one overload hides
//! every other ancestor overload of that name. To keep ancestor overloads
//! callable on derived instances, every ancestor instance method absent
//! from the derived class (by expected stable id) is cloned onto it.
//!
//! Classes are processed in base-first topological order, so a class only
//! needs to look at its direct base: that base has already been completed
//! and carries its own ancestors' methods.

use crate::ShapePass;
use rustc_hash::FxHashSet;
use tracing::debug;
use tsbindgen_model::{
    EmitScope, MemberFlags, Provenance, StableId, SymbolGraph, TypeKind, TypeReference,
    TypeSubstitution, Visibility,
};
use tsbindgen_naming::BuildContext;

pub struct BaseOverloadAdder;

impl ShapePass for BaseOverloadAdder {
    fn name(&self) -> &'static str {
        "BaseOverloadAdder"
    }

    fn run(&self, _ctx: &BuildContext, graph: &SymbolGraph) -> SymbolGraph {
        // Base-first order: ancestors complete before their descendants.
        let mut classes: Vec<(usize, StableId)> = graph
            .types_sorted()
            .into_iter()
            .filter(|t| t.kind == TypeKind::Class && t.base.is_some())
            .map(|t| (chain_depth(graph, t.stable_id.clone()), t.stable_id.clone()))
            .collect();
        classes.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        let mut next = graph.clone();
        for (_, id) in classes {
            let derived = next.type_by_id(&id).expect("listed id resolves").clone();
            let Some(TypeReference::Named {
                full_name,
                type_args,
                ..
            }) = derived.base.as_ref()
            else {
                continue;
            };
            let Some(base) = next.resolve_full_name(full_name).cloned() else {
                continue;
            };

            let edge = TypeSubstitution::new(type_args.clone());
            let mut clones = Vec::new();
            {
                let present: FxHashSet<&str> = derived
                    .members
                    .methods
                    .iter()
                    .map(|m| m.stable_id.as_str())
                    .collect();
                for m in &base.members.methods {
                    if m.is_static()
                        || m.emit_scope != EmitScope::ClassSurface
                        || m.visibility != Visibility::Public
                    {
                        continue;
                    }
                    let mut clone = m.clone();
                    clone.params = clone
                        .params
                        .iter()
                        .map(|p| {
                            let mut p = p.clone();
                            p.ty = p.ty.substitute(&edge);
                            p
                        })
                        .collect();
                    clone.return_type = clone.return_type.substitute(&edge);
                    let expected = clone.expected_id_on(&derived.assembly, &derived.clr_full_name);
                    if present.contains(expected.as_str()) {
                        continue;
                    }
                    clone.stable_id = expected;
                    clone.provenance = Provenance::BaseOverload;
                    clone.emit_scope = EmitScope::ClassSurface;
                    clone.flags.remove(MemberFlags::OVERRIDE);
                    clones.push(clone);
                }
            }
            if clones.is_empty() {
                continue;
            }

            debug!(class = %derived.clr_full_name, added = clones.len(), "completed base overloads");
            next = next.with_type(&id, move |mut ty| {
                ty.members.methods.extend(clones);
                let mut seen = FxHashSet::default();
                for m in &ty.members.methods {
                    // A duplicate here is a bug in this pass, not user input.
                    assert!(
                        seen.insert(m.stable_id.as_str().to_string()),
                        "BaseOverloadAdder produced duplicate stable id '{}' on '{}'",
                        m.stable_id,
                        ty.stable_id
                    );
                }
                ty
            });
        }
        next
    }
}

/// Length of the in-graph base chain above a type.
fn chain_depth(graph: &SymbolGraph, id: StableId) -> usize {
    let mut depth = 0;
    let mut current = graph.type_by_id(&id);
    while let Some(ty) = current {
        match ty.base.as_ref().and_then(|b| match b {
            TypeReference::Named { full_name, .. } => graph.resolve_full_name(full_name),
            _ => None,
        }) {
            Some(base) => {
                depth += 1;
                current = Some(base);
            }
            None => break,
        }
        // A chain longer than this means cyclic bases in the input.
        if depth > 1024 {
            break;
        }
    }
    depth
}
