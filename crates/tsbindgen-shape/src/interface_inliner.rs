//! Interface inheritance flattening.
//!
//! The target language models interface extension structurally, and later
//! passes (conformance, view planning) need each interface's complete
//! surface in one place. This pass computes the transitive closure over
//! base interfaces, substitutes generic arguments along every extension
//! edge (composing `parent ∘ current`), unions the inherited members into
//! the interface, and clears its direct-bases list.
//!
//! Method-level generic parameters are never substituted by type-level
//! maps. Methods deduplicate by canonical signature; properties by name
//! (the target has no property overloading) except indexers, which keep
//! their full signature; events by name.

use crate::ShapePass;
use rustc_hash::FxHashSet;
use tracing::debug;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::{
    Event, Method, Property, Provenance, StableId, SymbolGraph, TypeKind, TypeReference,
    TypeSubstitution, TypeSymbol,
};
use tsbindgen_naming::BuildContext;

pub struct InterfaceInliner;

#[derive(Default)]
struct Inherited {
    methods: Vec<Method>,
    properties: Vec<Property>,
    events: Vec<Event>,
}

impl ShapePass for InterfaceInliner {
    fn name(&self) -> &'static str {
        "InterfaceInliner"
    }

    fn run(&self, ctx: &BuildContext, graph: &SymbolGraph) -> SymbolGraph {
        let interface_ids: Vec<StableId> = graph
            .types_sorted()
            .into_iter()
            .filter(|t| t.kind == TypeKind::Interface)
            .map(|t| t.stable_id.clone())
            .collect();

        let mut next = graph.clone();
        for id in interface_ids {
            let iface = graph.type_by_id(&id).expect("listed id resolves");
            if iface.interfaces.is_empty() {
                continue;
            }

            let mut inherited = Inherited::default();
            let mut stack = vec![iface.clr_full_name.clone()];
            let ok = gather(
                ctx,
                graph,
                iface,
                &TypeSubstitution::identity(),
                &mut stack,
                &mut inherited,
            );
            if !ok {
                // Cycle reported; leave this interface un-inlined.
                continue;
            }

            debug!(
                interface = %iface.clr_full_name,
                methods = inherited.methods.len(),
                properties = inherited.properties.len(),
                "inlined base interfaces"
            );
            next = next.with_type(&id, |ty| merge(ty, inherited));
        }
        next
    }
}

/// Walk the base-interface closure of `iface`, accumulating substituted
/// members. Returns false when a cycle is found (already diagnosed).
fn gather(
    ctx: &BuildContext,
    graph: &SymbolGraph,
    iface: &TypeSymbol,
    subst: &TypeSubstitution,
    stack: &mut Vec<String>,
    acc: &mut Inherited,
) -> bool {
    for base_ref in &iface.interfaces {
        let TypeReference::Named {
            full_name,
            type_args,
            ..
        } = base_ref
        else {
            continue;
        };
        if stack.contains(full_name) {
            ctx.report(Diagnostic::new(
                codes::INTERFACE_BASE_CYCLE,
                &[full_name],
                Location::symbol(iface.stable_id.as_str()),
            ));
            return false;
        }
        let Some(base) = graph.resolve_full_name(full_name) else {
            // External base: its members are not visible to the closure.
            continue;
        };

        // Edge substitution, composed through everything above it.
        let edge = subst.then(&TypeSubstitution::new(type_args.clone()));
        let origin = base.self_reference().substitute(&edge);

        for m in &base.members.methods {
            let mut m = m.clone();
            m.params = m
                .params
                .iter()
                .map(|p| {
                    let mut p = p.clone();
                    p.ty = p.ty.substitute(&edge);
                    p
                })
                .collect();
            m.return_type = m.return_type.substitute(&edge);
            m.provenance = Provenance::FromInterface;
            m.source_interface = Some(origin.clone());
            acc.methods.push(m);
        }
        for p in &base.members.properties {
            let mut p = p.clone();
            p.property_type = p.property_type.substitute(&edge);
            p.index_params = p
                .index_params
                .iter()
                .map(|ip| {
                    let mut ip = ip.clone();
                    ip.ty = ip.ty.substitute(&edge);
                    ip
                })
                .collect();
            p.provenance = Provenance::FromInterface;
            p.source_interface = Some(origin.clone());
            acc.properties.push(p);
        }
        for e in &base.members.events {
            let mut e = e.clone();
            e.handler_type = e.handler_type.substitute(&edge);
            e.provenance = Provenance::FromInterface;
            e.source_interface = Some(origin.clone());
            acc.events.push(e);
        }

        stack.push(full_name.clone());
        let ok = gather(ctx, graph, base, &edge, stack, acc);
        stack.pop();
        if !ok {
            return false;
        }
    }
    true
}

/// Union inherited members into the interface, deduplicating against what
/// it declares (declared members win), and clear the direct-bases list.
fn merge(mut ty: TypeSymbol, inherited: Inherited) -> TypeSymbol {
    let mut method_keys: FxHashSet<String> = ty
        .members
        .methods
        .iter()
        .map(Method::signature_key)
        .collect();
    for mut m in inherited.methods {
        if method_keys.insert(m.signature_key()) {
            m.stable_id = m.expected_id_on(&ty.assembly, &ty.clr_full_name);
            ty.members.methods.push(m);
        }
    }

    let mut property_keys: FxHashSet<String> = ty
        .members
        .properties
        .iter()
        .map(property_key)
        .collect();
    for mut p in inherited.properties {
        if property_keys.insert(property_key(&p)) {
            p.stable_id = p.expected_id_on(&ty.assembly, &ty.clr_full_name);
            ty.members.properties.push(p);
        }
    }

    let mut event_names: FxHashSet<String> = ty
        .members
        .events
        .iter()
        .map(|e| e.clr_name.clone())
        .collect();
    for mut e in inherited.events {
        if event_names.insert(e.clr_name.clone()) {
            e.stable_id = StableId::member(
                &ty.assembly,
                &ty.clr_full_name,
                &e.clr_name,
                &e.canonical_signature(),
            );
            ty.members.events.push(e);
        }
    }

    ty.interfaces.clear();
    ty
}

/// Properties dedupe by name; indexers by full signature.
fn property_key(p: &Property) -> String {
    if p.is_indexer() {
        format!("{}{}", p.clr_name, p.canonical_signature())
    } else {
        p.clr_name.clone()
    }
}
