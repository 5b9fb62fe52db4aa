//! Graph-wide name reservation.
//!
//! The first naming step of every run: reserve a top-level name for each
//! type in its namespace scope, before any pass needs to render a type.
//! Iteration is sorted (namespace name, then CLR name, then stable id) so
//! suffix assignment is identical across runs.

use crate::context::BuildContext;
use crate::scope::ScopeFactory;
use tsbindgen_model::{EmitScope, StableId, SymbolGraph, TypeReference, TypeSymbol, Visibility};

pub fn reserve_graph_names(ctx: &BuildContext, graph: &SymbolGraph) {
    let mut namespaces: Vec<&str> = graph.namespaces().iter().map(|n| n.name.as_str()).collect();
    namespaces.sort_unstable();

    for ns_name in namespaces {
        let public = ScopeFactory::namespace_public(ns_name);
        let internal = ScopeFactory::namespace_internal(ns_name);
        let mut types = graph.types_in(ns_name);
        types.sort_by(|a, b| {
            a.clr_name
                .cmp(&b.clr_name)
                .then_with(|| a.stable_id.cmp(&b.stable_id))
        });
        for ty in types {
            let scope = if ty.visibility == Visibility::Public {
                &public
            } else {
                &internal
            };
            let transform = match ty.kind {
                tsbindgen_model::TypeKind::Interface => ctx.options.transforms.interfaces,
                _ => ctx.options.transforms.classes,
            };
            let preferred = transform.apply(&ty.clr_name);
            ctx.renamer
                .reserve_type(&ty.stable_id, &preferred, scope, "declared");
        }
    }
}

/// Reserve member names on every class surface and explicit view. Runs
/// after the shape passes (their rewrites decide which members exist and
/// on which surface).
pub fn reserve_member_names(ctx: &BuildContext, graph: &SymbolGraph) {
    for ty in graph.types_sorted() {
        let type_base = ScopeFactory::type_base(&ty.clr_full_name);

        for m in &ty.members.methods {
            if m.emit_scope == EmitScope::Omitted {
                continue;
            }
            let preferred = ctx.options.transforms.methods.apply(&m.clr_name);
            let base = member_base_scope(graph, ty, m.emit_scope, &m.source_interface, &type_base);
            ctx.renamer.reserve_member(
                &m.stable_id,
                &preferred,
                &base,
                m.provenance.as_str(),
                m.is_static(),
            );
        }
        for p in &ty.members.properties {
            if p.emit_scope == EmitScope::Omitted {
                continue;
            }
            let preferred = ctx.options.transforms.properties.apply(&p.clr_name);
            let base = member_base_scope(graph, ty, p.emit_scope, &p.source_interface, &type_base);
            ctx.renamer.reserve_member(
                &p.stable_id,
                &preferred,
                &base,
                p.provenance.as_str(),
                p.is_static(),
            );
        }
        for f in &ty.members.fields {
            if f.emit_scope == EmitScope::Omitted {
                continue;
            }
            let preferred = ctx.options.transforms.properties.apply(&f.clr_name);
            let base = member_base_scope(graph, ty, f.emit_scope, &f.source_interface, &type_base);
            ctx.renamer.reserve_member(
                &f.stable_id,
                &preferred,
                &base,
                f.provenance.as_str(),
                f.is_static(),
            );
        }
        for e in &ty.members.events {
            if e.emit_scope == EmitScope::Omitted {
                continue;
            }
            let preferred = ctx.options.transforms.properties.apply(&e.clr_name);
            let base = member_base_scope(graph, ty, e.emit_scope, &e.source_interface, &type_base);
            ctx.renamer.reserve_member(
                &e.stable_id,
                &preferred,
                &base,
                e.provenance.as_str(),
                e.is_static(),
            );
        }
        for literal in &ty.enum_literals {
            let preferred = ctx.options.transforms.enum_members.apply(&literal.clr_name);
            let literal_id = StableId::member(
                &ty.assembly,
                &ty.clr_full_name,
                &literal.clr_name,
                ":enum-literal",
            );
            ctx.renamer
                .reserve_member(&literal_id, &preferred, &type_base, "declared", true);
        }
    }
}

/// ClassSurface members reserve under the type's base scope; ViewOnly
/// members under the view scope of their source interface. Lookups use
/// [`member_surface_scope`], which derives the sided surface of the same
/// base scope.
pub fn member_base_scope(
    graph: &SymbolGraph,
    ty: &TypeSymbol,
    emit_scope: EmitScope,
    source_interface: &Option<TypeReference>,
    type_base: &crate::scope::Scope,
) -> crate::scope::Scope {
    if emit_scope == EmitScope::ViewOnly
        && let Some(iface_ref) = source_interface
    {
        let iface_id = match iface_ref {
            TypeReference::Named {
                assembly,
                full_name,
                ..
            } => graph
                .resolve_full_name(full_name)
                .map(|t| t.stable_id.clone())
                .unwrap_or_else(|| StableId::type_id(assembly, full_name)),
            other => StableId::raw(other.canonical_key()),
        };
        ScopeFactory::view_base(&ty.stable_id, &iface_id)
    } else {
        type_base.clone()
    }
}

/// The surface scope a member's final name lives under.
#[must_use]
pub fn member_surface_scope(
    graph: &SymbolGraph,
    ty: &TypeSymbol,
    emit_scope: EmitScope,
    source_interface: &Option<TypeReference>,
    is_static: bool,
) -> crate::scope::Scope {
    let type_base = ScopeFactory::type_base(&ty.clr_full_name);
    member_base_scope(graph, ty, emit_scope, source_interface, &type_base)
        .surface(crate::scope::Side::for_static(is_static))
}
