//! Member integrity rules.
//!
//! EmitScope invariants: ViewOnly members carry a source interface that
//! one of the type's explicit views actually exposes, Omitted members were
//! never given a name, constructors never leave the class surface, and
//! view property names are collision-free per type.

use rustc_hash::FxHashSet;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::{EmitScope, TypeReference};
use tsbindgen_naming::{BuildContext, ScopeFactory, Side};
use tsbindgen_plan::EmissionPlan;

pub(crate) fn check(ctx: &BuildContext, plan: &EmissionPlan) {
    for ty in plan.graph.types_sorted() {
        let view_roots: FxHashSet<&str> = ty
            .explicit_views
            .iter()
            .filter_map(|v| v.interface_ref.named_root())
            .collect();

        // View property names unique per type.
        let mut seen_views = FxHashSet::default();
        for view in &ty.explicit_views {
            if !seen_views.insert(view.view_property_name.as_str()) {
                ctx.report(Diagnostic::new(
                    codes::VIEW_PROPERTY_COLLISION,
                    &[&ty.clr_full_name, &view.view_property_name],
                    Location::symbol(ty.stable_id.as_str()),
                ));
            }
        }

        for m in &ty.members.methods {
            check_member(
                ctx,
                ty,
                &m.stable_id,
                m.emit_scope,
                m.source_interface.as_ref(),
                m.is_static(),
                &view_roots,
            );
        }
        for p in &ty.members.properties {
            check_member(
                ctx,
                ty,
                &p.stable_id,
                p.emit_scope,
                p.source_interface.as_ref(),
                p.is_static(),
                &view_roots,
            );
        }
        for e in &ty.members.events {
            check_member(
                ctx,
                ty,
                &e.stable_id,
                e.emit_scope,
                e.source_interface.as_ref(),
                e.is_static(),
                &view_roots,
            );
        }
        for c in &ty.members.constructors {
            if c.emit_scope == EmitScope::ViewOnly {
                ctx.report(Diagnostic::new(
                    codes::EMIT_SCOPE_INVALID,
                    &[c.stable_id.as_str(), &ty.clr_full_name, "ViewOnly"],
                    Location::symbol(c.stable_id.as_str()),
                ));
            }
        }
    }
}

fn check_member(
    ctx: &BuildContext,
    ty: &tsbindgen_model::TypeSymbol,
    stable_id: &tsbindgen_model::StableId,
    emit_scope: EmitScope,
    source_interface: Option<&TypeReference>,
    is_static: bool,
    view_roots: &FxHashSet<&str>,
) {
    match emit_scope {
        EmitScope::ViewOnly => {
            let Some(source) = source_interface else {
                ctx.report(Diagnostic::new(
                    codes::VIEW_ONLY_WITHOUT_SOURCE,
                    &[stable_id.as_str()],
                    Location::symbol(stable_id.as_str()),
                ));
                return;
            };
            let root = source.named_root().unwrap_or_default();
            if !view_roots.contains(root) {
                ctx.report(Diagnostic::new(
                    codes::VIEW_MEMBER_NOT_ON_INTERFACE,
                    &[stable_id.as_str(), root],
                    Location::symbol(stable_id.as_str()),
                ));
            }
        }
        EmitScope::Omitted => {
            // An omitted member must never have been named on a surface.
            let surface = ScopeFactory::type_base(&ty.clr_full_name)
                .surface(Side::for_static(is_static));
            if ctx.renamer.final_member_name(stable_id, &surface).is_some() {
                ctx.report(Diagnostic::new(
                    codes::OMITTED_MEMBER_EMITTED,
                    &[stable_id.as_str(), &ty.clr_full_name],
                    Location::symbol(stable_id.as_str()),
                ));
            }
        }
        EmitScope::ClassSurface => {}
    }
}
