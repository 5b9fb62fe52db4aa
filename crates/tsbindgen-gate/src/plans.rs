//! Plan integrity rules.
//!
//! Every stable id a plan references must exist in the graph, suppressed
//! members must exist with the claimed staticness, flattened classes must
//! really be static-only, property-override unions must not smuggle
//! foreign generic parameters, and extension buckets must target something
//! resolvable.

use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::{StableId, TypeSymbol};
use tsbindgen_naming::BuildContext;
use tsbindgen_plan::EmissionPlan;

pub(crate) fn check(ctx: &BuildContext, plan: &EmissionPlan) {
    check_static_flattening(ctx, plan);
    check_static_conflicts(ctx, plan);
    check_property_overrides(ctx, plan);
    check_extension_buckets(ctx, plan);
}

fn dangling(ctx: &BuildContext, plan_name: &str, id: &StableId) {
    ctx.report(Diagnostic::new(
        codes::PLAN_DANGLING_STABLE_ID,
        &[plan_name, id.as_str()],
        Location::symbol(id.as_str()),
    ));
}

fn check_static_flattening(ctx: &BuildContext, plan: &EmissionPlan) {
    for id in &plan.static_flattening.flatten {
        let Some(ty) = plan.graph.type_by_id(id) else {
            dangling(ctx, "static-flattening", id);
            continue;
        };
        if !ty.is_static_only() {
            ctx.report(Diagnostic::new(
                codes::FLATTEN_NOT_STATIC_ONLY,
                &[&ty.clr_full_name],
                Location::symbol(id.as_str()),
            ));
        }
    }
    for (id, inherited) in &plan.static_flattening.inherited_statics {
        let Some(ty) = plan.graph.type_by_id(id) else {
            dangling(ctx, "static-flattening", id);
            continue;
        };
        for m in &inherited.methods {
            if !ancestor_declares(&plan.graph, ty, m.stable_id.as_str()) {
                ctx.report(Diagnostic::new(
                    codes::INHERITED_STATIC_MISSING,
                    &[m.stable_id.as_str(), &ty.clr_full_name],
                    Location::symbol(m.stable_id.as_str()),
                ));
            }
        }
    }
}

fn check_static_conflicts(ctx: &BuildContext, plan: &EmissionPlan) {
    for (type_id, members) in &plan.static_conflicts.suppressed_members_by_type {
        let Some(ty) = plan.graph.type_by_id(type_id) else {
            dangling(ctx, "static-conflicts", type_id);
            continue;
        };
        for member_id in members {
            match find_member_staticness(ty, member_id) {
                None => {
                    ctx.report(Diagnostic::new(
                        codes::SUPPRESSED_MEMBER_MISSING,
                        &[member_id.as_str(), &ty.clr_full_name],
                        Location::symbol(member_id.as_str()),
                    ));
                }
                Some(false) => {
                    ctx.report(Diagnostic::new(
                        codes::SUPPRESSED_MEMBER_NOT_STATIC,
                        &[member_id.as_str(), &ty.clr_full_name],
                        Location::symbol(member_id.as_str()),
                    ));
                }
                Some(true) => {}
            }
        }
    }
}

fn check_property_overrides(ctx: &BuildContext, plan: &EmissionPlan) {
    for ((type_id, property_id), union) in &plan.property_overrides.overrides {
        let Some(ty) = plan.graph.type_by_id(type_id) else {
            dangling(ctx, "property-overrides", type_id);
            continue;
        };
        let Some(_property) = ty
            .members
            .properties
            .iter()
            .find(|p| &p.stable_id == property_id)
        else {
            ctx.report(Diagnostic::new(
                codes::OVERRIDE_TARGET_NOT_PROPERTY,
                &[property_id.as_str()],
                Location::symbol(property_id.as_str()),
            ));
            continue;
        };

        // A bare component naming a generic parameter the declaring type
        // does not own would not type-check in its declaration.
        for component in union.split(" | ") {
            let bare_param_like = component.len() <= 2
                && component.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
            let owned = ty.generic_params.iter().any(|g| g.name == component);
            let known_type = plan
                .imports
                .exports_of(&ty.namespace)
                .iter()
                .any(|e| e == component);
            if bare_param_like && !owned && !known_type {
                ctx.report(Diagnostic::new(
                    codes::OVERRIDE_UNION_BARE_PARAM,
                    &[property_id.as_str(), component],
                    Location::symbol(property_id.as_str()),
                ));
            }
        }
    }
}

fn check_extension_buckets(ctx: &BuildContext, plan: &EmissionPlan) {
    for bucket in &plan.extension_methods.buckets {
        if bucket.methods.is_empty() {
            ctx.report(Diagnostic::new(
                codes::EXTENSION_BUCKET_EMPTY,
                &[&bucket.receiver_canonical],
                Location::default(),
            ));
        }
        let resolvable = match bucket.receiver.named_root() {
            Some(full_name) => {
                ctx.typemap.is_builtin(full_name)
                    || plan.graph.resolve_full_name(full_name).is_some()
                    // External receivers are representable; the resolver
                    // sanitizes their names.
                    || full_name.contains('.')
            }
            None => bucket.receiver.contains_generic_param(),
        };
        if !resolvable {
            ctx.report(Diagnostic::new(
                codes::EXTENSION_TARGET_UNKNOWN,
                &[&bucket.receiver_canonical],
                Location::default(),
            ));
        }
    }
}

fn ancestor_declares(
    graph: &tsbindgen_model::SymbolGraph,
    ty: &TypeSymbol,
    member_id: &str,
) -> bool {
    let mut current = in_graph_base(graph, ty);
    while let Some(ancestor) = current {
        if ancestor
            .members
            .stable_ids()
            .iter()
            .any(|id| id.as_str() == member_id)
        {
            return true;
        }
        current = in_graph_base(graph, ancestor);
    }
    false
}

fn in_graph_base<'g>(
    graph: &'g tsbindgen_model::SymbolGraph,
    ty: &TypeSymbol,
) -> Option<&'g TypeSymbol> {
    match ty.base.as_ref()? {
        tsbindgen_model::TypeReference::Named { full_name, .. } => {
            graph.resolve_full_name(full_name)
        }
        _ => None,
    }
}

fn find_member_staticness(ty: &TypeSymbol, member_id: &StableId) -> Option<bool> {
    if let Some(m) = ty.members.methods.iter().find(|m| &m.stable_id == member_id) {
        return Some(m.is_static());
    }
    if let Some(p) = ty
        .members
        .properties
        .iter()
        .find(|p| &p.stable_id == member_id)
    {
        return Some(p.is_static());
    }
    if let Some(f) = ty.members.fields.iter().find(|f| &f.stable_id == member_id) {
        return Some(f.is_static());
    }
    None
}
