//! Public-API surface and generic-arity rules.
//!
//! Public types must not expose non-public or unemitted types in any
//! position; use-site generic arity must match declarations; primitive
//! generic arguments must be covered by the lift table; enum underlying
//! types must map to built-ins; no placeholder reference may survive.

use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::{TypeReference, TypeSymbol, Visibility};
use tsbindgen_naming::BuildContext;
use tsbindgen_plan::EmissionPlan;

pub(crate) fn check(ctx: &BuildContext, plan: &EmissionPlan) {
    for ty in plan.graph.types_sorted() {
        if ty.visibility != Visibility::Public {
            continue;
        }
        let walk = |reference: &TypeReference, position: &str| {
            check_reference(ctx, plan, ty, reference, position);
        };

        if let Some(base) = &ty.base {
            walk(base, "base");
        }
        for iface in &ty.interfaces {
            walk(iface, "implements");
        }
        for gp in &ty.generic_params {
            for c in &gp.constraints {
                walk(c, "constraint");
            }
        }
        for m in &ty.members.methods {
            if m.visibility != Visibility::Public {
                continue;
            }
            for p in &m.params {
                walk(&p.ty, "signature");
            }
            walk(&m.return_type, "signature");
        }
        for p in &ty.members.properties {
            if p.visibility != Visibility::Public {
                continue;
            }
            walk(&p.property_type, "property type");
            for ip in &p.index_params {
                walk(&ip.ty, "signature");
            }
        }
        for f in &ty.members.fields {
            if f.visibility == Visibility::Public {
                walk(&f.field_type, "field type");
            }
        }
        for e in &ty.members.events {
            if e.visibility == Visibility::Public {
                walk(&e.handler_type, "event type");
            }
        }
        for c in &ty.members.constructors {
            if c.visibility == Visibility::Public {
                for p in &c.params {
                    walk(&p.ty, "signature");
                }
            }
        }
        if let Some(sig) = &ty.delegate_signature {
            for p in &sig.params {
                walk(&p.ty, "signature");
            }
            walk(&sig.return_type, "signature");
        }

        if ty.kind == tsbindgen_model::TypeKind::Enum
            && let Some(underlying) = &ty.enum_underlying
        {
            let mapped = underlying
                .named_root()
                .is_some_and(|n| ctx.typemap.try_map_builtin(n).is_some());
            if !mapped {
                ctx.report(Diagnostic::new(
                    codes::ENUM_UNDERLYING_UNMAPPED,
                    &[&ty.clr_full_name, &underlying.canonical_key()],
                    Location::symbol(ty.stable_id.as_str()),
                ));
            }
        }
    }
}

fn check_reference(
    ctx: &BuildContext,
    plan: &EmissionPlan,
    ty: &TypeSymbol,
    reference: &TypeReference,
    position: &str,
) {
    if reference.contains_placeholder() {
        ctx.report(Diagnostic::new(
            codes::PLACEHOLDER_ESCAPED,
            &[&ty.clr_full_name],
            Location::symbol(ty.stable_id.as_str()),
        ));
        return;
    }
    walk_named(ctx, plan, ty, reference, position);
}

fn walk_named(
    ctx: &BuildContext,
    plan: &EmissionPlan,
    ty: &TypeSymbol,
    reference: &TypeReference,
    position: &str,
) {
    match reference {
        TypeReference::Named {
            full_name,
            type_args,
            ..
        } => {
            if let Some(target) = plan.graph.resolve_full_name(full_name) {
                if target.visibility != Visibility::Public {
                    ctx.report(Diagnostic::new(
                        codes::PUBLIC_API_NON_PUBLIC,
                        &[&ty.clr_full_name, full_name, position],
                        Location::symbol(ty.stable_id.as_str()),
                    ));
                }
                if ctx.renamer.final_type_name(target).is_none() {
                    ctx.report(Diagnostic::new(
                        codes::PUBLIC_API_UNEMITTED,
                        &[&ty.clr_full_name, full_name, position],
                        Location::symbol(ty.stable_id.as_str()),
                    ));
                }
                if target.arity() != type_args.len() {
                    ctx.report(Diagnostic::new(
                        codes::GENERIC_ARITY_MISMATCH,
                        &[
                            full_name,
                            &type_args.len().to_string(),
                            &target.arity().to_string(),
                        ],
                        Location::symbol(ty.stable_id.as_str()),
                    ));
                }
            } else if let Some(declared) = declared_arity(full_name)
                && declared != type_args.len()
            {
                ctx.report(Diagnostic::new(
                    codes::GENERIC_ARITY_MISMATCH,
                    &[
                        full_name,
                        &type_args.len().to_string(),
                        &declared.to_string(),
                    ],
                    Location::symbol(ty.stable_id.as_str()),
                ));
            }

            // Primitive arguments of non-graph containers need lift rules.
            let in_graph = plan.graph.resolve_full_name(full_name).is_some();
            for (position_index, arg) in type_args.iter().enumerate() {
                let primitive = arg
                    .named_root()
                    .is_some_and(|n| ctx.typemap.is_primitive(n));
                if primitive && !in_graph {
                    let covered = ctx.lift.covers(
                        full_name,
                        u16::try_from(position_index).unwrap_or(u16::MAX),
                    );
                    if !covered {
                        ctx.report(Diagnostic::new(
                            codes::PRIMITIVE_LIFT_UNCOVERED,
                            &[arg.named_root().unwrap_or("?"), full_name],
                            Location::symbol(ty.stable_id.as_str()),
                        ));
                    }
                }
                walk_named(ctx, plan, ty, arg, position);
            }
        }
        TypeReference::Nested {
            outer, type_args, ..
        } => {
            walk_named(ctx, plan, ty, outer, position);
            for arg in type_args {
                walk_named(ctx, plan, ty, arg, position);
            }
        }
        TypeReference::Array { element, .. } => walk_named(ctx, plan, ty, element, position),
        TypeReference::Pointer { pointee } => walk_named(ctx, plan, ty, pointee, position),
        TypeReference::ByRef { referent } => walk_named(ctx, plan, ty, referent, position),
        TypeReference::GenericParam { .. } | TypeReference::Placeholder => {}
    }
}

/// CLR spelling carries declared arity in the backtick suffix.
fn declared_arity(full_name: &str) -> Option<usize> {
    let (_, suffix) = full_name.rsplit_once('`')?;
    suffix.parse().ok()
}
