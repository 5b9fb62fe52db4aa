//! Reference and import rules.
//!
//! Every foreign type a public signature mentions must be built-in, local,
//! imported, or genuinely external; every import must be backed by an
//! export on the other side; heritage references must travel on value
//! imports; and no import cycle may survive outside a bucket.

use rustc_hash::FxHashSet;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::Visibility;
use tsbindgen_naming::BuildContext;
use tsbindgen_plan::{EmissionPlan, ReferenceSet, collect_type_references};

pub(crate) fn check(ctx: &BuildContext, plan: &EmissionPlan) {
    let mut ns_names: Vec<String> = plan
        .graph
        .namespaces()
        .iter()
        .map(|n| n.name.clone())
        .collect();
    ns_names.sort_unstable();

    for ns_name in &ns_names {
        let mut refs = ReferenceSet::default();
        let mut types = plan.graph.types_in(ns_name);
        types.sort_by(|a, b| a.stable_id.cmp(&b.stable_id));
        for ty in &types {
            if ty.visibility == Visibility::Public {
                collect_type_references(ty, &mut refs);
            }
        }

        let imported: FxHashSet<&str> = plan
            .imports
            .imports_of(ns_name)
            .iter()
            .flat_map(|ni| ni.types.iter())
            .map(|ti| ti.clr_full_name.as_str())
            .collect();

        for clr_full in &refs.order {
            if ctx.typemap.is_builtin(clr_full) {
                continue;
            }
            let Some(target) = plan.graph.resolve_full_name(clr_full) else {
                // External: the resolver sanitizes; nothing to import.
                continue;
            };
            if &target.namespace == ns_name {
                continue;
            }
            // Intra-bucket references need no import statement.
            if plan.scc_buckets.same_bucket(ns_name, &target.namespace) && imported.contains(clr_full.as_str()) {
                continue;
            }
            if !imported.contains(clr_full.as_str()) {
                ctx.report(Diagnostic::new(
                    codes::FOREIGN_TYPE_UNIMPORTED,
                    &[clr_full, ns_name],
                    Location::namespace(ns_name.clone()),
                ));
                continue;
            }
            // Heritage references must be value imports.
            let value_position = refs.value_position.get(clr_full).copied().unwrap_or(false);
            if value_position
                && plan
                    .imports
                    .qualified_value_name(ns_name, clr_full)
                    .is_none()
            {
                ctx.report(Diagnostic::new(
                    codes::HERITAGE_NOT_VALUE_IMPORT,
                    &[clr_full, ns_name],
                    Location::namespace(ns_name.clone()),
                ));
            }
        }

        // Imports are exported on the other side, and no self-imports.
        for ni in plan.imports.imports_of(ns_name) {
            if &ni.target_namespace == ns_name {
                ctx.report(Diagnostic::new(
                    codes::SELF_IMPORT,
                    &[ns_name],
                    Location::namespace(ns_name.clone()),
                ));
                continue;
            }
            let exports = plan.imports.exports_of(&ni.target_namespace);
            for ti in &ni.types {
                if !exports.contains(&ti.type_name) {
                    ctx.report(Diagnostic::new(
                        codes::IMPORT_NOT_EXPORTED,
                        &[&ti.type_name, &ni.target_namespace],
                        Location::namespace(ns_name.clone()),
                    ));
                }
            }
        }

        // Pre-resolved qualified references resolve to exports.
        for ((from_ns, _clr), qualified) in &plan.imports.value_import_qualified_names {
            if from_ns != ns_name {
                continue;
            }
            let Some((_alias, name)) = qualified.split_once('.') else {
                ctx.report(Diagnostic::new(
                    codes::QUALIFIED_EXPORT_UNRESOLVED,
                    &[qualified],
                    Location::namespace(ns_name.clone()),
                ));
                continue;
            };
            let base_name = name.strip_suffix("$instance").unwrap_or(name);
            let resolves = plan
                .imports
                .namespace_exports
                .values()
                .any(|exports| exports.iter().any(|e| e == base_name || e == name));
            if !resolves {
                ctx.report(Diagnostic::new(
                    codes::QUALIFIED_EXPORT_UNRESOLVED,
                    &[qualified],
                    Location::namespace(ns_name.clone()),
                ));
            }
        }
    }

    // Any two-way import between namespaces must have been bucketed.
    for ns_name in &ns_names {
        for ni in plan.imports.imports_of(ns_name) {
            let back = plan
                .imports
                .imports_of(&ni.target_namespace)
                .iter()
                .any(|other| &other.target_namespace == ns_name);
            if back && !plan.scc_buckets.same_bucket(ns_name, &ni.target_namespace) {
                ctx.report(Diagnostic::new(
                    codes::IMPORT_CYCLE_UNBUCKETED,
                    &[ns_name, &ni.target_namespace],
                    Location::namespace(ns_name.clone()),
                ));
            }
        }
    }
}
