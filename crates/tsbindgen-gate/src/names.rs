//! Name rules.
//!
//! Validates the renamer's reservation snapshot: names are non-empty and
//! unique per scope, scope strings belong to the closed grammar, member
//! reservations landed on surface scopes, the derived `$instance` /
//! `__…$views` forms were never reserved directly, and no rename suffix
//! leaked into the CLR-name contract.

use rustc_hash::FxHashMap;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_naming::{BuildContext, ScopeForm};
use tsbindgen_plan::EmissionPlan;

pub(crate) fn check(ctx: &BuildContext, plan: &EmissionPlan) {
    let reservations = ctx.renamer.reservations();

    // Uniqueness per scope.
    let mut by_scope: FxHashMap<(&str, &str), &str> = FxHashMap::default();
    for r in &reservations {
        if r.final_name.is_empty() {
            ctx.report(Diagnostic::new(
                codes::EMPTY_FINAL_NAME,
                &[r.stable_id.as_str(), r.scope.as_str()],
                Location::symbol(r.stable_id.as_str()).with_scope(r.scope.as_str()),
            ));
        }
        if let Some(previous) = by_scope.insert(
            (r.scope.as_str(), r.final_name.as_str()),
            r.stable_id.as_str(),
        ) && previous != r.stable_id.as_str()
        {
            ctx.report(Diagnostic::new(
                codes::DUPLICATE_FINAL_NAME,
                &[r.scope.as_str(), &r.final_name],
                Location::symbol(r.stable_id.as_str()).with_scope(r.scope.as_str()),
            ));
        }

        match r.scope.form() {
            ScopeForm::Unknown => {
                ctx.report(Diagnostic::new(
                    codes::UNKNOWN_SCOPE_FORM,
                    &[r.scope.as_str()],
                    Location::scope(r.scope.as_str()),
                ));
            }
            // Member ids must sit in surface scopes; the renamer derives
            // them from base scopes at reservation time.
            ScopeForm::TypeBase | ScopeForm::ViewBase => {
                ctx.report(Diagnostic::new(
                    codes::SCOPE_KIND_MISMATCH,
                    &[r.stable_id.as_str(), r.scope.as_str()],
                    Location::symbol(r.stable_id.as_str()).with_scope(r.scope.as_str()),
                ));
            }
            _ => {}
        }

        // The alias/instance pattern is derived, never reserved.
        if r.final_name.contains("$instance") || r.final_name.contains("$views") {
            ctx.report(Diagnostic::new(
                codes::ALIAS_INSTANCE_MISMATCH,
                &[r.stable_id.as_str(), &r.preferred, &r.final_name],
                Location::symbol(r.stable_id.as_str()).with_scope(r.scope.as_str()),
            ));
        }
    }

    // CLR-name contract: the metadata reports CLR names, which must never
    // carry a rename suffix the renamer introduced.
    for r in &reservations {
        if r.final_name != r.preferred
            && r.stable_id.is_member()
            && member_clr_name_matches(plan, r.stable_id.as_str(), &r.final_name)
        {
            ctx.report(Diagnostic::new(
                codes::NUMERIC_SUFFIX_LEAK,
                &[&r.final_name],
                Location::symbol(r.stable_id.as_str()),
            ));
        }
    }
}

fn member_clr_name_matches(plan: &EmissionPlan, member_id: &str, name: &str) -> bool {
    for ty in plan.graph.types_sorted() {
        for m in &ty.members.methods {
            if m.stable_id.as_str() == member_id {
                return m.clr_name == name;
            }
        }
        for p in &ty.members.properties {
            if p.stable_id.as_str() == member_id {
                return p.clr_name == name;
            }
        }
    }
    false
}
