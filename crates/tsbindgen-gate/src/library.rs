//! Library-mode rules.
//!
//! When a prior output directory is supplied as a contract, the current
//! run emits only what the contract lacks. The gate enforces closure:
//! emitted and contract sets are disjoint, every reference of the emitted
//! subset lands in the emitted set, the contract, or the builtins, and
//! bindings agree with the emitted surface.

use rustc_hash::{FxHashMap, FxHashSet};
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::Visibility;
use tsbindgen_naming::BuildContext;
use tsbindgen_plan::{EmissionPlan, ReferenceSet, collect_type_references};

/// The prior package's surface, as loaded from its bindings files.
#[derive(Clone, Debug, Default)]
pub struct LibraryContract {
    /// CLR full names the contract covers.
    pub types: FxHashSet<String>,
    /// CLR full name → target-side emitted name, for consistency checks.
    pub bindings: FxHashMap<String, String>,
}

impl LibraryContract {
    #[must_use]
    pub fn contains(&self, clr_full_name: &str) -> bool {
        self.types.contains(clr_full_name)
    }
}

pub(crate) fn check(ctx: &BuildContext, plan: &EmissionPlan, contract: &LibraryContract) {
    let mut emitted: FxHashSet<&str> = FxHashSet::default();
    for ty in plan.graph.types_sorted() {
        if ty.visibility == Visibility::Public {
            emitted.insert(ty.clr_full_name.as_str());
        }
    }

    for ty in plan.graph.types_sorted() {
        if ty.visibility != Visibility::Public {
            continue;
        }

        // Disjointness: emitted ∩ contract = ∅.
        if contract.contains(&ty.clr_full_name) {
            ctx.report(Diagnostic::new(
                codes::LIBRARY_OVERLAP,
                &[&ty.clr_full_name],
                Location::symbol(ty.stable_id.as_str()),
            ));
            // Binding consistency against the contract's claim.
            if let (Some(contract_name), Some(our_name)) = (
                contract.bindings.get(&ty.clr_full_name),
                ctx.renamer.final_type_name(ty),
            ) && contract_name != &our_name
            {
                ctx.report(Diagnostic::new(
                    codes::LIBRARY_BINDING_MISMATCH,
                    &[
                        &ty.clr_full_name,
                        &format!("contract says '{contract_name}', emission says '{our_name}'"),
                    ],
                    Location::symbol(ty.stable_id.as_str()),
                ));
            }
        }

        // Closure: references(emitted) ⊆ emitted ∪ contract ∪ builtins.
        let mut refs = ReferenceSet::default();
        collect_type_references(ty, &mut refs);
        for clr_full in &refs.order {
            if ctx.typemap.is_builtin(clr_full)
                || emitted.contains(clr_full.as_str())
                || contract.contains(clr_full)
            {
                continue;
            }
            ctx.report(Diagnostic::new(
                codes::LIBRARY_DANGLING_REFERENCE,
                &[&ty.clr_full_name, clr_full],
                Location::symbol(ty.stable_id.as_str()),
            ));
        }
    }
}
