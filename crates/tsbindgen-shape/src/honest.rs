//! Honest-emission planning.
//!
//! Consumes the conformance findings and produces the per-type record of
//! dropped `implements` claims. The emitter uses this to keep the
//! declaration and its metadata telling the same story: the clause omits
//! the interface, the metadata says so.

use crate::conformance::ConformanceFindings;
use indexmap::IndexMap;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_naming::BuildContext;

/// One dropped claim, as it appears in metadata.
#[derive(Clone, Debug, serde::Serialize)]
pub struct UnsatisfiableEntry {
    #[serde(rename = "interfaceClrName")]
    pub interface_clr: String,
    pub reason: String,
    #[serde(rename = "issueCount")]
    pub issue_count: usize,
}

/// Type CLR name → dropped claims.
#[derive(Debug, Default)]
pub struct HonestEmissionPlan {
    pub unsatisfiable_interfaces: IndexMap<String, Vec<UnsatisfiableEntry>>,
}

impl HonestEmissionPlan {
    #[must_use]
    pub fn entries_for(&self, type_clr_name: &str) -> &[UnsatisfiableEntry] {
        self.unsatisfiable_interfaces
            .get(type_clr_name)
            .map_or(&[], Vec::as_slice)
    }
}

pub struct HonestEmissionPlanner;

impl HonestEmissionPlanner {
    #[must_use]
    pub fn run(ctx: &BuildContext, findings: &ConformanceFindings) -> HonestEmissionPlan {
        let mut plan = HonestEmissionPlan::default();
        for claim in &findings.unsatisfiable {
            ctx.report(Diagnostic::new(
                codes::HONEST_OMISSION_RECORDED,
                &[&claim.interface_clr_name, &claim.type_clr_name],
                Location::symbol(claim.type_id.as_str()),
            ));
            plan.unsatisfiable_interfaces
                .entry(claim.type_clr_name.clone())
                .or_default()
                .push(UnsatisfiableEntry {
                    interface_clr: claim.interface_clr_name.clone(),
                    reason: claim.reason.to_string(),
                    issue_count: claim.issue_count,
                });
        }
        plan
    }
}
