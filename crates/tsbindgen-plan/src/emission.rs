//! Emission-plan assembly.
//!
//! Collects the rewritten graph, the shape plans, the import plan, and the
//! SCC buckets into the one value the phase gate validates and the emitter
//! consumes.

use crate::imports::{ImportPlan, ImportPlanner};
use crate::scc::SccBuckets;
use tracing::debug;
use tsbindgen_model::SymbolGraph;
use tsbindgen_naming::{BuildContext, reserve_member_names};
use tsbindgen_shape::{
    ExtensionBucketPlan, HonestEmissionPlan, OverrideConflict, PropertyOverridePlan, ShapeOutcome,
    StaticConflictPlan, StaticFlatteningPlan,
};

#[derive(Debug)]
pub struct EmissionPlan {
    pub graph: SymbolGraph,
    pub imports: ImportPlan,
    pub scc_buckets: SccBuckets,
    pub static_flattening: StaticFlatteningPlan,
    pub static_conflicts: StaticConflictPlan,
    pub override_conflicts: Vec<OverrideConflict>,
    pub property_overrides: PropertyOverridePlan,
    pub extension_methods: ExtensionBucketPlan,
    pub honest_emission: HonestEmissionPlan,
}

/// Build the emission plan from the shape outcome. Member names are
/// reserved here: the shape passes have finished deciding which members
/// exist and on which surface.
#[must_use]
pub fn plan_emission(ctx: &BuildContext, outcome: ShapeOutcome) -> EmissionPlan {
    reserve_member_names(ctx, &outcome.graph);

    let imports = ImportPlanner::run(ctx, &outcome.graph, &outcome.extensions);
    let scc_buckets = SccBuckets::compute(&imports);
    debug!(
        namespaces = imports.namespace_imports.len(),
        buckets = scc_buckets.buckets.len(),
        "assembled emission plan"
    );

    EmissionPlan {
        graph: outcome.graph,
        imports,
        scc_buckets,
        static_flattening: outcome.static_flattening,
        static_conflicts: outcome.static_conflicts,
        override_conflicts: outcome.override_conflicts,
        property_overrides: outcome.property_overrides,
        extension_methods: outcome.extensions,
        honest_emission: outcome.honest_emission,
    }
}
