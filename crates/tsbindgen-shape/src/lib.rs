//! Graph rewrite passes.
//!
//! Each pass is a pure function from `(BuildContext, SymbolGraph)` to a new
//! graph or a plan. Passes execute in a fixed order; iteration inside every
//! pass is sorted by stable id or CLR name so two runs produce bit-equal
//! output. A pass that detects broken preconditions reports a diagnostic
//! and returns its input unchanged rather than a half-rewritten graph.

use tsbindgen_model::SymbolGraph;
use tsbindgen_naming::BuildContext;

pub mod interface_inliner;
pub use interface_inliner::InterfaceInliner;

pub mod base_overloads;
pub use base_overloads::BaseOverloadAdder;

pub mod static_flatten;
pub use static_flatten::{InheritedStatics, StaticFlatteningPlan, StaticHierarchyFlattener};

pub mod static_conflicts;
pub use static_conflicts::{StaticConflictDetector, StaticConflictPlan};

pub mod property_override;
pub use property_override::{PropertyOverridePlan, PropertyOverrideUnifier};

pub mod conformance;
pub use conformance::{ConformanceFindings, StructuralConformance, UnsatisfiableClaim};

pub mod diamond;
pub use diamond::{DiamondResolver, OverrideConflict};

pub mod extensions;
pub use extensions::{ExtensionBucket, ExtensionBucketPlan, ExtensionBucketing};

pub mod honest;
pub use honest::{HonestEmissionPlan, HonestEmissionPlanner, UnsatisfiableEntry};

/// A pass that rewrites the graph.
pub trait ShapePass {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &BuildContext, graph: &SymbolGraph) -> SymbolGraph;
}

/// Everything the shape phase hands to the planners.
#[derive(Debug)]
pub struct ShapeOutcome {
    pub graph: SymbolGraph,
    pub static_flattening: StaticFlatteningPlan,
    pub static_conflicts: StaticConflictPlan,
    pub property_overrides: PropertyOverridePlan,
    pub override_conflicts: Vec<OverrideConflict>,
    pub conformance: ConformanceFindings,
    pub extensions: ExtensionBucketPlan,
    pub honest_emission: HonestEmissionPlan,
}

/// Run every pass in the canonical order.
pub fn run_passes(ctx: &BuildContext, graph: SymbolGraph) -> ShapeOutcome {
    let graph = run_checked(ctx, &InterfaceInliner, graph);
    let graph = run_checked(ctx, &BaseOverloadAdder, graph);

    let static_flattening = StaticHierarchyFlattener::run(ctx, &graph);
    let static_conflicts = StaticConflictDetector::run(ctx, &graph);
    let property_overrides = PropertyOverrideUnifier::run(ctx, &graph);

    let (graph, conformance) = StructuralConformance::run(ctx, graph);
    debug_assert!(graph.check_invariants().is_empty());

    let (graph, override_conflicts) = DiamondResolver::run(ctx, graph);
    debug_assert!(graph.check_invariants().is_empty());
    let extensions = ExtensionBucketing::run(ctx, &graph);
    let honest_emission = HonestEmissionPlanner::run(ctx, &conformance);

    ShapeOutcome {
        graph,
        static_flattening,
        static_conflicts,
        property_overrides,
        override_conflicts,
        conformance,
        extensions,
        honest_emission,
    }
}

fn run_checked(ctx: &BuildContext, pass: &dyn ShapePass, graph: SymbolGraph) -> SymbolGraph {
    let span = tracing::debug_span!("shape_pass", pass = pass.name());
    let _guard = span.enter();
    let next = pass.run(ctx, &graph);
    debug_assert!(
        next.check_invariants().is_empty(),
        "pass '{}' broke graph invariants: {:?}",
        pass.name(),
        next.check_invariants()
    );
    next
}
