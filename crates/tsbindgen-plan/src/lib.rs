//! Emission planning.
//!
//! Planners consume the rewritten graph and the shape plans and produce
//! the [`EmissionPlan`] the phase gate validates and the emitter consumes.
//! Planners surface diagnostics for ambiguity but always proceed with a
//! best-effort plan, so the gate sees the full picture.

pub mod imports;
pub use imports::{
    ImportPlan, ImportPlanner, NamespaceImport, ReferenceSet, TypeImport, collect_type_references,
};

pub mod scc;
pub use scc::{SccBucket, SccBuckets};

pub mod resolver;
pub use resolver::TypeNameResolver;

pub mod emission;
pub use emission::{EmissionPlan, plan_emission};
