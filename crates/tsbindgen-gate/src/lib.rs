//! The phase gate.
//!
//! PhaseGate consumes the full emission plan and validates every
//! cross-cutting invariant before any output is written. It never rewrites
//! anything: rule families push diagnostics through the shared sink, the
//! gate aggregates, and the outcome says whether emission may proceed.
//!
//! Blocking policy: errors always block; warnings block under strict mode
//! unless the policy table lists their code as informational (unknown
//! codes are forbidden); info never blocks.

use tracing::debug;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location, Severity};
use tsbindgen_naming::BuildContext;
use tsbindgen_plan::EmissionPlan;

mod names;
mod integrity;
mod plans;
mod references;
mod surface;

pub mod library;
pub use library::LibraryContract;

pub mod summary;
pub use summary::{DiagnosticCount, ValidationSummary, render_summary_table};

/// The gate's verdict.
#[derive(Debug)]
pub struct GateOutcome {
    /// True when emission must not proceed.
    pub blocked: bool,
    pub summary: ValidationSummary,
}

pub struct PhaseGate;

impl PhaseGate {
    /// Validate the plan. `contract` is present in library mode.
    #[must_use]
    pub fn run(
        ctx: &BuildContext,
        plan: &EmissionPlan,
        contract: Option<&LibraryContract>,
    ) -> GateOutcome {
        names::check(ctx, plan);
        integrity::check(ctx, plan);
        plans::check(ctx, plan);
        references::check(ctx, plan);
        surface::check(ctx, plan);
        if let Some(contract) = contract {
            library::check(ctx, plan, contract);
        }

        // Strict mode promotes forbidden warnings into blocking errors.
        if ctx.policy.is_strict() {
            for code in ctx.sink.codes_at(Severity::Warning) {
                if ctx.policy.blocks(code) {
                    ctx.report(Diagnostic::new(
                        codes::STRICT_MODE_VIOLATION,
                        &[&code.to_string()],
                        Location::default(),
                    ));
                }
            }
        }

        let errors = ctx.sink.error_count();
        let blocked = errors > 0;
        if blocked {
            ctx.report(Diagnostic::new(
                codes::EMISSION_HALTED,
                &[&errors.to_string()],
                Location::default(),
            ));
        }
        debug!(errors, blocked, "phase gate finished");

        GateOutcome {
            blocked,
            summary: ValidationSummary::from_sink(&ctx.sink),
        }
    }
}
