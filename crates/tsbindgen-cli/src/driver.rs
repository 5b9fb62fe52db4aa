//! The generate driver.
//!
//! Wires the pipeline: load → namespace filter → reserve names → shape
//! passes → planners → phase gate → emit. Cancellation, when provided by
//! the embedding process, is honored between stages, never inside one.

use crate::args::GenerateArgs;
use crate::loader::GraphJsonLoader;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{BuildOptions, Diagnostic, Location, StrictPolicy};
use tsbindgen_emit::{Emitter, PackageEmitter, load_contract, write_summary};
use tsbindgen_gate::{PhaseGate, ValidationSummary, render_summary_table};
use tsbindgen_model::{LoadError, MetadataLoader, SymbolGraph};
use tsbindgen_naming::{BuildContext, reserve_graph_names};
use tsbindgen_plan::plan_emission;
use tsbindgen_shape::run_passes;

/// Process exit codes of the `generate` sub-command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    EmissionFailure,
    MissingInputs,
    UnreachableInputs,
}

impl ExitCode {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::EmissionFailure => 1,
            Self::MissingInputs => 2,
            Self::UnreachableInputs => 3,
        }
    }
}

/// Run `generate`. Returns the exit code; diagnostics and the validation
/// summary are written to the output directory even on halt.
pub fn run_generate(args: &GenerateArgs, cancel: Option<&AtomicBool>) -> ExitCode {
    let inputs = match resolve_inputs(args) {
        Ok(inputs) => inputs,
        Err(code) => return code,
    };

    let options = BuildOptions {
        transforms: args.transforms(),
        diamond_strategy: Default::default(),
        reserved_words: Default::default(),
        namespace_filter: args.namespaces.clone(),
        library_contract: args.library_contract.clone(),
    };
    let ctx = BuildContext::new(options, StrictPolicy::new(args.strict));

    let loader = GraphJsonLoader::new();
    let graph = match loader.load(&inputs) {
        Ok(graph) => graph,
        Err(err) => {
            ctx.report(err.to_diagnostic());
            error!("{err}");
            return match err {
                LoadError::EmptyInputSet => ExitCode::MissingInputs,
                LoadError::NotFound(_) | LoadError::Unreadable(..) => ExitCode::UnreachableInputs,
                LoadError::Malformed(..) => ExitCode::EmissionFailure,
            };
        }
    };

    let contract = match args.library_contract.as_deref() {
        Some(path) => match load_contract(path) {
            Ok(contract) => Some(contract),
            Err(why) => {
                ctx.report(Diagnostic::new(
                    codes::LIBRARY_CONTRACT_UNREADABLE,
                    &[&path.display().to_string(), &why],
                    Location::default(),
                ));
                None
            }
        },
        None => None,
    };

    let graph = apply_namespace_filter(&ctx, graph);
    // Library mode emits only the subset the contract does not cover.
    let graph = match contract.as_ref() {
        Some(contract) => apply_contract_filter(graph, contract),
        None => graph,
    };
    info!(types = graph.type_count(), "loaded symbol graph");

    if cancelled(&ctx, cancel, "load") {
        return ExitCode::EmissionFailure;
    }

    reserve_graph_names(&ctx, &graph);
    let outcome = run_passes(&ctx, graph);
    if cancelled(&ctx, cancel, "shape") {
        return ExitCode::EmissionFailure;
    }

    let plan = plan_emission(&ctx, outcome);
    if cancelled(&ctx, cancel, "plan") {
        return ExitCode::EmissionFailure;
    }

    let gate = PhaseGate::run(&ctx, &plan, contract.as_ref());
    print_summary(&gate.summary);
    if let Err(err) = write_summary(&args.out, &gate.summary) {
        error!("failed to write validation summary: {err}");
    }

    if gate.blocked {
        error!("validation failed; emission aborted");
        return ExitCode::EmissionFailure;
    }

    match PackageEmitter.emit(&ctx, &plan, &args.out) {
        Ok(()) => {
            info!(out = %args.out.display(), "done");
            ExitCode::Success
        }
        Err(err) => {
            error!("{err}");
            ExitCode::EmissionFailure
        }
    }
}

fn resolve_inputs(args: &GenerateArgs) -> Result<Vec<PathBuf>, ExitCode> {
    let mut inputs = args.assemblies.clone();
    if let Some(dir) = &args.assembly_dir {
        match scan_assembly_dir(dir) {
            Ok(found) => inputs.extend(found),
            Err(err) => {
                error!("{err:#}");
                return Err(ExitCode::UnreachableInputs);
            }
        }
    }
    if inputs.is_empty() {
        error!("no input assemblies were provided");
        return Err(ExitCode::MissingInputs);
    }
    for path in &inputs {
        if !path.exists() {
            error!("input '{}' is unreachable", path.display());
            return Err(ExitCode::UnreachableInputs);
        }
    }
    Ok(inputs)
}

fn scan_assembly_dir(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    anyhow::ensure!(dir.is_dir(), "assembly directory '{}' is unreachable", dir.display());
    let mut found = Vec::new();
    for entry in walkdir::WalkDir::new(dir).max_depth(1) {
        let entry =
            entry.with_context(|| format!("scanning assembly directory '{}'", dir.display()))?;
        let path = entry.into_path();
        if path.extension().is_some_and(|ext| ext == "json") {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

fn apply_namespace_filter(ctx: &BuildContext, graph: SymbolGraph) -> SymbolGraph {
    if ctx.options.namespace_filter.is_empty() {
        return graph;
    }
    let mut filtered = SymbolGraph::new();
    for ns in graph.namespaces() {
        if !ctx.options.namespace_filter.contains(&ns.name) {
            continue;
        }
        for ty in graph.types_in(&ns.name) {
            filtered.add_type(ty.clone());
        }
    }
    if filtered.is_empty() && !graph.is_empty() {
        ctx.report(Diagnostic::new(
            codes::NAMESPACE_FILTER_EMPTY,
            &[],
            Location::default(),
        ));
    }
    debug!(
        kept = filtered.type_count(),
        dropped = graph.type_count() - filtered.type_count(),
        "applied namespace filter"
    );
    filtered
}

/// Drop every type the contract already covers; references to them stay
/// and must close against the contract (the gate checks).
fn apply_contract_filter(
    graph: SymbolGraph,
    contract: &tsbindgen_gate::LibraryContract,
) -> SymbolGraph {
    let mut filtered = SymbolGraph::new();
    let mut dropped = 0usize;
    for ns in graph.namespaces() {
        for ty in graph.types_in(&ns.name) {
            if contract.contains(&ty.clr_full_name) {
                dropped += 1;
                continue;
            }
            filtered.add_type(ty.clone());
        }
    }
    if dropped > 0 {
        debug!(dropped, "contract filter removed already-covered types");
    }
    filtered
}

fn cancelled(ctx: &BuildContext, cancel: Option<&AtomicBool>, stage: &str) -> bool {
    let hit = cancel.is_some_and(|c| c.load(Ordering::Relaxed));
    if hit {
        ctx.report(Diagnostic::new(
            codes::RUN_CANCELLED,
            &[stage],
            Location::default(),
        ));
        info!(stage, "run cancelled");
    }
    hit
}

fn print_summary(summary: &ValidationSummary) {
    // The summary table is operator-facing output, not logging.
    #[allow(clippy::print_stderr)]
    {
        eprintln!("{}", render_summary_table(summary));
    }
}
