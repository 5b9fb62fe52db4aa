//! Diamond resolution.
//!
//! After interface inlining and overload completion, a type may carry
//! same-named methods with several distinct signatures gathered from
//! different sources. The configured strategy decides what survives:
//! `Error` diagnoses and leaves the graph alone, `OverloadAll` keeps the
//! whole set, `PreferDerived` keeps the signatures with the most-derived
//! provenance and drops the rest. Every conflict is recorded for the
//! emission plan regardless of strategy.

use indexmap::IndexMap;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, DiamondStrategy, Location, Severity};
use tsbindgen_model::{EmitScope, Method, Provenance, StableId, SymbolGraph};
use tsbindgen_naming::BuildContext;

/// One same-name multi-signature group found on a type.
#[derive(Clone, Debug)]
pub struct OverrideConflict {
    pub type_id: StableId,
    pub method_name: String,
    pub signature_count: usize,
    pub strategy: DiamondStrategy,
}

pub struct DiamondResolver;

/// Lower ranks are "more derived" for `PreferDerived`.
fn provenance_rank(p: Provenance) -> u8 {
    match p {
        Provenance::Declared => 0,
        Provenance::Synthesized | Provenance::DiamondResolved => 1,
        Provenance::BaseOverload | Provenance::Inherited => 2,
        Provenance::FromInterface | Provenance::ExtensionMethod => 3,
    }
}

impl DiamondResolver {
    #[must_use]
    pub fn run(ctx: &BuildContext, graph: SymbolGraph) -> (SymbolGraph, Vec<OverrideConflict>) {
        let strategy = ctx.options.diamond_strategy;
        let mut conflicts = Vec::new();
        let mut next = graph.clone();

        for ty in graph.types_sorted() {
            // Group same-named methods within the same emit scope.
            let mut groups: IndexMap<(String, EmitScope), Vec<&Method>> = IndexMap::new();
            for m in &ty.members.methods {
                groups
                    .entry((m.clr_name.clone(), m.emit_scope))
                    .or_default()
                    .push(m);
            }

            let mut drop_ids: Vec<StableId> = Vec::new();
            for ((name, _scope), methods) in &groups {
                let mut signatures: Vec<String> =
                    methods.iter().map(|m| m.canonical_signature()).collect();
                signatures.sort_unstable();
                signatures.dedup();
                if signatures.len() < 2 {
                    continue;
                }
                // Only a multi-source group is a diamond; a plain declared
                // overload set is the source platform working as intended.
                let multi_source = methods
                    .iter()
                    .any(|m| m.provenance != methods[0].provenance);
                if !multi_source {
                    continue;
                }

                conflicts.push(OverrideConflict {
                    type_id: ty.stable_id.clone(),
                    method_name: name.clone(),
                    signature_count: signatures.len(),
                    strategy,
                });

                match strategy {
                    DiamondStrategy::Error => {
                        ctx.report(
                            Diagnostic::new(
                                codes::DIAMOND_CONFLICT,
                                &[&ty.clr_full_name, name, &signatures.len().to_string()],
                                Location::symbol(ty.stable_id.as_str()),
                            )
                            .with_severity(Severity::Error),
                        );
                    }
                    DiamondStrategy::OverloadAll => {
                        ctx.report(Diagnostic::new(
                            codes::DIAMOND_RESOLVED,
                            &[&ty.clr_full_name, name, strategy.as_str()],
                            Location::symbol(ty.stable_id.as_str()),
                        ));
                    }
                    DiamondStrategy::PreferDerived => {
                        let best = methods
                            .iter()
                            .map(|m| provenance_rank(m.provenance))
                            .min()
                            .expect("non-empty group");
                        for m in methods {
                            if provenance_rank(m.provenance) > best {
                                drop_ids.push(m.stable_id.clone());
                            }
                        }
                        ctx.report(Diagnostic::new(
                            codes::DIAMOND_RESOLVED,
                            &[&ty.clr_full_name, name, strategy.as_str()],
                            Location::symbol(ty.stable_id.as_str()),
                        ));
                    }
                }
            }

            if drop_ids.is_empty() {
                continue;
            }
            next = next.with_type(&ty.stable_id, move |mut ty| {
                ty.members
                    .methods
                    .retain(|m| !drop_ids.contains(&m.stable_id));
                ty
            });
        }
        (next, conflicts)
    }
}
