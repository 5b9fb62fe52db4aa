use rustc_hash::{FxHashMap, FxHashSet};
use tsbindgen_common::diagnostics::codes;
use tsbindgen_gate::{LibraryContract, PhaseGate};
use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_naming::{BuildContext, reserve_graph_names};
use tsbindgen_plan::plan_emission;
use tsbindgen_shape::run_passes;

fn contract_with(types: &[(&str, &str)]) -> LibraryContract {
    let mut set = FxHashSet::default();
    let mut bindings = FxHashMap::default();
    for (clr, ts) in types {
        set.insert((*clr).to_string());
        bindings.insert((*clr).to_string(), (*ts).to_string());
    }
    LibraryContract {
        types: set,
        bindings,
    }
}

#[test]
fn references_into_the_contract_are_closed() {
    // Acme.App.Client references Acme.IO.Stream, which the contract
    // provides; no dangling reference, no overlap.
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.App.Client")
            .method("Open", |m| m.returns(fixture::named("Acme.IO.Stream"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = plan_emission(&ctx, run_passes(&ctx, graph));
    let contract = contract_with(&[("Acme.IO.Stream", "Stream")]);
    let outcome = PhaseGate::run(&ctx, &plan, Some(&contract));

    assert!(!outcome.blocked, "diagnostics: {:?}", ctx.sink.snapshot());
}

#[test]
fn overlap_with_the_contract_blocks() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.IO.Stream").method("Close", |m| m))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = plan_emission(&ctx, run_passes(&ctx, graph));
    let contract = contract_with(&[("Acme.IO.Stream", "Stream")]);
    let outcome = PhaseGate::run(&ctx, &plan, Some(&contract));

    assert!(outcome.blocked);
    assert!(ctx.sink.count_for(codes::LIBRARY_OVERLAP) > 0);
}

#[test]
fn dangling_reference_outside_contract_blocks() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.App.Client")
            .method("Open", |m| m.returns(fixture::named("Acme.IO.Stream"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = plan_emission(&ctx, run_passes(&ctx, graph));
    // Contract does not cover Acme.IO.Stream.
    let contract = contract_with(&[("Acme.Other.Thing", "Thing")]);
    let outcome = PhaseGate::run(&ctx, &plan, Some(&contract));

    assert!(outcome.blocked);
    assert!(ctx.sink.count_for(codes::LIBRARY_DANGLING_REFERENCE) > 0);
}

#[test]
fn binding_disagreement_is_reported_with_overlap() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.IO.Stream").method("Close", |m| m))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = plan_emission(&ctx, run_passes(&ctx, graph));
    let contract = contract_with(&[("Acme.IO.Stream", "LegacyStream")]);
    let outcome = PhaseGate::run(&ctx, &plan, Some(&contract));

    assert!(outcome.blocked);
    assert!(ctx.sink.count_for(codes::LIBRARY_BINDING_MISMATCH) > 0);
}

#[test]
fn builtin_references_never_dangle() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.App.Client")
            .method("Name", |m| m.returns(fixture::system("System.String"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = plan_emission(&ctx, run_passes(&ctx, graph));
    let contract = contract_with(&[]);
    let outcome = PhaseGate::run(&ctx, &plan, Some(&contract));

    assert!(!outcome.blocked, "diagnostics: {:?}", ctx.sink.snapshot());
}
