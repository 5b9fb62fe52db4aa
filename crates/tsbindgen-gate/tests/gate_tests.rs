use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{BuildOptions, StrictPolicy};
use tsbindgen_gate::PhaseGate;
use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_model::{StableId, SymbolGraph};
use tsbindgen_naming::{BuildContext, reserve_graph_names};
use tsbindgen_plan::{EmissionPlan, plan_emission};
use tsbindgen_shape::run_passes;

fn plan_for(ctx: &BuildContext, graph: SymbolGraph) -> EmissionPlan {
    reserve_graph_names(ctx, &graph);
    let outcome = run_passes(ctx, graph);
    plan_emission(ctx, outcome)
}

fn healthy_graph() -> SymbolGraph {
    GraphBuilder::new()
        .ty(TypeBuilder::interface("Acme.Data.IReader").method("Read", |m| {
            m.returns(fixture::system("System.Int32"))
        }))
        .ty(TypeBuilder::class("Acme.Data.Reader")
            .implements(fixture::named("Acme.Data.IReader"))
            .method("Read", |m| m.returns(fixture::system("System.Int32")))
            .method("Close", |m| m))
        .ty(TypeBuilder::class("Acme.App.Tool")
            .method("Open", |m| m.returns(fixture::named("Acme.Data.Reader"))))
        .build()
}

#[test]
fn healthy_plan_passes_the_gate() {
    let ctx = BuildContext::for_tests();
    let plan = plan_for(&ctx, healthy_graph());
    let outcome = PhaseGate::run(&ctx, &plan, None);

    assert!(!outcome.blocked, "diagnostics: {:?}", ctx.sink.snapshot());
    assert_eq!(outcome.summary.errors, 0);
}

#[test]
fn view_only_member_without_source_interface_blocks() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.C").method("M", |m| m))
        .build();
    let id = StableId::type_id(fixture::TEST_ASSEMBLY, "Acme.C");
    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let outcome_graph = run_passes(&ctx, graph);
    // Corrupt the rewritten graph the way a buggy pass would.
    let broken = outcome_graph.graph.with_type(&id, |mut ty| {
        ty.members.methods[0].emit_scope = tsbindgen_model::EmitScope::ViewOnly;
        ty
    });
    let outcome = run_broken(&ctx, broken, outcome_graph);
    assert!(outcome.blocked);
    assert!(ctx.sink.count_for(codes::VIEW_ONLY_WITHOUT_SOURCE) > 0);
}

fn run_broken(
    ctx: &BuildContext,
    broken: SymbolGraph,
    mut outcome: tsbindgen_shape::ShapeOutcome,
) -> tsbindgen_gate::GateOutcome {
    outcome.graph = broken;
    let plan = plan_emission(ctx, outcome);
    PhaseGate::run(ctx, &plan, None)
}

#[test]
fn dangling_plan_ids_block() {
    let ctx = BuildContext::for_tests();
    let graph = healthy_graph();
    reserve_graph_names(&ctx, &graph);
    let mut outcome = run_passes(&ctx, graph);
    outcome
        .static_flattening
        .flatten
        .insert(StableId::type_id("Ghost", "Ghost.Type"));
    let plan = plan_emission(&ctx, outcome);
    let gate = PhaseGate::run(&ctx, &plan, None);

    assert!(gate.blocked);
    assert!(ctx.sink.count_for(codes::PLAN_DANGLING_STABLE_ID) > 0);
    assert!(ctx.sink.count_for(codes::EMISSION_HALTED) > 0);
}

#[test]
fn public_api_exposing_internal_type_blocks() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Hidden").internal().method("M", |m| m))
        .ty(TypeBuilder::class("Acme.Api")
            .method("Leak", |m| m.returns(fixture::named("Acme.Hidden"))))
        .build();

    let ctx = BuildContext::for_tests();
    let plan = plan_for(&ctx, graph);
    let outcome = PhaseGate::run(&ctx, &plan, None);

    assert!(outcome.blocked);
    assert!(ctx.sink.count_for(codes::PUBLIC_API_NON_PUBLIC) > 0);
}

#[test]
fn arity_mismatch_blocks() {
    // Use-site passes one argument to an arity-2 external type.
    let bad_ref = tsbindgen_model::TypeReference::generic(
        "ThirdParty",
        "Vendor.Pair`2",
        vec![fixture::system("System.Int32")],
    );
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Api").method("M", |m| m.returns(bad_ref)))
        .build();

    let ctx = BuildContext::for_tests();
    let plan = plan_for(&ctx, graph);
    let outcome = PhaseGate::run(&ctx, &plan, None);

    assert!(outcome.blocked);
    assert!(ctx.sink.count_for(codes::GENERIC_ARITY_MISMATCH) > 0);
}

#[test]
fn uncovered_primitive_lift_blocks() {
    // A primitive as the argument of an unknown external generic.
    let bad_ref = tsbindgen_model::TypeReference::generic(
        "ThirdParty",
        "Vendor.Box`1",
        vec![fixture::system("System.Int32")],
    );
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Api").method("M", |m| m.returns(bad_ref)))
        .build();

    let ctx = BuildContext::for_tests();
    let plan = plan_for(&ctx, graph);
    let outcome = PhaseGate::run(&ctx, &plan, None);

    assert!(outcome.blocked);
    assert!(ctx.sink.count_for(codes::PRIMITIVE_LIFT_UNCOVERED) > 0);
}

#[test]
fn strict_mode_promotes_forbidden_warnings() {
    // A reserved-word rename is a Warning; strict mode forbids it.
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.default").method("M", |m| m))
        .build();

    let ctx = BuildContext::new(BuildOptions::default(), StrictPolicy::new(true));
    let plan = plan_for(&ctx, graph);
    let outcome = PhaseGate::run(&ctx, &plan, None);

    assert!(ctx.sink.count_for(codes::RESERVED_WORD_RENAMED) > 0);
    assert!(ctx.sink.count_for(codes::STRICT_MODE_VIOLATION) > 0);
    assert!(outcome.blocked);
}

#[test]
fn non_strict_mode_allows_warnings() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.default").method("M", |m| m))
        .build();

    let ctx = BuildContext::for_tests();
    let plan = plan_for(&ctx, graph);
    let outcome = PhaseGate::run(&ctx, &plan, None);

    assert!(ctx.sink.count_for(codes::RESERVED_WORD_RENAMED) > 0);
    assert!(!outcome.blocked);
}

#[test]
fn summary_aggregates_counts_per_code() {
    let ctx = BuildContext::for_tests();
    let plan = plan_for(&ctx, healthy_graph());
    let outcome = PhaseGate::run(&ctx, &plan, None);

    let json = outcome.summary.to_json();
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert!(parsed["errors"].is_number());
    assert!(parsed["diagnostics"].is_array());
}
