use tsbindgen_model::StableId;
use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_model::TypeReference;
use tsbindgen_naming::{BuildContext, reserve_graph_names};
use tsbindgen_shape::PropertyOverrideUnifier;

fn type_id(full_name: &str) -> StableId {
    StableId::type_id(fixture::TEST_ASSEMBLY, full_name)
}

#[test]
fn narrowing_override_produces_sorted_union_at_every_level() {
    // class Base { CacheLevel Level {get;} }
    // class Derived : Base { HttpCacheLevel Level {get;} }
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::enumeration("Acme.CacheLevel").literal("None", 0))
        .ty(TypeBuilder::enumeration("Acme.HttpCacheLevel").literal("None", 0))
        .ty(TypeBuilder::class("Acme.Base").property("Level", fixture::named("Acme.CacheLevel")))
        .ty(TypeBuilder::class("Acme.Derived")
            .base(fixture::named("Acme.Base"))
            .property("Level", fixture::named("Acme.HttpCacheLevel")))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = PropertyOverrideUnifier::run(&ctx, &graph);

    assert_eq!(plan.overrides.len(), 2, "both levels are mapped");
    let base = graph.resolve_full_name("Acme.Base").expect("resolves");
    let derived = graph.resolve_full_name("Acme.Derived").expect("resolves");
    let base_prop = &base.members.properties[0].stable_id;
    let derived_prop = &derived.members.properties[0].stable_id;

    let union = "CacheLevel | HttpCacheLevel";
    assert_eq!(plan.union_for(&type_id("Acme.Base"), base_prop), Some(union));
    assert_eq!(
        plan.union_for(&type_id("Acme.Derived"), derived_prop),
        Some(union)
    );
}

#[test]
fn identical_types_need_no_union() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Base").property("Name", fixture::system("System.String")))
        .ty(TypeBuilder::class("Acme.Derived")
            .base(fixture::named("Acme.Base"))
            .property("Name", fixture::system("System.String")))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = PropertyOverrideUnifier::run(&ctx, &graph);
    assert!(plan.overrides.is_empty());
}

#[test]
fn three_level_chains_union_all_distinct_types() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.A").property("Value", fixture::system("System.Int32")))
        .ty(TypeBuilder::class("Acme.B")
            .base(fixture::named("Acme.A"))
            .property("Value", fixture::system("System.String")))
        .ty(TypeBuilder::class("Acme.C")
            .base(fixture::named("Acme.B"))
            .property("Value", fixture::system("System.Boolean")))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = PropertyOverrideUnifier::run(&ctx, &graph);

    assert_eq!(plan.overrides.len(), 3);
    // Sorted union of rendered components.
    let a = graph.resolve_full_name("Acme.A").expect("resolves");
    let a_prop = &a.members.properties[0].stable_id;
    assert_eq!(
        plan.union_for(&type_id("Acme.A"), a_prop),
        Some("boolean | number | string")
    );
}

#[test]
fn disjoint_generic_scopes_skip_unification() {
    // class Holder<T> { T Payload {get;} }
    // class IntHolder : Holder<int> { string Payload {get;} }
    // The base component renders as 'T', a token IntHolder does not
    // declare; the chain must be skipped and recorded.
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Holder")
            .generic("T")
            .property("Payload", TypeReference::type_param(0, "T")))
        .ty(TypeBuilder::class("Acme.IntHolder")
            .base(TypeReference::generic(
                fixture::TEST_ASSEMBLY,
                "Acme.Holder`1",
                vec![fixture::system("System.Int32")],
            ))
            .property("Payload", fixture::system("System.String")))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = PropertyOverrideUnifier::run(&ctx, &graph);

    assert!(plan.overrides.is_empty());
    assert_eq!(
        ctx.sink
            .count_for(tsbindgen_common::diagnostics::codes::OVERRIDE_UNIFICATION_SKIPPED),
        1
    );
}

#[test]
fn unrelated_same_named_properties_do_not_group() {
    // No inheritance relation between the two declarations.
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.First").property("Tag", fixture::system("System.Int32")))
        .ty(TypeBuilder::class("Acme.Second").property("Tag", fixture::system("System.String")))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = PropertyOverrideUnifier::run(&ctx, &graph);
    assert!(plan.overrides.is_empty());
}
