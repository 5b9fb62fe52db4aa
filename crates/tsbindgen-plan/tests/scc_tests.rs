use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_naming::{BuildContext, reserve_graph_names};
use tsbindgen_plan::{ImportPlanner, SccBuckets};
use tsbindgen_shape::ExtensionBucketPlan;

/// A → B → C → A import cycle: one bucket with the three namespaces in
/// sorted order.
#[test]
fn three_namespace_cycle_becomes_one_sorted_bucket() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.A.Alpha")
            .method("ToB", |m| m.returns(fixture::named("Acme.B.Beta"))))
        .ty(TypeBuilder::class("Acme.B.Beta")
            .method("ToC", |m| m.returns(fixture::named("Acme.C.Gamma"))))
        .ty(TypeBuilder::class("Acme.C.Gamma")
            .method("ToA", |m| m.returns(fixture::named("Acme.A.Alpha"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let buckets = SccBuckets::compute(&plan);

    assert_eq!(buckets.buckets.len(), 1);
    assert_eq!(
        buckets.buckets[0].namespaces,
        vec!["Acme.A".to_string(), "Acme.B".to_string(), "Acme.C".to_string()]
    );
    assert!(buckets.same_bucket("Acme.A", "Acme.C"));
}

#[test]
fn acyclic_imports_produce_no_buckets() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Base.Thing").method("M", |m| m))
        .ty(TypeBuilder::class("Acme.Mid.User")
            .method("Get", |m| m.returns(fixture::named("Acme.Base.Thing"))))
        .ty(TypeBuilder::class("Acme.Top.App")
            .method("Get", |m| m.returns(fixture::named("Acme.Mid.User"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let buckets = SccBuckets::compute(&plan);

    assert!(buckets.buckets.is_empty());
    assert!(!buckets.same_bucket("Acme.Mid", "Acme.Base"));
}

#[test]
fn two_cycles_bucket_independently() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.A.T")
            .method("M", |m| m.returns(fixture::named("Acme.B.T"))))
        .ty(TypeBuilder::class("Acme.B.T")
            .method("M", |m| m.returns(fixture::named("Acme.A.T"))))
        .ty(TypeBuilder::class("Acme.X.T")
            .method("M", |m| m.returns(fixture::named("Acme.Y.T"))))
        .ty(TypeBuilder::class("Acme.Y.T")
            .method("M", |m| m.returns(fixture::named("Acme.X.T"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let buckets = SccBuckets::compute(&plan);

    assert_eq!(buckets.buckets.len(), 2);
    assert!(buckets.same_bucket("Acme.A", "Acme.B"));
    assert!(buckets.same_bucket("Acme.X", "Acme.Y"));
    assert!(!buckets.same_bucket("Acme.A", "Acme.X"));
    assert_ne!(buckets.bucket_of("Acme.A"), buckets.bucket_of("Acme.X"));
}

/// The quotient graph over buckets must be a DAG: after merging each
/// bucket into one node, no edge may close a cycle.
#[test]
fn quotient_graph_is_acyclic() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.A.T")
            .method("M", |m| m.returns(fixture::named("Acme.B.T")))
            .method("Out", |m| m.returns(fixture::named("Acme.Down.T"))))
        .ty(TypeBuilder::class("Acme.B.T")
            .method("M", |m| m.returns(fixture::named("Acme.A.T"))))
        .ty(TypeBuilder::class("Acme.Down.T").method("M", |m| m))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let buckets = SccBuckets::compute(&plan);

    assert_eq!(buckets.buckets.len(), 1);
    // Edges out of the bucket must only reach namespaces outside it.
    for member in &buckets.buckets[0].namespaces {
        for import in plan.imports_of(member) {
            if !buckets.same_bucket(member, &import.target_namespace) {
                assert!(
                    buckets.bucket_of(&import.target_namespace).is_none(),
                    "edge from bucket re-enters a bucket"
                );
            }
        }
    }
}
