use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_model::{EmitScope, TypeReference};
use tsbindgen_naming::BuildContext;
use tsbindgen_shape::{HonestEmissionPlanner, StructuralConformance};

#[test]
fn satisfied_claims_are_kept() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::interface("Acme.IRunnable").method("Run", |m| m))
        .ty(TypeBuilder::class("Acme.Job")
            .implements(fixture::named("Acme.IRunnable"))
            .method("Run", |m| m))
        .build();

    let ctx = BuildContext::for_tests();
    let (result, findings) = StructuralConformance::run(&ctx, graph);

    let job = result.resolve_full_name("Acme.Job").expect("Job resolves");
    assert_eq!(job.interfaces.len(), 1);
    assert!(job.explicit_views.is_empty());
    assert!(findings.unsatisfiable.is_empty());
}

#[test]
fn missing_members_drop_the_claim_and_plan_a_view() {
    // IComparer requires Compare(int, int); Sorter lacks it.
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::interface("Acme.IComparer")
            .method("Compare", |m| {
                m.param("a", fixture::system("System.Int32"))
                    .param("b", fixture::system("System.Int32"))
                    .returns(fixture::system("System.Int32"))
            }))
        .ty(TypeBuilder::class("Acme.Sorter")
            .implements(fixture::named("Acme.IComparer"))
            .method("Sort", |m| m))
        .build();

    let ctx = BuildContext::for_tests();
    let (result, findings) = StructuralConformance::run(&ctx, graph);

    let sorter = result.resolve_full_name("Acme.Sorter").expect("resolves");
    assert!(sorter.interfaces.is_empty(), "claim removed");
    assert_eq!(sorter.explicit_views.len(), 1);
    assert_eq!(sorter.explicit_views[0].view_property_name, "As_IComparer");

    let view_methods: Vec<_> = sorter
        .members
        .methods
        .iter()
        .filter(|m| m.emit_scope == EmitScope::ViewOnly)
        .collect();
    assert_eq!(view_methods.len(), 1);
    assert_eq!(view_methods[0].clr_name, "Compare");
    assert!(view_methods[0].source_interface.is_some());

    assert_eq!(findings.unsatisfiable.len(), 1);
    let claim = &findings.unsatisfiable[0];
    assert_eq!(claim.reason, "MissingOrIncompatibleMembers");
    assert_eq!(claim.issue_count, 1);

    // The honest-emission plan mirrors the finding per CLR type name.
    let honest = HonestEmissionPlanner::run(&ctx, &findings);
    let entries = honest.entries_for("Acme.Sorter");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].interface_clr, "Acme.IComparer");
    assert!(entries[0].issue_count > 0);
}

#[test]
fn view_names_disambiguate_per_type() {
    // Two same-simple-name interfaces from different namespaces.
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::interface("Acme.IO.IReader").method("Read", |m| m))
        .ty(TypeBuilder::interface("Acme.Net.IReader").method("Receive", |m| m))
        .ty(TypeBuilder::class("Acme.Gateway")
            .implements(fixture::named("Acme.IO.IReader"))
            .implements(fixture::named("Acme.Net.IReader")))
        .build();

    let ctx = BuildContext::for_tests();
    let (result, _findings) = StructuralConformance::run(&ctx, graph);

    let gateway = result.resolve_full_name("Acme.Gateway").expect("resolves");
    let names: Vec<&str> = gateway
        .explicit_views
        .iter()
        .map(|v| v.view_property_name.as_str())
        .collect();
    assert_eq!(names, vec!["As_IReader", "As_IReader_1"]);
}

#[test]
fn generic_claims_substitute_before_matching() {
    // IBox<T> { T Unwrap(); }  class IntBox : IBox<int> { int Unwrap(); }
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::interface("Acme.IBox")
            .generic("T")
            .method("Unwrap", |m| m.returns(TypeReference::type_param(0, "T"))))
        .ty(TypeBuilder::class("Acme.IntBox")
            .implements(TypeReference::generic(
                fixture::TEST_ASSEMBLY,
                "Acme.IBox`1",
                vec![fixture::system("System.Int32")],
            ))
            .method("Unwrap", |m| m.returns(fixture::system("System.Int32"))))
        .build();

    let ctx = BuildContext::for_tests();
    let (result, findings) = StructuralConformance::run(&ctx, graph);

    let int_box = result.resolve_full_name("Acme.IntBox").expect("resolves");
    assert_eq!(int_box.interfaces.len(), 1, "substituted claim is satisfied");
    assert!(findings.unsatisfiable.is_empty());
}

#[test]
fn external_interfaces_are_kept_as_written() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Stream")
            .implements(fixture::system("System.IDisposable"))
            .method("Close", |m| m))
        .build();

    let ctx = BuildContext::for_tests();
    let (result, findings) = StructuralConformance::run(&ctx, graph);

    let stream = result.resolve_full_name("Acme.Stream").expect("resolves");
    assert_eq!(stream.interfaces.len(), 1);
    assert!(findings.unsatisfiable.is_empty());
}
