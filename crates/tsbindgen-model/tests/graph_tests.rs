use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_model::{EmitScope, StableId, TypeKind};

fn sample_graph() -> tsbindgen_model::SymbolGraph {
    GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Data.Connection")
            .method("Open", |m| m)
            .method("Close", |m| m)
            .property("State", fixture::system("System.Int32")))
        .ty(TypeBuilder::interface("Acme.Data.IConnection").method("Open", |m| m))
        .ty(TypeBuilder::enumeration("Acme.Data.ConnectionState")
            .literal("Closed", 0)
            .literal("Open", 1))
        .build()
}

#[test]
fn namespaces_and_index_agree() {
    let graph = sample_graph();
    assert_eq!(graph.type_count(), 3);
    assert!(graph.check_invariants().is_empty());

    let ns = graph.namespace("Acme.Data").expect("namespace exists");
    assert_eq!(ns.types.len(), 3);
    for id in &ns.types {
        assert!(graph.contains(id));
    }
}

#[test]
fn with_type_returns_a_new_graph() {
    let graph = sample_graph();
    let id = StableId::type_id(fixture::TEST_ASSEMBLY, "Acme.Data.Connection");

    let updated = graph.with_type(&id, |mut ty| {
        ty.members.methods.retain(|m| m.clr_name != "Close");
        ty
    });

    // Original untouched.
    assert_eq!(
        graph.type_by_id(&id).expect("present").members.methods.len(),
        2
    );
    assert_eq!(
        updated
            .type_by_id(&id)
            .expect("present")
            .members
            .methods
            .len(),
        1
    );
    assert!(updated.check_invariants().is_empty());
}

#[test]
fn full_name_resolution() {
    let graph = sample_graph();
    let ty = graph
        .resolve_full_name("Acme.Data.IConnection")
        .expect("resolves");
    assert_eq!(ty.kind, TypeKind::Interface);
    assert!(graph.resolve_full_name("Acme.Data.Missing").is_none());
}

#[test]
fn types_sorted_is_deterministic() {
    let a = sample_graph();
    let b = sample_graph();
    let ids_a: Vec<_> = a.types_sorted().iter().map(|t| t.stable_id.clone()).collect();
    let ids_b: Vec<_> = b.types_sorted().iter().map(|t| t.stable_id.clone()).collect();
    assert_eq!(ids_a, ids_b);
    let mut sorted = ids_a.clone();
    sorted.sort();
    assert_eq!(ids_a, sorted);
}

#[test]
fn view_only_without_source_interface_is_a_violation() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.C").method("M", |m| m))
        .build();
    let id = StableId::type_id(fixture::TEST_ASSEMBLY, "Acme.C");
    let broken = graph.with_type(&id, |mut ty| {
        ty.members.methods[0].emit_scope = EmitScope::ViewOnly;
        ty
    });
    let violations = broken.check_invariants();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].contains("lacks a source interface"));
}

#[test]
fn static_only_detection() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::static_class("Acme.Util").method("Helper", |m| m.static_()))
        .ty(TypeBuilder::class("Acme.Mixed")
            .method("Instance", |m| m)
            .method("Static", |m| m.static_()))
        .build();

    let util = graph
        .resolve_full_name("Acme.Util")
        .expect("resolves");
    let mixed = graph
        .resolve_full_name("Acme.Mixed")
        .expect("resolves");
    assert!(util.is_static_only());
    assert!(!mixed.is_static_only());
}
