use std::sync::Arc;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{DiagnosticSink, ReservedWordStrategy};
use tsbindgen_model::StableId;
use tsbindgen_naming::{Renamer, Scope, ScopeFactory, Side};

fn renamer() -> (Renamer, Arc<DiagnosticSink>) {
    let sink = Arc::new(DiagnosticSink::new());
    (
        Renamer::new(Arc::clone(&sink), ReservedWordStrategy::UnderscorePrefix),
        sink,
    )
}

fn ns_scope() -> Scope {
    ScopeFactory::namespace_public("Acme.Data")
}

#[test]
fn first_reservation_gets_the_preferred_name() {
    let (renamer, _sink) = renamer();
    let id = StableId::type_id("Acme.Core", "Acme.Data.Connection");
    let name = renamer.reserve_type(&id, "Connection", &ns_scope(), "declared");
    assert_eq!(name, "Connection");
}

#[test]
fn collisions_take_numeric_suffixes_starting_at_one() {
    let (renamer, _sink) = renamer();
    let scope = ns_scope();
    let a = StableId::type_id("A", "Acme.Data.Row");
    let b = StableId::type_id("B", "Acme.Data.Row");
    let c = StableId::type_id("C", "Acme.Data.Row");
    assert_eq!(renamer.reserve_type(&a, "Row", &scope, "declared"), "Row");
    assert_eq!(renamer.reserve_type(&b, "Row", &scope, "declared"), "Row_1");
    assert_eq!(renamer.reserve_type(&c, "Row", &scope, "declared"), "Row_2");
}

#[test]
fn reservations_are_monotonic() {
    let (renamer, _sink) = renamer();
    let scope = ns_scope();
    let id = StableId::type_id("Acme.Core", "Acme.Data.Table");
    let first = renamer.reserve_type(&id, "Table", &scope, "declared");
    let second = renamer.reserve_type(&id, "Table", &scope, "declared");
    assert_eq!(first, second);
}

#[test]
fn generic_arity_becomes_underscore_suffix() {
    let (renamer, _sink) = renamer();
    let id = StableId::type_id("Acme.Core", "Acme.Data.Cache`2");
    let name = renamer.reserve_type(&id, "Cache`2", &ns_scope(), "declared");
    assert_eq!(name, "Cache_2");
}

#[test]
fn reserved_words_are_never_emitted_verbatim() {
    let (renamer, sink) = renamer();
    let id = StableId::type_id("Acme.Core", "Acme.Data.Default");
    let name = renamer.reserve_type(&id, "default", &ns_scope(), "declared");
    assert_eq!(name, "_default");
    assert_eq!(sink.count_for(codes::RESERVED_WORD_RENAMED), 1);
}

#[test]
fn member_sides_are_separate_namespaces() {
    let (renamer, _sink) = renamer();
    let base = ScopeFactory::type_base("Acme.Data.Connection");
    let instance_id = StableId::member("Acme.Core", "Acme.Data.Connection", "Open", "`0():v");
    let static_id = StableId::member("Acme.Core", "Acme.Data.Connection", "Open", "`0():v#static");

    let i = renamer.reserve_member(&instance_id, "Open", &base, "declared", false);
    let s = renamer.reserve_member(&static_id, "Open", &base, "declared", true);
    // No collision: the two sides are distinct surface scopes.
    assert_eq!(i, "Open");
    assert_eq!(s, "Open");

    let instance_surface = base.surface(Side::Instance);
    let static_surface = base.surface(Side::Static);
    assert_eq!(
        renamer
            .final_member_name(&instance_id, &instance_surface)
            .as_deref(),
        Some("Open")
    );
    assert_eq!(
        renamer
            .final_member_name(&static_id, &static_surface)
            .as_deref(),
        Some("Open")
    );
    assert!(renamer.final_member_name(&instance_id, &static_surface).is_none());
}

#[test]
fn re_reservation_with_new_preferred_reports_tbg027() {
    let (renamer, sink) = renamer();
    let scope = ns_scope();
    let id = StableId::type_id("Acme.Core", "Acme.Data.Blob");
    let first = renamer.reserve_type(&id, "Blob", &scope, "declared");
    let second = renamer.reserve_type(&id, "BlobValue", &scope, "declared");
    assert_eq!(first, second, "assigned name never changes");
    assert_eq!(sink.count_for(codes::RESERVATION_NOT_MONOTONIC), 1);
}

#[test]
fn provenance_is_recorded() {
    let (renamer, _sink) = renamer();
    let id = StableId::type_id("Acme.Core", "Acme.Data.Connection");
    renamer.reserve_type(&id, "Connection", &ns_scope(), "declared");
    let reservations = renamer.reservations();
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].provenance, "declared");
    assert_eq!(reservations[0].final_name, "Connection");
}
