use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_naming::{BuildContext, reserve_graph_names};
use tsbindgen_plan::ImportPlanner;
use tsbindgen_shape::ExtensionBucketPlan;

#[test]
fn cross_namespace_references_become_imports() {
    // Acme.App.Client has a method returning Acme.IO.Stream.
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.IO.Stream").method("Close", |m| m))
        .ty(TypeBuilder::class("Acme.App.Client")
            .method("Open", |m| m.returns(fixture::named("Acme.IO.Stream"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());

    let app_imports = plan.imports_of("Acme.App");
    assert_eq!(app_imports.len(), 1);
    assert_eq!(app_imports[0].target_namespace, "Acme.IO");
    assert_eq!(app_imports[0].namespace_alias, "__Acme_IO");
    assert_eq!(app_imports[0].types.len(), 1);
    let ti = &app_imports[0].types[0];
    assert_eq!(ti.type_name, "Stream");
    assert_eq!(ti.alias, "Stream");
    assert!(!ti.is_value_import, "a return type is a type position");

    // Nothing to import the other way.
    assert!(plan.imports_of("Acme.IO").is_empty());
}

#[test]
fn heritage_references_use_value_imports() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.IO.Stream").method("Close", |m| m))
        .ty(TypeBuilder::class("Acme.App.FileStream").base(fixture::named("Acme.IO.Stream")))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());

    let ti = &plan.imports_of("Acme.App")[0].types[0];
    assert!(ti.is_value_import, "extends is a value position");
    assert_eq!(
        plan.qualified_value_name("Acme.App", "Acme.IO.Stream"),
        Some("__Acme_IO.Stream$instance")
    );
}

#[test]
fn same_namespace_and_builtin_references_are_not_imported() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Data.Row").method("Tag", |m| {
            m.returns(fixture::system("System.String"))
        }))
        .ty(TypeBuilder::class("Acme.Data.Table")
            .method("First", |m| m.returns(fixture::named("Acme.Data.Row"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    assert!(plan.imports_of("Acme.Data").is_empty());
}

#[test]
fn exports_list_alias_and_instance_forms() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.Data.Row").method("M", |m| m))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());

    let exports = plan.exports_of("Acme.Data");
    assert!(exports.contains(&"Row".to_string()));
    assert!(exports.contains(&"Row$instance".to_string()));
}

#[test]
fn import_aliases_dodge_local_names() {
    // Both namespaces declare a type whose final name is "Widget"; the
    // import must take a suffixed alias.
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.UI.Widget").method("M", |m| m))
        .ty(TypeBuilder::class("Acme.App.Widget").method("M", |m| m))
        .ty(TypeBuilder::class("Acme.App.Screen")
            .method("Attach", |m| m.param("w", fixture::named("Acme.UI.Widget"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());

    let ti = &plan.imports_of("Acme.App")[0].types[0];
    assert_eq!(ti.type_name, "Widget");
    assert_eq!(ti.alias, "Widget_1");
}

#[test]
fn internal_types_do_not_contribute_references() {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.IO.Secret").method("M", |m| m))
        .ty(TypeBuilder::class("Acme.App.Hidden")
            .internal()
            .method("Use", |m| m.param("s", fixture::named("Acme.IO.Secret"))))
        .build();

    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    assert!(plan.imports_of("Acme.App").is_empty());
}
