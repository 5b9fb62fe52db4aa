use tsbindgen_model::TypeReference;
use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_naming::{BuildContext, reserve_graph_names};
use tsbindgen_plan::{ImportPlanner, TypeNameResolver};
use tsbindgen_shape::ExtensionBucketPlan;

fn setup() -> (tsbindgen_model::SymbolGraph, BuildContext) {
    let graph = GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.IO.Stream").method("Close", |m| m))
        .ty(TypeBuilder::class("Acme.App.FileStream")
            .base(fixture::named("Acme.IO.Stream"))
            .method("Path", |m| m.returns(fixture::system("System.String"))))
        .ty(TypeBuilder::class("Acme.App.Local").method("M", |m| m))
        .build();
    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    (graph, ctx)
}

#[test]
fn builtins_short_circuit_everything() {
    let (graph, ctx) = setup();
    let imports = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let resolver = TypeNameResolver::new(&graph, &ctx.renamer, &imports);

    assert_eq!(
        resolver.resolve("Acme.App", &fixture::system("System.String"), false),
        "string"
    );
    assert_eq!(
        resolver.resolve(
            "Acme.App",
            &TypeReference::generic(
                "System.Runtime",
                "System.Threading.Tasks.Task`1",
                vec![fixture::system("System.Int32")],
            ),
            false
        ),
        "Promise<number>"
    );
}

#[test]
fn local_types_use_alias_or_instance_by_position() {
    let (graph, ctx) = setup();
    let imports = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let resolver = TypeNameResolver::new(&graph, &ctx.renamer, &imports);

    let local = fixture::named("Acme.App.Local");
    assert_eq!(resolver.resolve("Acme.App", &local, false), "Local");
    assert_eq!(resolver.resolve("Acme.App", &local, true), "Local$instance");
}

#[test]
fn cross_namespace_value_positions_use_qualified_names() {
    let (graph, ctx) = setup();
    let imports = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let resolver = TypeNameResolver::new(&graph, &ctx.renamer, &imports);

    let stream = fixture::named("Acme.IO.Stream");
    // Type position: the import alias.
    assert_eq!(resolver.resolve("Acme.App", &stream, false), "Stream");
    // Value position (extends): the pre-resolved qualified instance form.
    assert_eq!(
        resolver.resolve("Acme.App", &stream, true),
        "__Acme_IO.Stream$instance"
    );
}

#[test]
fn external_types_are_sanitized() {
    let (graph, ctx) = setup();
    let imports = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let resolver = TypeNameResolver::new(&graph, &ctx.renamer, &imports);

    let external = TypeReference::named("ThirdParty", "Vendor.Util.Helper`1");
    assert_eq!(
        resolver.resolve("Acme.App", &external, false),
        "Helper_1"
    );
}

#[test]
fn arrays_and_byrefs_render_structurally() {
    let (graph, ctx) = setup();
    let imports = ImportPlanner::run(&ctx, &graph, &ExtensionBucketPlan::default());
    let resolver = TypeNameResolver::new(&graph, &ctx.renamer, &imports);

    let arr = TypeReference::array(fixture::system("System.Int32"));
    assert_eq!(resolver.resolve("Acme.App", &arr, false), "number[]");

    let nullable_arr = TypeReference::array(TypeReference::generic(
        "System.Runtime",
        "System.Nullable`1",
        vec![fixture::system("System.Int32")],
    ));
    assert_eq!(
        resolver.resolve("Acme.App", &nullable_arr, false),
        "(number | null)[]"
    );

    let by_ref = TypeReference::by_ref(fixture::system("System.Boolean"));
    assert_eq!(resolver.resolve("Acme.App", &by_ref, false), "boolean");
}
