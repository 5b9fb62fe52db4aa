use std::fs;
use std::path::Path;
use tsbindgen_emit::{Emitter, PackageEmitter, load_contract};
use tsbindgen_model::fixture::{self, GraphBuilder, TypeBuilder};
use tsbindgen_model::SymbolGraph;
use tsbindgen_naming::{BuildContext, reserve_graph_names};
use tsbindgen_plan::plan_emission;
use tsbindgen_shape::run_passes;

fn sample_graph() -> SymbolGraph {
    GraphBuilder::new()
        .ty(TypeBuilder::class("Acme.IO.Stream")
            .ctor(vec![])
            .method("Close", |m| m))
        .ty(TypeBuilder::class("Acme.App.Client")
            .method("Open", |m| m.returns(fixture::named("Acme.IO.Stream"))))
        .ty(TypeBuilder::class("Globals").method("Main", |m| m.static_()))
        .build()
}

fn emit_to(dir: &Path) {
    let graph = sample_graph();
    let ctx = BuildContext::for_tests();
    reserve_graph_names(&ctx, &graph);
    let plan = plan_emission(&ctx, run_passes(&ctx, graph));
    PackageEmitter
        .emit(&ctx, &plan, dir)
        .expect("emission succeeds");
}

#[test]
fn output_layout_matches_the_contract() {
    let dir = tempfile::tempdir().expect("tempdir");
    emit_to(dir.path());

    for ns in ["Acme.IO", "Acme.App"] {
        let base = dir.path().join(ns);
        assert!(base.join("internal/index.d.ts").is_file(), "{ns} d.ts");
        assert!(base.join("internal/metadata.json").is_file(), "{ns} metadata");
        assert!(base.join("bindings.json").is_file(), "{ns} bindings");
        assert!(base.join("index.js").is_file(), "{ns} stub");
    }
    // The global namespace emits under _root/.
    assert!(dir.path().join("_root/internal/index.d.ts").is_file());
}

#[test]
fn declarations_reference_imports_and_instance_forms() {
    let dir = tempfile::tempdir().expect("tempdir");
    emit_to(dir.path());

    let app = fs::read_to_string(dir.path().join("Acme.App/internal/index.d.ts"))
        .expect("declaration file");
    assert!(app.contains("import * as __Acme_IO from \"../Acme.IO/internal/index\""));
    assert!(app.contains("export interface Client$instance"));
    assert!(app.contains("Open(): Stream;"));
    assert!(app.contains("export declare const Client"));

    let io = fs::read_to_string(dir.path().join("Acme.IO/internal/index.d.ts"))
        .expect("declaration file");
    assert!(io.contains("new (): Stream$instance;"));
}

#[test]
fn two_runs_are_byte_identical() {
    let a = tempfile::tempdir().expect("tempdir");
    let b = tempfile::tempdir().expect("tempdir");
    emit_to(a.path());
    emit_to(b.path());

    let mut paths: Vec<_> = collect_files(a.path());
    paths.sort();
    assert!(!paths.is_empty());
    for rel in paths {
        let left = fs::read(a.path().join(&rel)).expect("left file");
        let right = fs::read(b.path().join(&rel)).expect("right file");
        assert_eq!(left, right, "artifact '{rel}' differs between runs");
    }
}

fn collect_files(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).expect("readable dir") {
            let path = entry.expect("entry").path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(
                    path.strip_prefix(root)
                        .expect("under root")
                        .to_string_lossy()
                        .into_owned(),
                );
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out
}

#[test]
fn emitted_package_loads_back_as_a_contract() {
    let dir = tempfile::tempdir().expect("tempdir");
    emit_to(dir.path());

    let contract = load_contract(dir.path()).expect("contract loads");
    assert!(contract.contains("Acme.IO.Stream"));
    assert!(contract.contains("Acme.App.Client"));
    assert_eq!(
        contract.bindings.get("Acme.IO.Stream").map(String::as_str),
        Some("Stream")
    );
}
