use std::fs;
use std::path::{Path, PathBuf};
use tsbindgen_cli::{ExitCode, GenerateArgs, TransformArg, run_generate};

fn write_assembly_json(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("fixture written");
    path
}

fn sample_assembly() -> &'static str {
    r#"{
  "assembly": "Acme.Core",
  "types": [
    {
      "fullName": "Acme.Data.Connection",
      "kind": "class",
      "ctors": [[]],
      "methods": [
        { "name": "Open" },
        { "name": "Query", "params": [ { "name": "sql", "type": "System.String" } ],
          "returns": "Acme.Data.Row[]" }
      ],
      "properties": [ { "name": "State", "type": "System.Int32" } ]
    },
    {
      "fullName": "Acme.Data.Row",
      "kind": "class",
      "methods": [ { "name": "Get", "params": [ { "name": "i", "type": "System.Int32" } ],
                     "returns": "System.String" } ]
    }
  ]
}"#
}

fn generate_args(inputs: Vec<PathBuf>, out: PathBuf) -> GenerateArgs {
    GenerateArgs {
        assemblies: inputs,
        assembly_dir: None,
        out,
        namespaces: Vec::new(),
        namespace_transform: TransformArg::None,
        class_transform: TransformArg::None,
        interface_transform: TransformArg::None,
        method_transform: TransformArg::None,
        property_transform: TransformArg::None,
        enum_member_transform: TransformArg::None,
        verbose: false,
        log_categories: Vec::new(),
        strict: false,
        library_contract: None,
    }
}

#[test]
fn generate_produces_the_package_layout() {
    let work = tempfile::tempdir().expect("tempdir");
    let input = write_assembly_json(work.path(), "acme.json", sample_assembly());
    let out = work.path().join("out");

    let code = run_generate(&generate_args(vec![input], out.clone()), None);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(code.code(), 0);

    assert!(out.join("Acme.Data/internal/index.d.ts").is_file());
    assert!(out.join("Acme.Data/internal/metadata.json").is_file());
    assert!(out.join("Acme.Data/bindings.json").is_file());
    assert!(out.join("Acme.Data/index.js").is_file());
    assert!(out.join("validation-summary.json").is_file());

    let dts = fs::read_to_string(out.join("Acme.Data/internal/index.d.ts")).expect("dts");
    assert!(dts.contains("export interface Connection$instance"));
    assert!(dts.contains("Query(sql: string): Row[];"));
}

#[test]
fn missing_inputs_exit_with_two() {
    let work = tempfile::tempdir().expect("tempdir");
    let code = run_generate(&generate_args(Vec::new(), work.path().join("out")), None);
    assert_eq!(code, ExitCode::MissingInputs);
    assert_eq!(code.code(), 2);
}

#[test]
fn unreachable_inputs_exit_with_three() {
    let work = tempfile::tempdir().expect("tempdir");
    let missing = work.path().join("nope.json");
    let code = run_generate(&generate_args(vec![missing], work.path().join("out")), None);
    assert_eq!(code, ExitCode::UnreachableInputs);
    assert_eq!(code.code(), 3);
}

#[test]
fn malformed_metadata_exits_with_one() {
    let work = tempfile::tempdir().expect("tempdir");
    let input = write_assembly_json(work.path(), "broken.json", "{ not json");
    let code = run_generate(&generate_args(vec![input], work.path().join("out")), None);
    assert_eq!(code, ExitCode::EmissionFailure);
    assert_eq!(code.code(), 1);
}

#[test]
fn namespace_filter_restricts_output() {
    let work = tempfile::tempdir().expect("tempdir");
    let input = write_assembly_json(work.path(), "acme.json", sample_assembly());
    let out = work.path().join("out");

    let mut args = generate_args(vec![input], out.clone());
    args.namespaces = vec!["Acme.Missing".to_string()];
    let code = run_generate(&args, None);

    // An empty filtered graph still validates and emits (a warning is
    // recorded); nothing but the summary lands in the output.
    assert_eq!(code, ExitCode::Success);
    assert!(!out.join("Acme.Data").exists());
    let summary = fs::read_to_string(out.join("validation-summary.json")).expect("summary");
    assert!(summary.contains("TBG005"));
}

#[test]
fn camel_case_transform_applies_to_members() {
    let work = tempfile::tempdir().expect("tempdir");
    let input = write_assembly_json(work.path(), "acme.json", sample_assembly());
    let out = work.path().join("out");

    let mut args = generate_args(vec![input], out.clone());
    args.method_transform = TransformArg::CamelCase;
    args.property_transform = TransformArg::CamelCase;
    let code = run_generate(&args, None);
    assert_eq!(code, ExitCode::Success);

    let dts = fs::read_to_string(out.join("Acme.Data/internal/index.d.ts")).expect("dts");
    assert!(dts.contains("open(): void;"));
    assert!(dts.contains("readonly state: number;"));

    let metadata =
        fs::read_to_string(out.join("Acme.Data/internal/metadata.json")).expect("metadata");
    assert!(metadata.contains("\"clrName\": \"Open\""));
    assert!(metadata.contains("\"tsEmitName\": \"open\""));
}

#[test]
fn library_mode_emits_only_the_uncovered_subset() {
    let work = tempfile::tempdir().expect("tempdir");
    let base_input = write_assembly_json(work.path(), "acme.json", sample_assembly());
    let contract_out = work.path().join("contract");
    assert_eq!(
        run_generate(&generate_args(vec![base_input.clone()], contract_out.clone()), None),
        ExitCode::Success
    );

    // Second run: the same assembly plus one new type, against the
    // contract. Only the new type's namespace may be emitted.
    let extended = write_assembly_json(
        work.path(),
        "acme2.json",
        r#"{
  "assembly": "Acme.Core",
  "types": [
    {
      "fullName": "Acme.Data.Connection",
      "kind": "class",
      "ctors": [[]],
      "methods": [
        { "name": "Open" },
        { "name": "Query", "params": [ { "name": "sql", "type": "System.String" } ],
          "returns": "Acme.Data.Row[]" }
      ],
      "properties": [ { "name": "State", "type": "System.Int32" } ]
    },
    {
      "fullName": "Acme.Data.Row",
      "kind": "class",
      "methods": [ { "name": "Get", "params": [ { "name": "i", "type": "System.Int32" } ],
                     "returns": "System.String" } ]
    },
    {
      "fullName": "Acme.Web.Endpoint",
      "kind": "class",
      "methods": [ { "name": "Connect", "returns": "Acme.Data.Connection" } ]
    }
  ]
}"#,
    );
    let out = work.path().join("out");
    let mut args = generate_args(vec![extended], out.clone());
    args.library_contract = Some(contract_out);
    assert_eq!(run_generate(&args, None), ExitCode::Success);

    assert!(out.join("Acme.Web/internal/index.d.ts").is_file());
    assert!(
        !out.join("Acme.Data").exists(),
        "contract-covered namespace must not re-emit"
    );
}

#[test]
fn strict_mode_blocks_reserved_word_warnings() {
    let work = tempfile::tempdir().expect("tempdir");
    let input = write_assembly_json(
        work.path(),
        "acme.json",
        r#"{
  "assembly": "Acme.Core",
  "types": [ { "fullName": "Acme.default", "kind": "class",
               "methods": [ { "name": "M" } ] } ]
}"#,
    );
    let out = work.path().join("out");

    let mut args = generate_args(vec![input.clone()], out.clone());
    args.strict = true;
    assert_eq!(run_generate(&args, None), ExitCode::EmissionFailure);
    // The summary is still written on halt.
    assert!(out.join("validation-summary.json").is_file());

    let relaxed_out = work.path().join("out2");
    let relaxed = generate_args(vec![input], relaxed_out);
    assert_eq!(run_generate(&relaxed, None), ExitCode::Success);
}
