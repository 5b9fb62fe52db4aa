use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, DiagnosticSink, Location, Severity};

#[test]
fn sink_preserves_insertion_order() {
    let sink = DiagnosticSink::new();
    sink.report(Diagnostic::new(
        codes::EMPTY_FINAL_NAME,
        &["A", "ns:Foo:public"],
        Location::symbol("a"),
    ));
    sink.report(Diagnostic::new(
        codes::RESERVED_WORD_RENAMED,
        &["default", "_default"],
        Location::default(),
    ));
    sink.report(Diagnostic::new(
        codes::DIAMOND_RESOLVED,
        &["T", "M", "OverloadAll"],
        Location::default(),
    ));

    let all = sink.snapshot();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].code, codes::EMPTY_FINAL_NAME);
    assert_eq!(all[1].code, codes::RESERVED_WORD_RENAMED);
    assert_eq!(all[2].code, codes::DIAMOND_RESOLVED);
}

#[test]
fn sink_dedupes_by_code_and_message() {
    let sink = DiagnosticSink::new();
    for _ in 0..3 {
        sink.report(Diagnostic::new(
            codes::SELF_IMPORT,
            &["System.Text"],
            Location::namespace("System.Text"),
        ));
    }
    sink.report(Diagnostic::new(
        codes::SELF_IMPORT,
        &["System.IO"],
        Location::namespace("System.IO"),
    ));

    assert_eq!(sink.len(), 2);
    assert_eq!(sink.count_for(codes::SELF_IMPORT), 2);
    assert_eq!(sink.warning_count(), 2);
}

#[test]
fn severity_counting() {
    let sink = DiagnosticSink::new();
    sink.report(Diagnostic::new(
        codes::INPUT_NOT_FOUND,
        &["a.dll"],
        Location::default(),
    ));
    sink.report(Diagnostic::new(
        codes::RESERVED_WORD_RENAMED,
        &["class", "_class"],
        Location::default(),
    ));
    sink.report(Diagnostic::new(
        codes::HONEST_OMISSION_RECORDED,
        &["IFoo", "C"],
        Location::default(),
    ));

    assert_eq!(sink.error_count(), 1);
    assert_eq!(sink.warning_count(), 1);
    assert_eq!(sink.count(Severity::Info), 1);
    assert!(sink.has_errors());
}

#[test]
fn severity_override_is_respected() {
    let sink = DiagnosticSink::new();
    sink.report(
        Diagnostic::new(
            codes::RESERVED_WORD_RENAMED,
            &["enum", "_enum"],
            Location::default(),
        )
        .with_severity(Severity::Info),
    );
    assert_eq!(sink.warning_count(), 0);
    assert_eq!(sink.count(Severity::Info), 1);
}
