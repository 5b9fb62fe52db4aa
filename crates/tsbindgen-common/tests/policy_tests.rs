use tsbindgen_common::diagnostics::{DiagnosticCode, codes};
use tsbindgen_common::{PolicyBucket, StrictPolicy};

#[test]
fn non_strict_never_blocks_warnings() {
    let policy = StrictPolicy::new(false);
    assert!(!policy.blocks(codes::RESERVED_WORD_RENAMED));
    assert!(!policy.blocks(codes::SELF_IMPORT));
}

#[test]
fn strict_blocks_forbidden_warnings() {
    let policy = StrictPolicy::new(true);
    assert!(policy.blocks(codes::RESERVED_WORD_RENAMED));
    assert!(policy.blocks(codes::NUMERIC_SUFFIX_LEAK));
    // Recorded decisions stay informational even under strict mode.
    assert!(!policy.blocks(codes::DIAMOND_RESOLVED));
    assert!(!policy.blocks(codes::HONEST_OMISSION_RECORDED));
}

#[test]
fn unknown_codes_are_forbidden() {
    let policy = StrictPolicy::new(true);
    let unknown = DiagnosticCode(999);
    assert_eq!(policy.bucket(unknown), PolicyBucket::Forbidden);
    assert!(policy.blocks(unknown));
}

#[test]
fn bucket_reassignment_is_honored() {
    let mut policy = StrictPolicy::new(true);
    policy.set_bucket(codes::RESERVED_WORD_RENAMED, PolicyBucket::Informational);
    assert!(!policy.blocks(codes::RESERVED_WORD_RENAMED));
}
