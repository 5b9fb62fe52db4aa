//! The stable diagnostic code registry.
//!
//! Codes are grouped by family:
//!
//! | Range   | Family                                   |
//! |---------|------------------------------------------|
//! | 001–009 | loader / operational                     |
//! | 010–019 | graph shape                              |
//! | 020–039 | name rules                               |
//! | 040–059 | member integrity                         |
//! | 060–079 | plan integrity                           |
//! | 080–099 | reference / import rules                 |
//! | 100–119 | public API surface and generic arity     |
//! | 120–129 | renamer transformations                  |
//! | 130–149 | library mode                             |
//! | 150–159 | honest emission                          |
//! | 160–169 | pipeline control                         |
//!
//! A code's number, name, and message template never change once released;
//! downstream tooling keys on them.

use super::{DiagnosticCode, Severity};

/// Registry entry: code, symbolic name, default severity, message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticSpec {
    pub code: DiagnosticCode,
    pub name: &'static str,
    pub default_severity: Severity,
    pub message: &'static str,
}

macro_rules! diagnostic_codes {
    ($($(#[$doc:meta])* $name:ident = $num:literal, $sev:ident, $msg:literal;)+) => {
        $(
            $(#[$doc])*
            pub const $name: DiagnosticCode = DiagnosticCode($num);
        )+

        /// Every known diagnostic, in code order.
        pub static REGISTRY: &[DiagnosticSpec] = &[
            $(
                DiagnosticSpec {
                    code: DiagnosticCode($num),
                    name: stringify!($name),
                    default_severity: Severity::$sev,
                    message: $msg,
                },
            )+
        ];
    };
}

diagnostic_codes! {
    // ==================== Loader / operational ====================
    /// An input assembly path does not exist.
    INPUT_NOT_FOUND = 1, Error, "input assembly '{0}' was not found";
    /// An input assembly exists but could not be read.
    INPUT_UNREADABLE = 2, Error, "input assembly '{0}' could not be read: {1}";
    /// The loader rejected the metadata of an input.
    METADATA_MALFORMED = 3, Error, "metadata in '{0}' is malformed: {1}";
    /// The resolved input set is empty.
    EMPTY_INPUT_SET = 4, Error, "no input assemblies were provided";
    /// The namespace include list filtered out every loaded type.
    NAMESPACE_FILTER_EMPTY = 5, Warning, "namespace include list removed every loaded type";
    /// A collaborator failure promoted into the diagnostic stream.
    COLLABORATOR_FAILURE = 6, Error, "{0} failed: {1}";

    // ==================== Graph shape ====================
    /// A namespace exposes a type that the type index does not contain.
    GRAPH_INDEX_INCONSISTENT = 10, Error,
        "type '{0}' is reachable from namespace '{1}' but missing from the type index";
    /// Two members of one type share a stable id.
    DUPLICATE_MEMBER_STABLE_ID = 11, Error, "duplicate member stable id '{0}' on type '{1}'";
    /// A base or implemented interface resolves neither in-graph nor externally.
    HERITAGE_UNRESOLVED = 12, Error,
        "type '{0}' references heritage '{1}' that resolves neither in-graph nor to a known external type";
    /// A generic parameter reference has no owner in scope.
    GENERIC_PARAM_UNRESOLVED = 13, Error,
        "generic parameter '{0}' used by '{1}' is not owned by an enclosing type or method";
    /// A pass detected broken preconditions and returned its input unchanged.
    PASS_PRECONDITION_BROKEN = 14, Warning, "pass '{0}' left the graph unchanged: {1}";
    /// Interface extension edges form a cycle.
    INTERFACE_BASE_CYCLE = 15, Error, "interface '{0}' participates in a base-interface cycle";
    /// Same-named methods with conflicting signatures survived flattening.
    DIAMOND_CONFLICT = 16, Warning,
        "type '{0}' method '{1}' has {2} conflicting signatures after flattening";
    /// A diamond conflict was resolved by the configured strategy.
    DIAMOND_RESOLVED = 17, Info, "type '{0}' method '{1}' resolved by strategy '{2}'";
    /// A kind invariant of the symbol model is violated.
    TYPE_KIND_INVARIANT = 18, Error, "type '{0}' violates a kind invariant: {1}";
    /// A Placeholder type reference escaped the pass that introduced it.
    PLACEHOLDER_ESCAPED = 19, Error, "placeholder type reference escaped into '{0}'";

    // ==================== Name rules ====================
    /// A symbol reached the gate with an empty final name.
    EMPTY_FINAL_NAME = 20, Error, "symbol '{0}' has no final name in scope '{1}'";
    /// Two symbols in one scope share a final name.
    DUPLICATE_FINAL_NAME = 21, Error, "scope '{0}' assigns '{1}' to more than one symbol";
    /// A lookup used a base scope where a surface scope is required.
    SCOPE_KIND_MISMATCH = 22, Error,
        "lookup for '{0}' used base scope '{1}' where a surface scope is required";
    /// A numeric rename suffix leaked into a CLR-facing name.
    NUMERIC_SUFFIX_LEAK = 23, Warning, "CLR-facing name '{0}' carries a rename suffix";
    /// Alias and instance names of a type disagree.
    ALIAS_INSTANCE_MISMATCH = 24, Error,
        "type '{0}' alias/instance naming is inconsistent ('{1}' vs '{2}')";
    /// A final name was requested before any reservation was made.
    UNRESERVED_LOOKUP = 25, Error,
        "final name requested for '{0}' in scope '{1}' before reservation";
    /// Reservation provenance contradicts the member's emit scope.
    PROVENANCE_SCOPE_MISMATCH = 26, Warning,
        "member '{0}' reserved with provenance '{1}' but emitted with scope '{2}'";
    /// A reservation was re-issued with a different preferred name.
    RESERVATION_NOT_MONOTONIC = 27, Error,
        "reservation for '{0}' in scope '{1}' changed from '{2}' to '{3}'";
    /// An unknown scope string was used.
    UNKNOWN_SCOPE_FORM = 28, Error, "scope string '{0}' matches no known scope form";

    // ==================== Member integrity ====================
    /// A ViewOnly member is missing its source interface.
    VIEW_ONLY_WITHOUT_SOURCE = 40, Error,
        "member '{0}' is ViewOnly but carries no source interface";
    /// A member carries an emit scope not permitted for its kind.
    EMIT_SCOPE_INVALID = 41, Error,
        "member '{0}' on '{1}' carries emit scope '{2}' not permitted for its kind";
    /// An Omitted member appears in an emission surface.
    OMITTED_MEMBER_EMITTED = 42, Error, "omitted member '{0}' appears on the surface of '{1}'";
    /// Two explicit views of one type collide on their view property name.
    VIEW_PROPERTY_COLLISION = 43, Error, "type '{0}' explicit views collide on property '{1}'";
    /// A view member's source interface is not among the view's interface members.
    VIEW_MEMBER_NOT_ON_INTERFACE = 44, Warning,
        "view member '{0}' does not correspond to any member of '{1}'";
    /// A synthesized member lost its provenance tag.
    PROVENANCE_MISSING = 45, Warning, "member '{0}' on '{1}' carries no provenance";
    /// An event or field carries index parameters.
    MEMBER_SHAPE_INVALID = 46, Error, "member '{0}' on '{1}' has an invalid shape: {2}";

    // ==================== Plan integrity ====================
    /// A plan references a stable id missing from the graph.
    PLAN_DANGLING_STABLE_ID = 60, Error,
        "plan '{0}' references stable id '{1}' that is not in the graph";
    /// A suppressed member does not exist on the claimed type.
    SUPPRESSED_MEMBER_MISSING = 61, Error,
        "static-conflict plan suppresses '{0}' which does not exist on '{1}'";
    /// A suppressed member's staticness differs from the plan's claim.
    SUPPRESSED_MEMBER_NOT_STATIC = 62, Error,
        "static-conflict plan suppresses non-static member '{0}' on '{1}'";
    /// A property override union contains a bare generic parameter.
    OVERRIDE_UNION_BARE_PARAM = 63, Error,
        "property override union for '{0}' contains a bare generic parameter '{1}'";
    /// An extension bucket targets a receiver that is neither in-graph nor external.
    EXTENSION_TARGET_UNKNOWN = 64, Error,
        "extension bucket targets unknown receiver '{0}'";
    /// Property unification skipped due to disjoint generic scopes.
    OVERRIDE_UNIFICATION_SKIPPED = 65, Info,
        "property '{0}' spans disjoint generic scopes; union skipped for the chain of '{1}'";
    /// A flattened type is not static-only.
    FLATTEN_NOT_STATIC_ONLY = 66, Error,
        "static-flattening plan covers '{0}' which has instance members";
    /// An extension bucket carries no methods.
    EXTENSION_BUCKET_EMPTY = 67, Warning, "extension bucket for '{0}' is empty";
    /// A property override plan entry points at a non-property member.
    OVERRIDE_TARGET_NOT_PROPERTY = 68, Error,
        "property override plan entry '{0}' does not name a property";
    /// An inherited-statics entry references a member absent from the ancestor chain.
    INHERITED_STATIC_MISSING = 69, Error,
        "inherited static '{0}' recorded for '{1}' is absent from its ancestor chain";

    // ==================== Reference / import rules ====================
    /// A referenced foreign type is neither built-in, local, nor imported.
    FOREIGN_TYPE_UNIMPORTED = 80, Error,
        "'{0}' referenced from namespace '{1}' is neither built-in, local, nor imported";
    /// An imported type is not exported by its source namespace.
    IMPORT_NOT_EXPORTED = 81, Error, "'{0}' is imported from '{1}' but not exported there";
    /// A heritage reference is served by a type-only import.
    HERITAGE_NOT_VALUE_IMPORT = 82, Error,
        "heritage reference '{0}' in namespace '{1}' must use a value import";
    /// A pre-resolved qualified name does not resolve.
    QUALIFIED_EXPORT_UNRESOLVED = 83, Error,
        "qualified reference '{0}' does not resolve to an exported type";
    /// An import cycle survived SCC bucketing.
    IMPORT_CYCLE_UNBUCKETED = 84, Error,
        "import cycle between '{0}' and '{1}' survived bucketing";
    /// A namespace imports from itself.
    SELF_IMPORT = 85, Warning, "namespace '{0}' imports from itself";
    /// An import alias collides with a top-level symbol of the namespace.
    IMPORT_ALIAS_SHADOWED = 86, Warning,
        "import alias '{0}' collides with a top-level symbol of namespace '{1}'";

    // ==================== Public API surface and generic arity ====================
    /// A public symbol exposes a non-public type.
    PUBLIC_API_NON_PUBLIC = 100, Error,
        "public '{0}' exposes non-public type '{1}' in {2}";
    /// A public symbol exposes a type that is not emitted.
    PUBLIC_API_UNEMITTED = 101, Error, "public '{0}' exposes unemitted type '{1}' in {2}";
    /// Use-site generic arity differs from the declaration.
    GENERIC_ARITY_MISMATCH = 102, Error,
        "'{0}' is used with {1} type arguments but declares {2}";
    /// A primitive generic argument has no lift rule.
    PRIMITIVE_LIFT_UNCOVERED = 103, Error,
        "primitive '{0}' used as a generic argument of '{1}' has no lift rule";
    /// An enum's underlying type has no built-in mapping.
    ENUM_UNDERLYING_UNMAPPED = 104, Error, "enum '{0}' has unmapped underlying type '{1}'";
    /// A delegate signature references an unrepresentable type.
    DELEGATE_SIGNATURE_UNREPRESENTABLE = 105, Error,
        "delegate '{0}' signature cannot be represented: {1}";

    // ==================== Renamer transformations ====================
    /// An identifier matched a reserved word and was transformed.
    RESERVED_WORD_RENAMED = 120, Warning,
        "identifier '{0}' matches a reserved word; emitted as '{1}'";
    /// An external type name was sanitized for emission.
    EXTERNAL_NAME_SANITIZED = 121, Info, "external type name '{0}' sanitized to '{1}'";

    // ==================== Library mode ====================
    /// The supplied library contract could not be read.
    LIBRARY_CONTRACT_UNREADABLE = 130, Error, "library contract at '{0}' is unreadable: {1}";
    /// An emitted symbol falls outside the supplied contract.
    LIBRARY_SYMBOL_OUTSIDE_CONTRACT = 131, Error,
        "emitted symbol '{0}' is not covered by the supplied contract";
    /// A reference of the emitted subset dangles outside contract and builtins.
    LIBRARY_DANGLING_REFERENCE = 132, Error,
        "'{0}' references '{1}' which is neither emitted, in the contract, nor built-in";
    /// A binding disagrees with the emitted surface.
    LIBRARY_BINDING_MISMATCH = 133, Error,
        "binding for '{0}' disagrees with the emitted surface: {1}";
    /// A symbol is both emitted and present in the contract.
    LIBRARY_OVERLAP = 134, Error, "'{0}' is both emitted and present in the contract";

    // ==================== Honest emission ====================
    /// A claimed interface is structurally unsatisfiable; the claim is dropped.
    UNSATISFIABLE_INTERFACE = 150, Warning,
        "type '{0}' cannot structurally satisfy '{1}' ({2} issues); claim dropped";
    /// An honest omission was recorded in metadata.
    HONEST_OMISSION_RECORDED = 151, Info,
        "omission of '{0}' from the implements clause of '{1}' recorded in metadata";

    // ==================== Pipeline control ====================
    /// Validation failed; emission aborted.
    EMISSION_HALTED = 160, Error, "validation failed with {0} error(s); emission aborted";
    /// A warning is forbidden under strict mode.
    STRICT_MODE_VIOLATION = 161, Error, "warning {0} is forbidden under strict mode";
    /// The run was cancelled between passes.
    RUN_CANCELLED = 162, Info, "run cancelled after pass '{0}'";
}

/// Look up the registry entry for a code.
///
/// Panics on an unknown code: codes are compile-time constants, so an
/// unknown code is a bug in the caller, not user input.
#[must_use]
pub fn spec_for(code: DiagnosticCode) -> &'static DiagnosticSpec {
    registry()
        .iter()
        .find(|spec| spec.code == code)
        .unwrap_or_else(|| panic!("unknown diagnostic code {code}"))
}

/// The full registry, in code order.
#[must_use]
pub fn registry() -> &'static [DiagnosticSpec] {
    REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_sorted_and_unique() {
        let mut prev = 0u16;
        for spec in registry() {
            assert!(
                spec.code.0 > prev || prev == 0,
                "registry out of order at {}",
                spec.code
            );
            prev = spec.code.0;
        }
    }

    #[test]
    fn codes_render_with_prefix() {
        assert_eq!(RESERVED_WORD_RENAMED.to_string(), "TBG120");
        assert_eq!(INPUT_NOT_FOUND.to_string(), "TBG001");
    }

    #[test]
    fn spec_lookup_matches_constant() {
        let spec = spec_for(VIEW_ONLY_WITHOUT_SOURCE);
        assert_eq!(spec.name, "VIEW_ONLY_WITHOUT_SOURCE");
        assert_eq!(spec.default_severity, Severity::Error);
    }
}
