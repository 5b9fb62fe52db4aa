//! Shared build options.
//!
//! These are the knobs the CLI exposes; library embedders construct
//! [`BuildOptions`] directly.

/// Name-transform strategy applied to one symbol class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameTransform {
    /// Keep the CLR spelling.
    #[default]
    None,
    /// Lower-case the first character (`GetValue` → `getValue`).
    CamelCase,
}

impl NameTransform {
    /// Apply the transform to a CLR identifier.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::None => name.to_string(),
            Self::CamelCase => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Per-symbol-class name transforms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NameTransformSet {
    pub namespaces: NameTransform,
    pub classes: NameTransform,
    pub interfaces: NameTransform,
    pub methods: NameTransform,
    pub properties: NameTransform,
    pub enum_members: NameTransform,
}

/// How the diamond resolver treats conflicting flattened signatures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiamondStrategy {
    /// Diagnose and leave the graph unchanged.
    Error,
    /// Keep all signatures; the renamer disambiguates where needed.
    #[default]
    OverloadAll,
    /// Keep the most-derived signature only.
    PreferDerived,
}

impl DiamondStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::OverloadAll => "OverloadAll",
            Self::PreferDerived => "PreferDerived",
        }
    }
}

/// How identifiers that collide with target-language reserved words are
/// transformed. The transformation is always recorded as a diagnostic;
/// a reserved word is never emitted verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReservedWordStrategy {
    /// Prefix with a single underscore (`default` → `_default`).
    #[default]
    UnderscorePrefix,
    /// Suffix with a single underscore (`default` → `default_`).
    UnderscoreSuffix,
}

impl ReservedWordStrategy {
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::UnderscorePrefix => format!("_{name}"),
            Self::UnderscoreSuffix => format!("{name}_"),
        }
    }
}

/// Options threaded through the whole pipeline.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    pub transforms: NameTransformSet,
    pub diamond_strategy: DiamondStrategy,
    pub reserved_words: ReservedWordStrategy,
    /// Namespaces to include; empty means all.
    pub namespace_filter: Vec<String>,
    /// Path of a prior output directory acting as the library contract.
    pub library_contract: Option<std::path::PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_lowers_first_char_only() {
        assert_eq!(NameTransform::CamelCase.apply("GetValue"), "getValue");
        assert_eq!(NameTransform::CamelCase.apply("X"), "x");
        assert_eq!(NameTransform::None.apply("GetValue"), "GetValue");
    }

    #[test]
    fn reserved_word_strategies() {
        assert_eq!(
            ReservedWordStrategy::UnderscorePrefix.apply("default"),
            "_default"
        );
        assert_eq!(
            ReservedWordStrategy::UnderscoreSuffix.apply("default"),
            "default_"
        );
    }
}
