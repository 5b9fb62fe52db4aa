//! Target-language reserved words and identifier sanitizing.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Words that may never appear verbatim as an emitted identifier.
/// Covers ES reserved words, TypeScript strict-mode reservations, and the
/// contextual keywords that break in declaration position.
static RESERVED_WORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        // ES reserved
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
        "true", "try", "typeof", "var", "void", "while", "with",
        // strict mode
        "implements", "interface", "let", "package", "private", "protected", "public", "static",
        "yield",
        // contextual, unsafe in declaration position
        "any", "as", "async", "await", "boolean", "constructor", "declare", "get", "infer",
        "is", "keyof", "module", "namespace", "never", "number", "object", "readonly", "require",
        "set", "string", "symbol", "type", "undefined", "unique", "unknown",
    ]
    .into_iter()
    .collect()
});

#[must_use]
pub fn is_reserved_word(ident: &str) -> bool {
    RESERVED_WORDS.contains(ident)
}

/// Rewrite a CLR name into a syntactically valid target identifier.
///
/// CLR arity backticks become underscores (`` List`1 `` → `List_1`), and
/// every other non-identifier character (nested-type `+`, explicit-impl
/// dots, angle brackets of compiler-generated names) becomes `_`.
/// Reserved-word handling is the renamer's job, not this function's.
#[must_use]
pub fn sanitize_identifier(clr_name: &str) -> String {
    let mut out = String::with_capacity(clr_name.len());
    for (i, ch) in clr_name.chars().enumerate() {
        let valid = ch == '_' || ch == '$' || ch.is_ascii_alphabetic() || (i > 0 && ch.is_ascii_digit());
        if valid {
            out.push(ch);
        } else if ch == '`' {
            out.push('_');
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_reserved() {
        assert!(is_reserved_word("default"));
        assert!(is_reserved_word("type"));
        assert!(is_reserved_word("constructor"));
        assert!(!is_reserved_word("Default"));
        assert!(!is_reserved_word("value"));
    }

    #[test]
    fn sanitize_rewrites_clr_punctuation() {
        assert_eq!(sanitize_identifier("List`1"), "List_1");
        assert_eq!(sanitize_identifier("Outer+Inner"), "Outer_Inner");
        assert_eq!(sanitize_identifier("<Module>"), "_Module_");
        assert_eq!(sanitize_identifier("1Bad"), "_Bad");
    }
}
