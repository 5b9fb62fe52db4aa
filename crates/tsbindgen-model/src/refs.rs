//! Type references.
//!
//! A [`TypeReference`] is the tagged sum every signature position uses.
//! Passes never inspect runtime types of symbols, only these variants.
//! The canonical key (CLR-style `!N` / `!!N` for generic positions) is the
//! textual form used inside canonical signatures and bucketing keys.

use rustc_hash::FxHashSet;
use std::fmt;

/// Who owns a generic parameter position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenericOwner {
    Type,
    Method,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeReference {
    /// A named (possibly generic) type: `System.Collections.Generic.List`1`.
    Named {
        assembly: String,
        full_name: String,
        type_args: Vec<TypeReference>,
    },
    /// A type nested in another: `Outer+Inner` in CLR spelling.
    Nested {
        outer: Box<TypeReference>,
        nested_name: String,
        type_args: Vec<TypeReference>,
    },
    /// A generic parameter of the enclosing type (`!N`) or method (`!!N`).
    GenericParam {
        position: u16,
        owner: GenericOwner,
        name: String,
    },
    Array {
        element: Box<TypeReference>,
        rank: u8,
    },
    Pointer {
        pointee: Box<TypeReference>,
    },
    ByRef {
        referent: Box<TypeReference>,
    },
    /// Used by passes mid-substitution; must never survive a pass boundary.
    Placeholder,
}

impl TypeReference {
    /// Shorthand for a non-generic named reference.
    #[must_use]
    pub fn named(assembly: &str, full_name: &str) -> Self {
        Self::Named {
            assembly: assembly.to_string(),
            full_name: full_name.to_string(),
            type_args: Vec::new(),
        }
    }

    /// Shorthand for a generic named reference.
    #[must_use]
    pub fn generic(assembly: &str, full_name: &str, type_args: Vec<TypeReference>) -> Self {
        Self::Named {
            assembly: assembly.to_string(),
            full_name: full_name.to_string(),
            type_args,
        }
    }

    /// Shorthand for a type-owned generic parameter.
    #[must_use]
    pub fn type_param(position: u16, name: &str) -> Self {
        Self::GenericParam {
            position,
            owner: GenericOwner::Type,
            name: name.to_string(),
        }
    }

    /// Shorthand for a method-owned generic parameter.
    #[must_use]
    pub fn method_param(position: u16, name: &str) -> Self {
        Self::GenericParam {
            position,
            owner: GenericOwner::Method,
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn array(element: TypeReference) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    #[must_use]
    pub fn by_ref(referent: TypeReference) -> Self {
        Self::ByRef {
            referent: Box::new(referent),
        }
    }

    /// The deterministic textual form used in canonical signatures.
    ///
    /// Generic parameters encode positionally (`!0`, `!!1`) so that two
    /// methods differing only in parameter *names* share a signature.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        match self {
            Self::Named {
                full_name,
                type_args,
                ..
            } => {
                if type_args.is_empty() {
                    full_name.clone()
                } else {
                    let args: Vec<String> = type_args.iter().map(Self::canonical_key).collect();
                    format!("{full_name}<{}>", args.join(","))
                }
            }
            Self::Nested {
                outer,
                nested_name,
                type_args,
            } => {
                let base = format!("{}+{nested_name}", outer.canonical_key());
                if type_args.is_empty() {
                    base
                } else {
                    let args: Vec<String> = type_args.iter().map(Self::canonical_key).collect();
                    format!("{base}<{}>", args.join(","))
                }
            }
            Self::GenericParam {
                position,
                owner: GenericOwner::Type,
                ..
            } => format!("!{position}"),
            Self::GenericParam {
                position,
                owner: GenericOwner::Method,
                ..
            } => format!("!!{position}"),
            Self::Array { element, rank } => {
                let commas = ",".repeat(usize::from(*rank) - 1);
                format!("{}[{commas}]", element.canonical_key())
            }
            Self::Pointer { pointee } => format!("{}*", pointee.canonical_key()),
            Self::ByRef { referent } => format!("{}&", referent.canonical_key()),
            Self::Placeholder => "$placeholder".to_string(),
        }
    }

    /// The CLR full name this reference resolves through, if it is (or
    /// wraps) a named type. Arrays, pointers, and byrefs unwrap to their
    /// element; generic parameters and placeholders have none.
    #[must_use]
    pub fn named_root(&self) -> Option<&str> {
        match self {
            Self::Named { full_name, .. } => Some(full_name),
            Self::Nested { outer, .. } => outer.named_root(),
            Self::Array { element, .. } => element.named_root(),
            Self::Pointer { pointee } => pointee.named_root(),
            Self::ByRef { referent } => referent.named_root(),
            Self::GenericParam { .. } | Self::Placeholder => None,
        }
    }

    /// Simple (undotted, arity-stripped) name of a named reference.
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        let full = match self {
            Self::Named { full_name, .. } => full_name.as_str(),
            Self::Nested { nested_name, .. } => nested_name.as_str(),
            _ => return None,
        };
        let last = full.rsplit('.').next().unwrap_or(full);
        Some(last.split('`').next().unwrap_or(last))
    }

    /// Collect every CLR full name referenced anywhere in this reference,
    /// including through type arguments and wrappers.
    pub fn collect_named(&self, out: &mut FxHashSet<String>) {
        match self {
            Self::Named {
                full_name,
                type_args,
                ..
            } => {
                out.insert(full_name.clone());
                for arg in type_args {
                    arg.collect_named(out);
                }
            }
            Self::Nested {
                outer, type_args, ..
            } => {
                outer.collect_named(out);
                for arg in type_args {
                    arg.collect_named(out);
                }
            }
            Self::Array { element, .. } => element.collect_named(out),
            Self::Pointer { pointee } => pointee.collect_named(out),
            Self::ByRef { referent } => referent.collect_named(out),
            Self::GenericParam { .. } | Self::Placeholder => {}
        }
    }

    /// Whether any generic parameter occurs in this reference.
    #[must_use]
    pub fn contains_generic_param(&self) -> bool {
        match self {
            Self::GenericParam { .. } => true,
            Self::Named { type_args, .. } | Self::Nested { type_args, .. } => {
                type_args.iter().any(Self::contains_generic_param)
            }
            Self::Array { element, .. } => element.contains_generic_param(),
            Self::Pointer { pointee } => pointee.contains_generic_param(),
            Self::ByRef { referent } => referent.contains_generic_param(),
            Self::Placeholder => false,
        }
    }

    /// Whether a placeholder occurs anywhere in this reference.
    #[must_use]
    pub fn contains_placeholder(&self) -> bool {
        match self {
            Self::Placeholder => true,
            Self::Named { type_args, .. } | Self::Nested { type_args, .. } => {
                type_args.iter().any(Self::contains_placeholder)
            }
            Self::Array { element, .. } => element.contains_placeholder(),
            Self::Pointer { pointee } => pointee.contains_placeholder(),
            Self::ByRef { referent } => referent.contains_placeholder(),
            Self::GenericParam { .. } => false,
        }
    }

    /// Apply a type-level substitution. Method-owned parameters are never
    /// substituted by a type-level map.
    #[must_use]
    pub fn substitute(&self, subst: &TypeSubstitution) -> TypeReference {
        match self {
            Self::GenericParam {
                position,
                owner: GenericOwner::Type,
                ..
            } => subst
                .get(*position)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Self::GenericParam {
                owner: GenericOwner::Method,
                ..
            } => self.clone(),
            Self::Named {
                assembly,
                full_name,
                type_args,
            } => Self::Named {
                assembly: assembly.clone(),
                full_name: full_name.clone(),
                type_args: type_args.iter().map(|a| a.substitute(subst)).collect(),
            },
            Self::Nested {
                outer,
                nested_name,
                type_args,
            } => Self::Nested {
                outer: Box::new(outer.substitute(subst)),
                nested_name: nested_name.clone(),
                type_args: type_args.iter().map(|a| a.substitute(subst)).collect(),
            },
            Self::Array { element, rank } => Self::Array {
                element: Box::new(element.substitute(subst)),
                rank: *rank,
            },
            Self::Pointer { pointee } => Self::Pointer {
                pointee: Box::new(pointee.substitute(subst)),
            },
            Self::ByRef { referent } => Self::ByRef {
                referent: Box::new(referent.substitute(subst)),
            },
            Self::Placeholder => Self::Placeholder,
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_key())
    }
}

/// A positional map from type-owned generic parameters to references.
///
/// Substitutions compose along interface-extension chains: applying
/// `parent.then(current)` first rewrites `current`'s targets with `parent`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSubstitution {
    args: Vec<TypeReference>,
}

impl TypeSubstitution {
    /// The identity substitution.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(args: Vec<TypeReference>) -> Self {
        Self { args }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.args.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: u16) -> Option<&TypeReference> {
        self.args.get(usize::from(position))
    }

    /// Compose: the resulting substitution is `self ∘ other`, i.e. apply
    /// `other` first, then rewrite its outputs through `self`.
    #[must_use]
    pub fn then(&self, other: &TypeSubstitution) -> TypeSubstitution {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        TypeSubstitution {
            args: other.args.iter().map(|a| a.substitute(self)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_keys_are_positional() {
        let t = TypeReference::generic(
            "mscorlib",
            "System.Collections.Generic.Dictionary`2",
            vec![
                TypeReference::type_param(0, "TKey"),
                TypeReference::method_param(1, "TLocal"),
            ],
        );
        assert_eq!(
            t.canonical_key(),
            "System.Collections.Generic.Dictionary`2<!0,!!1>"
        );
    }

    #[test]
    fn array_rank_encoding() {
        let t = TypeReference::Array {
            element: Box::new(TypeReference::named("mscorlib", "System.Int32")),
            rank: 2,
        };
        assert_eq!(t.canonical_key(), "System.Int32[,]");
    }

    #[test]
    fn substitution_skips_method_params() {
        let subst = TypeSubstitution::new(vec![TypeReference::named("mscorlib", "System.String")]);
        let type_param = TypeReference::type_param(0, "T");
        let method_param = TypeReference::method_param(0, "U");
        assert_eq!(
            type_param.substitute(&subst).canonical_key(),
            "System.String"
        );
        assert_eq!(method_param.substitute(&subst).canonical_key(), "!!0");
    }

    #[test]
    fn substitution_composes_parent_then_current() {
        // interface chain: I2<string> : I1<T>, so I1's !0 maps through
        // current (!0 -> !0 of I2) then parent (!0 of I2 -> string).
        let parent = TypeSubstitution::new(vec![TypeReference::named("mscorlib", "System.String")]);
        let current = TypeSubstitution::new(vec![TypeReference::type_param(0, "T")]);
        let composed = parent.then(&current);
        let p = TypeReference::type_param(0, "T");
        assert_eq!(p.substitute(&composed).canonical_key(), "System.String");
    }

    #[test]
    fn simple_name_strips_arity_and_dots() {
        let t = TypeReference::named("mscorlib", "System.Collections.Generic.List`1");
        assert_eq!(t.simple_name(), Some("List"));
    }
}
