//! Stable identifiers.
//!
//! A [`StableId`] is a canonical, deterministic string derived exclusively
//! from information intrinsic to the source declaration:
//!
//! - namespace: `ns:<dotted-name>` (the root namespace is `ns:`)
//! - type: `<assembly>:<fully-qualified-name>` including the CLR arity
//!   suffix (`` List`1 ``)
//! - member: `<assembly>:<declaring-fqn>::<name><canonical-signature>`
//!
//! For any two symbols produced by the same inputs, the stable id is
//! bit-equal; it is the only identity key used across passes.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StableId(Arc<str>);

impl StableId {
    /// Wrap an already-canonical id string. Prefer the typed constructors.
    #[must_use]
    pub fn raw(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// `ns:<dotted-name>`; the empty name is the root namespace.
    #[must_use]
    pub fn namespace(dotted: &str) -> Self {
        Self(format!("ns:{dotted}").into())
    }

    /// `<assembly>:<fully-qualified-name>` with arity suffix intact.
    #[must_use]
    pub fn type_id(assembly: &str, full_name: &str) -> Self {
        Self(format!("{assembly}:{full_name}").into())
    }

    /// `<assembly>:<declaring-fqn>::<member-name><canonical-signature>`.
    #[must_use]
    pub fn member(assembly: &str, declaring_full_name: &str, name: &str, signature: &str) -> Self {
        Self(format!("{assembly}:{declaring_full_name}::{name}{signature}").into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `ns:`-prefixed ids.
    #[must_use]
    pub fn is_namespace(&self) -> bool {
        self.0.starts_with("ns:")
    }

    /// True for member ids (they contain the `::` separator).
    #[must_use]
    pub fn is_member(&self) -> bool {
        self.0.contains("::")
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StableId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for StableId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_produce_canonical_forms() {
        assert_eq!(StableId::namespace("System.IO").as_str(), "ns:System.IO");
        assert_eq!(StableId::namespace("").as_str(), "ns:");
        assert_eq!(
            StableId::type_id("mscorlib", "System.Collections.Generic.List`1").as_str(),
            "mscorlib:System.Collections.Generic.List`1"
        );
        let member = StableId::member("mscorlib", "System.String", "Substring", "`0(System.Int32):System.String");
        assert_eq!(
            member.as_str(),
            "mscorlib:System.String::Substring`0(System.Int32):System.String"
        );
        assert!(member.is_member());
        assert!(!member.is_namespace());
    }

    #[test]
    fn ids_order_deterministically() {
        let mut ids = vec![
            StableId::type_id("b", "N.T"),
            StableId::type_id("a", "N.T"),
            StableId::namespace("N"),
        ];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a:N.T");
        assert_eq!(ids[1].as_str(), "b:N.T");
        assert_eq!(ids[2].as_str(), "ns:N");
    }
}
