//! Namespace symbols.

use crate::ids::StableId;
use indexmap::IndexSet;

/// A namespace and the types it exposes. The empty-name namespace is the
/// root and is emitted under `_root/` rather than a dotted directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceSymbol {
    /// Dotted name; empty means the global namespace.
    pub name: String,
    /// Stable ids of member types, in insertion order.
    pub types: IndexSet<StableId>,
    pub contributing_assemblies: IndexSet<String>,
}

impl NamespaceSymbol {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: IndexSet::new(),
            contributing_assemblies: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn stable_id(&self) -> StableId {
        StableId::namespace(&self.name)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Directory name in the output layout.
    #[must_use]
    pub fn directory_name(&self) -> &str {
        if self.is_root() { "_root" } else { &self.name }
    }
}
