//! Renamer scopes.
//!
//! A scope is a context string under which names are disambiguated. The
//! grammar is closed:
//!
//! - `ns:<Namespace>:public` / `ns:<Namespace>:internal`: top-level
//!   exported / hidden symbols of a namespace
//! - `type:<TypeFullName>`: base scope for a type's members; surfaces are
//!   `type:<TypeFullName>#instance` and `type:<TypeFullName>#static`
//! - `view:<TypeStableId>:<InterfaceStableId>`: base scope for an explicit
//!   view's members, with the same `#instance`/`#static` surfaces
//!
//! Reservations use base scopes (the renamer appends the side suffix);
//! lookups use surface scopes. Mixing the two is an invariant violation
//! the phase gate reports.

use std::fmt;
use tsbindgen_model::StableId;

/// Which side of a type surface a member lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Instance,
    Static,
}

impl Side {
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Instance => "#instance",
            Self::Static => "#static",
        }
    }

    #[must_use]
    pub const fn for_static(is_static: bool) -> Self {
        if is_static { Self::Static } else { Self::Instance }
    }
}

/// The syntactic form of a scope string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeForm {
    NamespacePublic,
    NamespaceInternal,
    TypeBase,
    TypeSurface,
    ViewBase,
    ViewSurface,
    Unknown,
}

impl ScopeForm {
    /// Surface scopes are the only valid lookup scopes for members.
    #[must_use]
    pub const fn is_surface(self) -> bool {
        matches!(
            self,
            Self::NamespacePublic | Self::NamespaceInternal | Self::TypeSurface | Self::ViewSurface
        )
    }
}

/// A canonical scope string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scope(String);

impl Scope {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the string against the closed grammar.
    #[must_use]
    pub fn form(&self) -> ScopeForm {
        let s = self.0.as_str();
        if let Some(rest) = s.strip_prefix("ns:") {
            if rest.ends_with(":public") {
                return ScopeForm::NamespacePublic;
            }
            if rest.ends_with(":internal") {
                return ScopeForm::NamespaceInternal;
            }
            return ScopeForm::Unknown;
        }
        let surfaced = s.ends_with("#instance") || s.ends_with("#static");
        if s.starts_with("type:") {
            return if surfaced {
                ScopeForm::TypeSurface
            } else {
                ScopeForm::TypeBase
            };
        }
        if s.starts_with("view:") {
            return if surfaced {
                ScopeForm::ViewSurface
            } else {
                ScopeForm::ViewBase
            };
        }
        ScopeForm::Unknown
    }

    /// Derive the surface scope for one side of this base scope.
    /// Panics if the scope already carries a side suffix; that is a caller
    /// bug, not an input condition.
    #[must_use]
    pub fn surface(&self, side: Side) -> Scope {
        assert!(
            matches!(self.form(), ScopeForm::TypeBase | ScopeForm::ViewBase),
            "side suffix applied to non-base scope '{}'",
            self.0
        );
        Scope(format!("{}{}", self.0, side.suffix()))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds scopes; the only way to obtain one.
pub struct ScopeFactory;

impl ScopeFactory {
    /// Exported symbols of a namespace.
    #[must_use]
    pub fn namespace_public(namespace: &str) -> Scope {
        Scope(format!("ns:{namespace}:public"))
    }

    /// Hidden (non-exported) symbols of a namespace.
    #[must_use]
    pub fn namespace_internal(namespace: &str) -> Scope {
        Scope(format!("ns:{namespace}:internal"))
    }

    /// Base scope for members of a type's class surface.
    #[must_use]
    pub fn type_base(type_full_name: &str) -> Scope {
        Scope(format!("type:{type_full_name}"))
    }

    /// Base scope for members of an explicit interface view.
    #[must_use]
    pub fn view_base(type_id: &StableId, interface_id: &StableId) -> Scope {
        Scope(format!("view:{type_id}:{interface_id}"))
    }
}
