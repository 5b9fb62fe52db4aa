//! Type symbols.

use crate::ids::StableId;
use crate::members::{Constructor, Event, Field, Method, Property};
use crate::refs::TypeReference;
use indexmap::IndexSet;

/// The tagged kind of a type symbol. Passes dispatch on this, never on
/// runtime type information.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    /// A class that only exists to host statics (emitted as a namespace-like
    /// object).
    StaticNamespace,
}

impl TypeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
            Self::StaticNamespace => "static-namespace",
        }
    }

    /// Kinds that may carry an implements-list.
    #[must_use]
    pub const fn carries_interfaces(self) -> bool {
        matches!(self, Self::Class | Self::Struct | Self::Interface)
    }
}

/// Variance annotation on a generic parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variance {
    #[default]
    Invariant,
    Covariant,
    Contravariant,
}

/// A generic parameter declared by a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericParamDecl {
    pub name: String,
    pub position: u16,
    pub variance: Variance,
    pub constraints: Vec<TypeReference>,
}

impl GenericParamDecl {
    #[must_use]
    pub fn new(position: u16, name: &str) -> Self {
        Self {
            name: name.to_string(),
            position,
            variance: Variance::Invariant,
            constraints: Vec::new(),
        }
    }
}

/// One literal of an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumLiteral {
    pub clr_name: String,
    pub value: i64,
}

/// The signature of a delegate type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelegateSignature {
    pub params: Vec<crate::members::Parameter>,
    pub return_type: TypeReference,
}

/// An explicit interface view: a property on the class that exposes the
/// subset of members required by an interface the class cannot satisfy
/// structurally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplicitView {
    pub interface_ref: TypeReference,
    /// `As_<sanitized-interface-simple-name>`, disambiguated by suffix.
    pub view_property_name: String,
}

/// The ordered member collection of a type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberCollection {
    pub constructors: Vec<Constructor>,
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
    pub fields: Vec<Field>,
    pub events: Vec<Event>,
}

impl MemberCollection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
            && self.methods.is_empty()
            && self.properties.is_empty()
            && self.fields.is_empty()
            && self.events.is_empty()
    }

    /// Stable ids of every member, in collection order.
    #[must_use]
    pub fn stable_ids(&self) -> Vec<&StableId> {
        let mut out = Vec::new();
        out.extend(self.constructors.iter().map(|c| &c.stable_id));
        out.extend(self.methods.iter().map(|m| &m.stable_id));
        out.extend(self.properties.iter().map(|p| &p.stable_id));
        out.extend(self.fields.iter().map(|f| &f.stable_id));
        out.extend(self.events.iter().map(|e| &e.stable_id));
        out
    }

    /// Whether any non-static, non-constructor member exists.
    #[must_use]
    pub fn has_instance_members(&self) -> bool {
        self.methods.iter().any(|m| !m.is_static())
            || self.properties.iter().any(|p| !p.is_static())
            || self.fields.iter().any(|f| !f.is_static())
            || self.events.iter().any(|e| !e.is_static())
    }

    /// Whether any static member exists.
    #[must_use]
    pub fn has_static_members(&self) -> bool {
        self.methods.iter().any(Method::is_static)
            || self.properties.iter().any(Property::is_static)
            || self.fields.iter().any(Field::is_static)
            || self.events.iter().any(Event::is_static)
    }
}

/// A namespace-scoped type and everything the emitter needs to know about
/// it. Purely data; equality and hashing key on the stable id.
#[derive(Clone, Debug)]
pub struct TypeSymbol {
    pub stable_id: StableId,
    /// Simple CLR name with arity suffix (`` List`1 ``).
    pub clr_name: String,
    /// Namespace-qualified CLR name.
    pub clr_full_name: String,
    pub namespace: String,
    pub assembly: String,
    pub kind: TypeKind,
    pub visibility: crate::members::Visibility,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_static: bool,
    pub generic_params: Vec<GenericParamDecl>,
    /// Only classes carry a base.
    pub base: Option<TypeReference>,
    /// Direct interface list; cleared on interfaces by inlining.
    pub interfaces: Vec<TypeReference>,
    pub members: MemberCollection,
    pub explicit_views: Vec<ExplicitView>,
    pub origin_assemblies: IndexSet<String>,
    /// Enums only.
    pub enum_underlying: Option<TypeReference>,
    pub enum_literals: Vec<EnumLiteral>,
    /// Delegates only.
    pub delegate_signature: Option<DelegateSignature>,
}

impl PartialEq for TypeSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.stable_id == other.stable_id
    }
}

impl Eq for TypeSymbol {}

impl std::hash::Hash for TypeSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.stable_id.hash(state);
    }
}

impl TypeSymbol {
    /// Declared generic arity.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.generic_params.len()
    }

    /// A type reference to this symbol with its own parameters as
    /// arguments (the "open" form).
    #[must_use]
    pub fn self_reference(&self) -> TypeReference {
        TypeReference::Named {
            assembly: self.assembly.clone(),
            full_name: self.clr_full_name.clone(),
            type_args: self
                .generic_params
                .iter()
                .map(|p| TypeReference::type_param(p.position, &p.name))
                .collect(),
        }
    }

    /// Static-only: no instance members and at least one static member.
    /// Constructors do not count either way.
    #[must_use]
    pub fn is_static_only(&self) -> bool {
        !self.members.has_instance_members() && self.members.has_static_members()
    }

    /// Check the kind invariants of the model. Returns the first violation.
    #[must_use]
    pub fn kind_violation(&self) -> Option<String> {
        if self.base.is_some() && self.kind != TypeKind::Class {
            return Some(format!("{} carries a base type", self.kind.as_str()));
        }
        if !self.interfaces.is_empty() && !self.kind.carries_interfaces() {
            return Some(format!("{} carries an implements-list", self.kind.as_str()));
        }
        match self.kind {
            TypeKind::Enum => {
                if self.enum_underlying.is_none() {
                    return Some("enum without underlying type".to_string());
                }
            }
            TypeKind::Delegate => {
                if self.delegate_signature.is_none() {
                    return Some("delegate without signature".to_string());
                }
            }
            _ => {
                if self.enum_underlying.is_some() || !self.enum_literals.is_empty() {
                    return Some(format!("{} carries enum payload", self.kind.as_str()));
                }
                if self.delegate_signature.is_some() {
                    return Some(format!("{} carries delegate payload", self.kind.as_str()));
                }
            }
        }
        None
    }
}
