//! Member records.
//!
//! Every member carries its CLR name, stable id, emission role
//! ([`EmitScope`]), rewrite origin ([`Provenance`]), modifier flags, and,
//! when the member lives on an explicit interface view, the interface it
//! came from. The canonical signature functions here are the single
//! encoding used for stable ids, overload dedup, and conformance matching.

use crate::ids::StableId;
use crate::refs::TypeReference;
use bitflags::bitflags;
use serde::Serialize;

/// The role a member plays in emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EmitScope {
    /// Emitted on the class surface.
    ClassSurface,
    /// Emitted only inside an explicit interface view.
    ViewOnly,
    /// Not emitted; preserved in metadata.
    Omitted,
}

impl EmitScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClassSurface => "ClassSurface",
            Self::ViewOnly => "ViewOnly",
            Self::Omitted => "Omitted",
        }
    }
}

/// Why a member exists in its current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Provenance {
    Declared,
    Inherited,
    FromInterface,
    Synthesized,
    BaseOverload,
    DiamondResolved,
    ExtensionMethod,
}

impl Provenance {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declared => "Declared",
            Self::Inherited => "Inherited",
            Self::FromInterface => "FromInterface",
            Self::Synthesized => "Synthesized",
            Self::BaseOverload => "BaseOverload",
            Self::DiamondResolved => "DiamondResolved",
            Self::ExtensionMethod => "ExtensionMethod",
        }
    }
}

/// CLR accessibility, collapsed to what emission distinguishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

bitflags! {
    /// CLR member modifiers that survive into the model.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MemberFlags: u8 {
        const STATIC   = 1 << 0;
        const VIRTUAL  = 1 << 1;
        const ABSTRACT = 1 << 2;
        const OVERRIDE = 1 << 3;
        const SEALED   = 1 << 4;
    }
}

/// A parameter of a method, constructor, indexer, or delegate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeReference,
    pub optional: bool,
}

impl Parameter {
    #[must_use]
    pub fn new(name: &str, ty: TypeReference) -> Self {
        Self {
            name: name.to_string(),
            ty,
            optional: false,
        }
    }
}

fn params_key(params: &[Parameter]) -> String {
    let keys: Vec<String> = params.iter().map(|p| p.ty.canonical_key()).collect();
    keys.join(",")
}

fn static_marker(flags: MemberFlags) -> &'static str {
    if flags.contains(MemberFlags::STATIC) {
        "#static"
    } else {
        ""
    }
}

// =============================================================================
// Methods
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub clr_name: String,
    pub stable_id: StableId,
    pub params: Vec<Parameter>,
    pub return_type: TypeReference,
    /// Method-owned generic parameter names, in declaration order.
    pub generic_params: Vec<String>,
    pub flags: MemberFlags,
    pub visibility: Visibility,
    pub emit_scope: EmitScope,
    pub provenance: Provenance,
    /// Required when `emit_scope` is `ViewOnly`.
    pub source_interface: Option<TypeReference>,
    /// True for `this`-parameter extension methods.
    pub is_extension: bool,
}

impl Method {
    /// `` `A(p1,p2):ret[#static] ``: kind, arity, parameter types, return
    /// type, and staticness in one deterministic string.
    #[must_use]
    pub fn canonical_signature(&self) -> String {
        format!(
            "`{}({}):{}{}",
            self.generic_params.len(),
            params_key(&self.params),
            self.return_type.canonical_key(),
            static_marker(self.flags),
        )
    }

    /// The stable id this method would carry if declared on another type.
    /// Base-overload completion compares against these.
    #[must_use]
    pub fn expected_id_on(&self, assembly: &str, declaring_full_name: &str) -> StableId {
        StableId::member(
            assembly,
            declaring_full_name,
            &self.clr_name,
            &self.canonical_signature(),
        )
    }

    /// Name + signature; the overload-dedup key.
    #[must_use]
    pub fn signature_key(&self) -> String {
        format!("{}{}", self.clr_name, self.canonical_signature())
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    #[must_use]
    pub fn is_override(&self) -> bool {
        self.flags.contains(MemberFlags::OVERRIDE)
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.generic_params.len()
    }
}

// =============================================================================
// Properties
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub clr_name: String,
    pub stable_id: StableId,
    pub property_type: TypeReference,
    pub has_getter: bool,
    pub has_setter: bool,
    /// Non-empty for indexers.
    pub index_params: Vec<Parameter>,
    pub flags: MemberFlags,
    pub visibility: Visibility,
    pub emit_scope: EmitScope,
    pub provenance: Provenance,
    pub source_interface: Option<TypeReference>,
}

impl Property {
    #[must_use]
    pub fn canonical_signature(&self) -> String {
        format!(
            ":prop({}):{}{}",
            params_key(&self.index_params),
            self.property_type.canonical_key(),
            static_marker(self.flags),
        )
    }

    #[must_use]
    pub fn expected_id_on(&self, assembly: &str, declaring_full_name: &str) -> StableId {
        StableId::member(
            assembly,
            declaring_full_name,
            &self.clr_name,
            &self.canonical_signature(),
        )
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    #[must_use]
    pub fn is_indexer(&self) -> bool {
        !self.index_params.is_empty()
    }
}

// =============================================================================
// Fields
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub clr_name: String,
    pub stable_id: StableId,
    pub field_type: TypeReference,
    pub is_const: bool,
    pub flags: MemberFlags,
    pub visibility: Visibility,
    pub emit_scope: EmitScope,
    pub provenance: Provenance,
    pub source_interface: Option<TypeReference>,
}

impl Field {
    #[must_use]
    pub fn canonical_signature(&self) -> String {
        format!(
            ":field:{}{}",
            self.field_type.canonical_key(),
            static_marker(self.flags),
        )
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC) || self.is_const
    }
}

// =============================================================================
// Events
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub clr_name: String,
    pub stable_id: StableId,
    pub handler_type: TypeReference,
    pub flags: MemberFlags,
    pub visibility: Visibility,
    pub emit_scope: EmitScope,
    pub provenance: Provenance,
    pub source_interface: Option<TypeReference>,
}

impl Event {
    #[must_use]
    pub fn canonical_signature(&self) -> String {
        format!(
            ":event:{}{}",
            self.handler_type.canonical_key(),
            static_marker(self.flags),
        )
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }
}

// =============================================================================
// Constructors
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    pub stable_id: StableId,
    pub params: Vec<Parameter>,
    pub visibility: Visibility,
    pub emit_scope: EmitScope,
    pub provenance: Provenance,
}

impl Constructor {
    pub const CLR_NAME: &'static str = ".ctor";

    #[must_use]
    pub fn canonical_signature(&self) -> String {
        format!(":ctor({})", params_key(&self.params))
    }
}
