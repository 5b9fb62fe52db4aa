//! Deterministic in-memory graph construction.
//!
//! Tests across the workspace build graphs through these builders instead
//! of loading real assemblies. The builders compute stable ids exactly the
//! way a metadata loader would, so id-based behavior (overload completion,
//! plan integrity) is exercised for real.

use crate::graph::SymbolGraph;
use crate::ids::StableId;
use crate::loader::{LoadError, MetadataLoader};
use crate::members::{
    Constructor, EmitScope, Event, Field, MemberFlags, Method, Parameter, Property, Provenance,
    Visibility,
};
use crate::refs::TypeReference;
use crate::types::{
    DelegateSignature, EnumLiteral, GenericParamDecl, MemberCollection, TypeKind, TypeSymbol,
};
use std::path::PathBuf;

/// Assembly name used by fixture graphs.
pub const TEST_ASSEMBLY: &str = "Acme.Core";

/// A reference to a fixture-assembly type.
#[must_use]
pub fn named(full_name: &str) -> TypeReference {
    TypeReference::named(TEST_ASSEMBLY, full_name)
}

/// A reference to a core-library type.
#[must_use]
pub fn system(full_name: &str) -> TypeReference {
    TypeReference::named("System.Runtime", full_name)
}

/// `System.Void`.
#[must_use]
pub fn void() -> TypeReference {
    system("System.Void")
}

// =============================================================================
// Method builder
// =============================================================================

pub struct MethodBuilder {
    clr_name: String,
    params: Vec<Parameter>,
    return_type: TypeReference,
    generic_params: Vec<String>,
    flags: MemberFlags,
    visibility: Visibility,
    emit_scope: EmitScope,
    provenance: Provenance,
    source_interface: Option<TypeReference>,
    is_extension: bool,
}

impl MethodBuilder {
    fn new(name: &str) -> Self {
        Self {
            clr_name: name.to_string(),
            params: Vec::new(),
            return_type: void(),
            generic_params: Vec::new(),
            flags: MemberFlags::default(),
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
            source_interface: None,
            is_extension: false,
        }
    }

    #[must_use]
    pub fn param(mut self, name: &str, ty: TypeReference) -> Self {
        self.params.push(Parameter::new(name, ty));
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeReference) -> Self {
        self.return_type = ty;
        self
    }

    #[must_use]
    pub fn generic(mut self, name: &str) -> Self {
        self.generic_params.push(name.to_string());
        self
    }

    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= MemberFlags::STATIC;
        self
    }

    #[must_use]
    pub fn virtual_(mut self) -> Self {
        self.flags |= MemberFlags::VIRTUAL;
        self
    }

    #[must_use]
    pub fn override_(mut self) -> Self {
        self.flags |= MemberFlags::OVERRIDE;
        self
    }

    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.flags |= MemberFlags::ABSTRACT;
        self
    }

    #[must_use]
    pub fn extension(mut self) -> Self {
        self.is_extension = true;
        self.flags |= MemberFlags::STATIC;
        self
    }

    #[must_use]
    pub fn internal(mut self) -> Self {
        self.visibility = Visibility::Internal;
        self
    }

    fn build(self, assembly: &str, declaring_full_name: &str) -> Method {
        let mut method = Method {
            clr_name: self.clr_name,
            stable_id: StableId::raw("pending"),
            params: self.params,
            return_type: self.return_type,
            generic_params: self.generic_params,
            flags: self.flags,
            visibility: self.visibility,
            emit_scope: self.emit_scope,
            provenance: self.provenance,
            source_interface: self.source_interface,
            is_extension: self.is_extension,
        };
        method.stable_id = method.expected_id_on(assembly, declaring_full_name);
        method
    }
}

// =============================================================================
// Type builder
// =============================================================================

pub struct TypeBuilder {
    sym: TypeSymbol,
}

impl TypeBuilder {
    fn new(kind: TypeKind, full_name: &str) -> Self {
        let (namespace, clr_name) = match full_name.rsplit_once('.') {
            Some((ns, simple)) => (ns.to_string(), simple.to_string()),
            None => (String::new(), full_name.to_string()),
        };
        let mut origin_assemblies = indexmap::IndexSet::new();
        origin_assemblies.insert(TEST_ASSEMBLY.to_string());
        Self {
            sym: TypeSymbol {
                stable_id: StableId::type_id(TEST_ASSEMBLY, full_name),
                clr_name,
                clr_full_name: full_name.to_string(),
                namespace,
                assembly: TEST_ASSEMBLY.to_string(),
                kind,
                visibility: Visibility::Public,
                is_abstract: false,
                is_sealed: false,
                is_static: false,
                generic_params: Vec::new(),
                base: None,
                interfaces: Vec::new(),
                members: MemberCollection::default(),
                explicit_views: Vec::new(),
                origin_assemblies,
                enum_underlying: None,
                enum_literals: Vec::new(),
                delegate_signature: None,
            },
        }
    }

    #[must_use]
    pub fn class(full_name: &str) -> Self {
        Self::new(TypeKind::Class, full_name)
    }

    #[must_use]
    pub fn static_class(full_name: &str) -> Self {
        let mut b = Self::new(TypeKind::Class, full_name);
        b.sym.is_static = true;
        b.sym.is_abstract = true;
        b.sym.is_sealed = true;
        b
    }

    #[must_use]
    pub fn interface(full_name: &str) -> Self {
        let mut b = Self::new(TypeKind::Interface, full_name);
        b.sym.is_abstract = true;
        b
    }

    #[must_use]
    pub fn value_type(full_name: &str) -> Self {
        let mut b = Self::new(TypeKind::Struct, full_name);
        b.sym.is_sealed = true;
        b
    }

    #[must_use]
    pub fn enumeration(full_name: &str) -> Self {
        let mut b = Self::new(TypeKind::Enum, full_name);
        b.sym.is_sealed = true;
        b.sym.enum_underlying = Some(system("System.Int32"));
        b
    }

    #[must_use]
    pub fn delegate(full_name: &str, params: Vec<Parameter>, return_type: TypeReference) -> Self {
        let mut b = Self::new(TypeKind::Delegate, full_name);
        b.sym.is_sealed = true;
        b.sym.delegate_signature = Some(DelegateSignature {
            params,
            return_type,
        });
        b
    }

    #[must_use]
    pub fn base(mut self, base: TypeReference) -> Self {
        self.sym.base = Some(base);
        self
    }

    #[must_use]
    pub fn implements(mut self, iface: TypeReference) -> Self {
        self.sym.interfaces.push(iface);
        self
    }

    #[must_use]
    pub fn generic(mut self, name: &str) -> Self {
        let position = u16::try_from(self.sym.generic_params.len()).expect("arity fits u16");
        self.sym
            .generic_params
            .push(GenericParamDecl::new(position, name));
        // The CLR spelling carries the arity suffix.
        let arity = self.sym.generic_params.len();
        let bare = self
            .sym
            .clr_name
            .split('`')
            .next()
            .expect("split yields at least one part")
            .to_string();
        self.sym.clr_name = format!("{bare}`{arity}");
        self.sym.clr_full_name = if self.sym.namespace.is_empty() {
            self.sym.clr_name.clone()
        } else {
            format!("{}.{}", self.sym.namespace, self.sym.clr_name)
        };
        self.sym.stable_id = StableId::type_id(&self.sym.assembly, &self.sym.clr_full_name);
        self
    }

    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.sym.is_abstract = true;
        self
    }

    #[must_use]
    pub fn internal(mut self) -> Self {
        self.sym.visibility = Visibility::Internal;
        self
    }

    #[must_use]
    pub fn method(mut self, name: &str, f: impl FnOnce(MethodBuilder) -> MethodBuilder) -> Self {
        let method = f(MethodBuilder::new(name)).build(&self.sym.assembly, &self.sym.clr_full_name);
        self.sym.members.methods.push(method);
        self
    }

    #[must_use]
    pub fn property(mut self, name: &str, ty: TypeReference) -> Self {
        self.push_property(name, ty, MemberFlags::default(), Vec::new());
        self
    }

    #[must_use]
    pub fn static_property(mut self, name: &str, ty: TypeReference) -> Self {
        self.push_property(name, ty, MemberFlags::STATIC, Vec::new());
        self
    }

    #[must_use]
    pub fn indexer(mut self, ty: TypeReference, index_params: Vec<Parameter>) -> Self {
        self.push_property("Item", ty, MemberFlags::default(), index_params);
        self
    }

    fn push_property(
        &mut self,
        name: &str,
        ty: TypeReference,
        flags: MemberFlags,
        index_params: Vec<Parameter>,
    ) {
        let mut prop = Property {
            clr_name: name.to_string(),
            stable_id: StableId::raw("pending"),
            property_type: ty,
            has_getter: true,
            has_setter: false,
            index_params,
            flags,
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
            source_interface: None,
        };
        prop.stable_id = prop.expected_id_on(&self.sym.assembly, &self.sym.clr_full_name);
        self.sym.members.properties.push(prop);
    }

    #[must_use]
    pub fn field(mut self, name: &str, ty: TypeReference) -> Self {
        self.push_field(name, ty, MemberFlags::default());
        self
    }

    #[must_use]
    pub fn static_field(mut self, name: &str, ty: TypeReference) -> Self {
        self.push_field(name, ty, MemberFlags::STATIC);
        self
    }

    fn push_field(&mut self, name: &str, ty: TypeReference, flags: MemberFlags) {
        let mut field = Field {
            clr_name: name.to_string(),
            stable_id: StableId::raw("pending"),
            field_type: ty,
            is_const: false,
            flags,
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
            source_interface: None,
        };
        field.stable_id = StableId::member(
            &self.sym.assembly,
            &self.sym.clr_full_name,
            &field.clr_name,
            &field.canonical_signature(),
        );
        self.sym.members.fields.push(field);
    }

    #[must_use]
    pub fn event(mut self, name: &str, handler: TypeReference) -> Self {
        let mut event = Event {
            clr_name: name.to_string(),
            stable_id: StableId::raw("pending"),
            handler_type: handler,
            flags: MemberFlags::default(),
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
            source_interface: None,
        };
        event.stable_id = StableId::member(
            &self.sym.assembly,
            &self.sym.clr_full_name,
            &event.clr_name,
            &event.canonical_signature(),
        );
        self.sym.members.events.push(event);
        self
    }

    #[must_use]
    pub fn ctor(mut self, params: Vec<Parameter>) -> Self {
        let mut ctor = Constructor {
            stable_id: StableId::raw("pending"),
            params,
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
        };
        ctor.stable_id = StableId::member(
            &self.sym.assembly,
            &self.sym.clr_full_name,
            Constructor::CLR_NAME,
            &ctor.canonical_signature(),
        );
        self.sym.members.constructors.push(ctor);
        self
    }

    #[must_use]
    pub fn literal(mut self, name: &str, value: i64) -> Self {
        self.sym.enum_literals.push(EnumLiteral {
            clr_name: name.to_string(),
            value,
        });
        self
    }

    #[must_use]
    pub fn build(self) -> TypeSymbol {
        self.sym
    }
}

// =============================================================================
// Graph builder and fixture loader
// =============================================================================

#[derive(Default)]
pub struct GraphBuilder {
    graph: SymbolGraph,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ty(mut self, builder: TypeBuilder) -> Self {
        self.graph.add_type(builder.build());
        self
    }

    #[must_use]
    pub fn build(self) -> SymbolGraph {
        let violations = self.graph.check_invariants();
        assert!(
            violations.is_empty(),
            "fixture graph violates invariants: {violations:?}"
        );
        self.graph
    }
}

/// A [`MetadataLoader`] that serves a pre-built graph, ignoring its inputs.
pub struct FixtureLoader {
    graph: SymbolGraph,
}

impl FixtureLoader {
    #[must_use]
    pub fn new(graph: SymbolGraph) -> Self {
        Self { graph }
    }
}

impl MetadataLoader for FixtureLoader {
    fn load(&self, _inputs: &[PathBuf]) -> Result<SymbolGraph, LoadError> {
        Ok(self.graph.clone())
    }
}
