//! The immutable symbol model.
//!
//! This crate is purely data: namespaces, types, members, type references,
//! and the [`SymbolGraph`] that ties them together. Identity is always the
//! [`StableId`] string; object identity is never relied upon. All rewriting
//! happens through functional updates that return a new graph value.
//!
//! The loader contract ([`MetadataLoader`]) is the only inbound interface;
//! the deterministic [`fixture`] builder backs tests across the workspace.

pub mod ids;
pub use ids::StableId;

pub mod refs;
pub use refs::{GenericOwner, TypeReference, TypeSubstitution};

pub mod members;
pub use members::{
    Constructor, EmitScope, Event, Field, MemberFlags, Method, Parameter, Property, Provenance,
    Visibility,
};

pub mod types;
pub use types::{
    DelegateSignature, EnumLiteral, ExplicitView, GenericParamDecl, MemberCollection, TypeKind,
    TypeSymbol, Variance,
};

pub mod namespace;
pub use namespace::NamespaceSymbol;

pub mod graph;
pub use graph::SymbolGraph;

pub mod loader;
pub use loader::{LoadError, MetadataLoader};

pub mod fixture;
pub use fixture::{FixtureLoader, GraphBuilder};
