//! The metadata-file loader.
//!
//! Reading the CLR's binary metadata is the platform-side extractor's
//! job; this loader consumes the JSON graph files that tool dumps (one
//! per assembly) and builds the initial symbol graph. Type references use
//! a compact string grammar:
//!
//! - `System.Int32`: named type
//! - `` Acme.Pool`1<!0:T> ``: generic instantiation, `<…>` nests
//! - `!0:T` / `!!0:U`: type-owned / method-owned generic parameter
//! - `System.Byte[]`, `System.Int32&`, `System.Void*`: array / byref /
//!   pointer suffixes

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tsbindgen_model::{
    Constructor, DelegateSignature, EmitScope, EnumLiteral, Event, Field, GenericParamDecl,
    LoadError, MemberFlags, MetadataLoader, Method, Parameter, Property, Provenance, StableId,
    SymbolGraph, TypeKind, TypeReference, TypeSymbol, Visibility,
};

// =============================================================================
// Input schema
// =============================================================================

#[derive(Deserialize)]
struct AssemblyFile {
    assembly: String,
    types: Vec<TypeEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeEntry {
    full_name: String,
    kind: String,
    #[serde(default = "default_visibility")]
    visibility: String,
    #[serde(default)]
    generics: Vec<String>,
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    #[serde(default)]
    methods: Vec<MethodEntry>,
    #[serde(default)]
    properties: Vec<PropertyEntry>,
    #[serde(default)]
    fields: Vec<FieldEntry>,
    #[serde(default)]
    events: Vec<EventEntry>,
    #[serde(default)]
    ctors: Vec<Vec<ParamEntry>>,
    #[serde(default)]
    underlying: Option<String>,
    #[serde(default)]
    literals: Vec<LiteralEntry>,
    #[serde(default)]
    delegate: Option<DelegateEntry>,
}

fn default_visibility() -> String {
    "public".to_string()
}

#[derive(Deserialize)]
struct ParamEntry {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    optional: bool,
}

#[derive(Deserialize)]
struct MethodEntry {
    name: String,
    #[serde(default)]
    params: Vec<ParamEntry>,
    #[serde(default)]
    returns: Option<String>,
    #[serde(default)]
    generics: Vec<String>,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default, rename = "virtual")]
    is_virtual: bool,
    #[serde(default, rename = "override")]
    is_override: bool,
    #[serde(default)]
    extension: bool,
    #[serde(default)]
    internal: bool,
}

#[derive(Deserialize)]
struct PropertyEntry {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    setter: bool,
    #[serde(default)]
    index: Vec<ParamEntry>,
}

#[derive(Deserialize)]
struct FieldEntry {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default, rename = "const")]
    is_const: bool,
}

#[derive(Deserialize)]
struct EventEntry {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, rename = "static")]
    is_static: bool,
}

#[derive(Deserialize)]
struct LiteralEntry {
    name: String,
    value: i64,
}

#[derive(Deserialize)]
struct DelegateEntry {
    #[serde(default)]
    params: Vec<ParamEntry>,
    #[serde(default)]
    returns: Option<String>,
}

// =============================================================================
// Type-string parsing
// =============================================================================

fn parse_type(s: &str, assembly: &str) -> Result<TypeReference, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty type string".to_string());
    }
    if let Some(rest) = s.strip_suffix("[]") {
        return Ok(TypeReference::Array {
            element: Box::new(parse_type(rest, assembly)?),
            rank: 1,
        });
    }
    if let Some(rest) = s.strip_suffix('&') {
        return Ok(TypeReference::ByRef {
            referent: Box::new(parse_type(rest, assembly)?),
        });
    }
    if let Some(rest) = s.strip_suffix('*') {
        return Ok(TypeReference::Pointer {
            pointee: Box::new(parse_type(rest, assembly)?),
        });
    }
    if let Some(rest) = s.strip_prefix("!!") {
        let (position, name) = rest
            .split_once(':')
            .ok_or_else(|| format!("method param '{s}' lacks ':name'"))?;
        return Ok(TypeReference::method_param(
            position.parse().map_err(|_| format!("bad position in '{s}'"))?,
            name,
        ));
    }
    if let Some(rest) = s.strip_prefix('!') {
        let (position, name) = rest
            .split_once(':')
            .ok_or_else(|| format!("type param '{s}' lacks ':name'"))?;
        return Ok(TypeReference::type_param(
            position.parse().map_err(|_| format!("bad position in '{s}'"))?,
            name,
        ));
    }
    if let Some(open) = s.find('<') {
        if !s.ends_with('>') {
            return Err(format!("unbalanced generic brackets in '{s}'"));
        }
        let name = &s[..open];
        let inner = &s[open + 1..s.len() - 1];
        let mut args = Vec::new();
        for part in split_top_level(inner) {
            args.push(parse_type(part, assembly)?);
        }
        return Ok(TypeReference::Named {
            assembly: assembly_of(name, assembly),
            full_name: name.to_string(),
            type_args: args,
        });
    }
    Ok(TypeReference::Named {
        assembly: assembly_of(s, assembly),
        full_name: s.to_string(),
        type_args: Vec::new(),
    })
}

/// Split on commas outside angle brackets.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

/// Core-library names resolve to the reference assembly; everything else
/// defaults to the declaring file's assembly.
fn assembly_of(full_name: &str, current: &str) -> String {
    if full_name.starts_with("System.") || full_name == "System" {
        "System.Runtime".to_string()
    } else {
        current.to_string()
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Loads pre-extracted JSON graph files.
#[derive(Default)]
pub struct GraphJsonLoader;

impl GraphJsonLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn load_file(&self, path: &Path, graph: &mut SymbolGraph) -> Result<(), LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| LoadError::Unreadable(path.to_path_buf(), e.to_string()))?;
        let file: AssemblyFile = serde_json::from_str(&raw)
            .map_err(|e| LoadError::Malformed(path.to_path_buf(), e.to_string()))?;

        for entry in &file.types {
            let ty = build_type(&file.assembly, entry)
                .map_err(|e| LoadError::Malformed(path.to_path_buf(), e))?;
            graph.add_type(ty);
        }
        debug!(path = %path.display(), types = file.types.len(), "loaded assembly metadata");
        Ok(())
    }
}

impl MetadataLoader for GraphJsonLoader {
    fn load(&self, inputs: &[PathBuf]) -> Result<SymbolGraph, LoadError> {
        if inputs.is_empty() {
            return Err(LoadError::EmptyInputSet);
        }
        let mut graph = SymbolGraph::new();
        for path in inputs {
            self.load_file(path, &mut graph)?;
        }
        Ok(graph)
    }
}

fn parse_visibility(s: &str) -> Visibility {
    match s {
        "internal" => Visibility::Internal,
        "protected" => Visibility::Protected,
        "private" => Visibility::Private,
        _ => Visibility::Public,
    }
}

fn parse_params(entries: &[ParamEntry], assembly: &str) -> Result<Vec<Parameter>, String> {
    entries
        .iter()
        .map(|p| {
            Ok(Parameter {
                name: p.name.clone(),
                ty: parse_type(&p.ty, assembly)?,
                optional: p.optional,
            })
        })
        .collect()
}

fn build_type(assembly: &str, entry: &TypeEntry) -> Result<TypeSymbol, String> {
    let (kind, is_static) = match entry.kind.as_str() {
        "class" => (TypeKind::Class, false),
        "static-class" => (TypeKind::Class, true),
        "struct" => (TypeKind::Struct, false),
        "interface" => (TypeKind::Interface, false),
        "enum" => (TypeKind::Enum, false),
        "delegate" => (TypeKind::Delegate, false),
        "static-namespace" => (TypeKind::StaticNamespace, true),
        other => return Err(format!("unknown type kind '{other}'")),
    };
    let (namespace, clr_name) = match entry.full_name.rsplit_once('.') {
        Some((ns, simple)) => (ns.to_string(), simple.to_string()),
        None => (String::new(), entry.full_name.clone()),
    };

    let void = || TypeReference::named("System.Runtime", "System.Void");
    let mut origin_assemblies = indexmap::IndexSet::new();
    origin_assemblies.insert(assembly.to_string());

    let mut ty = TypeSymbol {
        stable_id: StableId::type_id(assembly, &entry.full_name),
        clr_name,
        clr_full_name: entry.full_name.clone(),
        namespace,
        assembly: assembly.to_string(),
        kind,
        visibility: parse_visibility(&entry.visibility),
        is_abstract: kind == TypeKind::Interface || is_static,
        is_sealed: is_static || matches!(kind, TypeKind::Struct | TypeKind::Enum | TypeKind::Delegate),
        is_static,
        generic_params: entry
            .generics
            .iter()
            .enumerate()
            .map(|(i, name)| GenericParamDecl::new(u16::try_from(i).unwrap_or(0), name))
            .collect(),
        base: entry
            .base
            .as_ref()
            .map(|b| parse_type(b, assembly))
            .transpose()?,
        interfaces: entry
            .interfaces
            .iter()
            .map(|i| parse_type(i, assembly))
            .collect::<Result<_, _>>()?,
        members: tsbindgen_model::MemberCollection::default(),
        explicit_views: Vec::new(),
        origin_assemblies,
        enum_underlying: if kind == TypeKind::Enum {
            Some(match &entry.underlying {
                Some(u) => parse_type(u, assembly)?,
                None => TypeReference::named("System.Runtime", "System.Int32"),
            })
        } else {
            None
        },
        enum_literals: entry
            .literals
            .iter()
            .map(|l| EnumLiteral {
                clr_name: l.name.clone(),
                value: l.value,
            })
            .collect(),
        delegate_signature: entry
            .delegate
            .as_ref()
            .map(|d| {
                Ok::<_, String>(DelegateSignature {
                    params: parse_params(&d.params, assembly)?,
                    return_type: match &d.returns {
                        Some(r) => parse_type(r, assembly)?,
                        None => void(),
                    },
                })
            })
            .transpose()?,
    };

    for m in &entry.methods {
        let mut flags = MemberFlags::default();
        if m.is_static || m.extension {
            flags |= MemberFlags::STATIC;
        }
        if m.is_virtual {
            flags |= MemberFlags::VIRTUAL;
        }
        if m.is_override {
            flags |= MemberFlags::OVERRIDE;
        }
        let mut method = Method {
            clr_name: m.name.clone(),
            stable_id: StableId::raw("pending"),
            params: parse_params(&m.params, assembly)?,
            return_type: match &m.returns {
                Some(r) => parse_type(r, assembly)?,
                None => void(),
            },
            generic_params: m.generics.clone(),
            flags,
            visibility: if m.internal {
                Visibility::Internal
            } else {
                Visibility::Public
            },
            emit_scope: EmitScope::ClassSurface,
            provenance: if m.extension {
                Provenance::ExtensionMethod
            } else {
                Provenance::Declared
            },
            source_interface: None,
            is_extension: m.extension,
        };
        method.stable_id = method.expected_id_on(assembly, &ty.clr_full_name);
        ty.members.methods.push(method);
    }

    for p in &entry.properties {
        let mut flags = MemberFlags::default();
        if p.is_static {
            flags |= MemberFlags::STATIC;
        }
        let mut property = Property {
            clr_name: p.name.clone(),
            stable_id: StableId::raw("pending"),
            property_type: parse_type(&p.ty, assembly)?,
            has_getter: true,
            has_setter: p.setter,
            index_params: parse_params(&p.index, assembly)?,
            flags,
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
            source_interface: None,
        };
        property.stable_id = property.expected_id_on(assembly, &ty.clr_full_name);
        ty.members.properties.push(property);
    }

    for f in &entry.fields {
        let mut flags = MemberFlags::default();
        if f.is_static {
            flags |= MemberFlags::STATIC;
        }
        let mut field = Field {
            clr_name: f.name.clone(),
            stable_id: StableId::raw("pending"),
            field_type: parse_type(&f.ty, assembly)?,
            is_const: f.is_const,
            flags,
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
            source_interface: None,
        };
        field.stable_id = StableId::member(
            assembly,
            &ty.clr_full_name,
            &field.clr_name,
            &field.canonical_signature(),
        );
        ty.members.fields.push(field);
    }

    for e in &entry.events {
        let mut flags = MemberFlags::default();
        if e.is_static {
            flags |= MemberFlags::STATIC;
        }
        let mut event = Event {
            clr_name: e.name.clone(),
            stable_id: StableId::raw("pending"),
            handler_type: parse_type(&e.ty, assembly)?,
            flags,
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
            source_interface: None,
        };
        event.stable_id = StableId::member(
            assembly,
            &ty.clr_full_name,
            &event.clr_name,
            &event.canonical_signature(),
        );
        ty.members.events.push(event);
    }

    for params in &entry.ctors {
        let mut ctor = Constructor {
            stable_id: StableId::raw("pending"),
            params: parse_params(params, assembly)?,
            visibility: Visibility::Public,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Declared,
        };
        ctor.stable_id = StableId::member(
            assembly,
            &ty.clr_full_name,
            Constructor::CLR_NAME,
            &ctor.canonical_signature(),
        );
        ty.members.constructors.push(ctor);
    }

    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_compact_type_grammar() {
        let t = parse_type("Acme.Pool`1<!0:T>", "Acme.Core").expect("parses");
        assert_eq!(t.canonical_key(), "Acme.Pool`1<!0>");

        let nested = parse_type(
            "System.Collections.Generic.Dictionary`2<System.String,Acme.Pool`1<!!0:U>>",
            "Acme.Core",
        )
        .expect("parses");
        assert_eq!(
            nested.canonical_key(),
            "System.Collections.Generic.Dictionary`2<System.String,Acme.Pool`1<!!0>>"
        );

        let arr = parse_type("System.Byte[]", "Acme.Core").expect("parses");
        assert_eq!(arr.canonical_key(), "System.Byte[]");

        let byref = parse_type("System.Int32&", "Acme.Core").expect("parses");
        assert_eq!(byref.canonical_key(), "System.Int32&");
    }

    #[test]
    fn system_names_resolve_to_the_reference_assembly() {
        let t = parse_type("System.String", "Acme.Core").expect("parses");
        let TypeReference::Named { assembly, .. } = &t else {
            panic!("expected named");
        };
        assert_eq!(assembly, "System.Runtime");
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(parse_type("", "A").is_err());
        assert!(parse_type("!0", "A").is_err());
        assert!(parse_type("Acme.Pool`1<!0:T", "A").is_err());
    }
}
