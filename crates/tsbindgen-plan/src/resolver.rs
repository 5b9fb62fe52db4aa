//! Central type-name resolution.
//!
//! Converts any [`TypeReference`] into the identifier a namespace's
//! declaration file uses for it. Short-circuit order: built-in, type-import
//! alias, value-import qualified name, graph-resolved final or instance
//! name, sanitized external name.
//!
//! The position flag selects between the alias form (`Foo`, type
//! positions) and the instance form (`Foo$instance`, value positions).
//! The alias is emitted as `type Foo = Foo$instance | __Foo$views`, which
//! keeps derived-class property signatures identical to base-class
//! signatures: the alias is invariant across the hierarchy.

use crate::imports::ImportPlan;
use tsbindgen_model::{SymbolGraph, TypeReference};
use tsbindgen_naming::{Renamer, TypeMap, sanitize_identifier};

pub struct TypeNameResolver<'a> {
    graph: &'a SymbolGraph,
    renamer: &'a Renamer,
    imports: &'a ImportPlan,
    typemap: TypeMap,
}

impl<'a> TypeNameResolver<'a> {
    #[must_use]
    pub fn new(graph: &'a SymbolGraph, renamer: &'a Renamer, imports: &'a ImportPlan) -> Self {
        Self {
            graph,
            renamer,
            imports,
            typemap: TypeMap::new(),
        }
    }

    /// Resolve a reference as seen from `namespace`.
    #[must_use]
    pub fn resolve(
        &self,
        namespace: &str,
        reference: &TypeReference,
        for_value_position: bool,
    ) -> String {
        match reference {
            TypeReference::GenericParam { name, .. } => name.clone(),
            TypeReference::Named {
                full_name,
                type_args,
                ..
            } => {
                if type_args.is_empty()
                    && let Some(builtin) = self.typemap.try_map_builtin(full_name)
                {
                    return builtin.to_string();
                }
                let rendered_args: Vec<String> = type_args
                    .iter()
                    .map(|a| self.resolve(namespace, a, false))
                    .collect();
                if let Some(mapped) = self.typemap.try_map_generic(full_name, &rendered_args) {
                    return mapped;
                }
                let base = self.named_base(namespace, full_name, for_value_position);
                if rendered_args.is_empty() {
                    base
                } else {
                    format!("{base}<{}>", rendered_args.join(", "))
                }
            }
            TypeReference::Nested {
                outer,
                nested_name,
                type_args,
            } => {
                let outer_name = self.resolve(namespace, outer, for_value_position);
                let base = format!("{outer_name}_{}", sanitize_identifier(nested_name));
                if type_args.is_empty() {
                    base
                } else {
                    let rendered: Vec<String> = type_args
                        .iter()
                        .map(|a| self.resolve(namespace, a, false))
                        .collect();
                    format!("{base}<{}>", rendered.join(", "))
                }
            }
            TypeReference::Array { element, rank } => {
                let inner = self.resolve(namespace, element, false);
                let needs_parens = inner.contains('|') || inner.contains("=>");
                let mut out = if needs_parens {
                    format!("({inner})")
                } else {
                    inner
                };
                for _ in 0..*rank {
                    out.push_str("[]");
                }
                out
            }
            TypeReference::Pointer { .. } => "unknown".to_string(),
            TypeReference::ByRef { referent } => {
                self.resolve(namespace, referent, for_value_position)
            }
            TypeReference::Placeholder => "never".to_string(),
        }
    }

    fn named_base(&self, namespace: &str, full_name: &str, for_value_position: bool) -> String {
        // Pre-resolved qualified reference for value positions.
        if for_value_position
            && let Some(qualified) = self.imports.qualified_value_name(namespace, full_name)
        {
            return qualified.to_string();
        }
        // Type-import alias.
        if let Some(alias) = self.imports.import_alias(namespace, full_name) {
            return alias.to_string();
        }
        // Graph-resolved local name: alias form or instance form.
        if let Some(ty) = self.graph.resolve_full_name(full_name) {
            let resolved = if for_value_position {
                self.renamer.instance_type_name(ty)
            } else {
                self.renamer.final_type_name(ty)
            };
            if let Some(name) = resolved {
                return name;
            }
        }
        // External type.
        let simple = full_name.rsplit('.').next().unwrap_or(full_name);
        sanitize_identifier(simple)
    }
}
