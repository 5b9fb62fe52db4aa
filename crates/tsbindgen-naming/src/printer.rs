//! The rendered-type authority.
//!
//! Every place that needs the target-language spelling of a
//! [`TypeReference`] (property-override unification, signature emission,
//! the plan-level resolver) goes through this printer, so two phases can
//! never disagree about what a type looks like.

use crate::renamer::Renamer;
use crate::reserved::sanitize_identifier;
use crate::typemap::TypeMap;
use tsbindgen_model::{SymbolGraph, TypeReference};

pub struct TypePrinter<'a> {
    graph: &'a SymbolGraph,
    renamer: &'a Renamer,
    typemap: TypeMap,
}

impl<'a> TypePrinter<'a> {
    #[must_use]
    pub fn new(graph: &'a SymbolGraph, renamer: &'a Renamer) -> Self {
        Self {
            graph,
            renamer,
            typemap: TypeMap::new(),
        }
    }

    /// Render in type position (the alias form for in-graph types).
    #[must_use]
    pub fn render(&self, reference: &TypeReference) -> String {
        self.render_inner(reference, false)
    }

    /// Render in value position (the `$instance` form for in-graph types).
    #[must_use]
    pub fn render_value(&self, reference: &TypeReference) -> String {
        self.render_inner(reference, true)
    }

    fn render_inner(&self, reference: &TypeReference, value_position: bool) -> String {
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
                let rendered_args: Vec<String> =
                    type_args.iter().map(|a| self.render(a)).collect();
                if let Some(mapped) = self.typemap.try_map_generic(full_name, &rendered_args) {
                    return mapped;
                }
                let base = self.named_base(full_name, value_position);
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
                // Nested types emit flattened: Outer_Inner.
                let outer_name = self.render_inner(outer, value_position);
                let base = format!("{outer_name}_{}", sanitize_identifier(nested_name));
                if type_args.is_empty() {
                    base
                } else {
                    let rendered: Vec<String> = type_args.iter().map(|a| self.render(a)).collect();
                    format!("{base}<{}>", rendered.join(", "))
                }
            }
            TypeReference::Array { element, rank } => {
                let inner = self.render(element);
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
            // The target has no pointer representation.
            TypeReference::Pointer { .. } => "unknown".to_string(),
            // By-ref parameters flatten to their referent.
            TypeReference::ByRef { referent } => self.render_inner(referent, value_position),
            TypeReference::Placeholder => "never".to_string(),
        }
    }

    fn named_base(&self, full_name: &str, value_position: bool) -> String {
        if let Some(ty) = self.graph.resolve_full_name(full_name) {
            let resolved = if value_position {
                self.renamer.instance_type_name(ty)
            } else {
                self.renamer.final_type_name(ty)
            };
            if let Some(name) = resolved {
                return name;
            }
        }
        // External type: sanitized CLR simple name.
        let simple = full_name.rsplit('.').next().unwrap_or(full_name);
        sanitize_identifier(simple)
    }
}
