//! Static-hierarchy flattening.
//!
//! The target language checks static-side assignability on `extends`: a
//! static-only class extending another static-only class trips that check
//! whenever a static is narrowed. Suppressing the `extends` clause and
//! emitting the ancestor statics directly on the derived class preserves
//! the full surface without the check.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use tracing::debug;
use tsbindgen_model::{
    Field, Method, Property, StableId, SymbolGraph, TypeKind, TypeReference, TypeSymbol,
};
use tsbindgen_naming::BuildContext;

/// Ancestor statics to re-emit on a flattened class.
#[derive(Clone, Debug, Default)]
pub struct InheritedStatics {
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
    pub fields: Vec<Field>,
}

/// Which classes lose their `extends` clause, and what they inherit.
#[derive(Debug, Default)]
pub struct StaticFlatteningPlan {
    /// Classes whose `extends` is suppressed, in stable-id order.
    pub flatten: IndexSet<StableId>,
    pub inherited_statics: IndexMap<StableId, InheritedStatics>,
}

impl StaticFlatteningPlan {
    #[must_use]
    pub fn is_flattened(&self, id: &StableId) -> bool {
        self.flatten.contains(id)
    }
}

pub struct StaticHierarchyFlattener;

impl StaticHierarchyFlattener {
    #[must_use]
    pub fn run(_ctx: &BuildContext, graph: &SymbolGraph) -> StaticFlatteningPlan {
        let mut plan = StaticFlatteningPlan::default();
        for ty in graph.types_sorted() {
            if ty.kind != TypeKind::Class || !ty.is_static_only() {
                continue;
            }
            let Some(base) = in_graph_base(graph, ty) else {
                continue;
            };
            if !base.is_static_only() {
                continue;
            }

            let mut inherited = InheritedStatics::default();
            let mut method_keys: FxHashSet<String> = ty
                .members
                .methods
                .iter()
                .map(Method::signature_key)
                .collect();
            let mut value_names: FxHashSet<String> = ty
                .members
                .properties
                .iter()
                .map(|p| p.clr_name.clone())
                .chain(ty.members.fields.iter().map(|f| f.clr_name.clone()))
                .collect();

            // Nearest ancestor wins on a name collision.
            let mut current = Some(base);
            while let Some(ancestor) = current {
                for m in &ancestor.members.methods {
                    if m.is_static() && method_keys.insert(m.signature_key()) {
                        inherited.methods.push(m.clone());
                    }
                }
                for p in &ancestor.members.properties {
                    if p.is_static() && value_names.insert(p.clr_name.clone()) {
                        inherited.properties.push(p.clone());
                    }
                }
                for f in &ancestor.members.fields {
                    if f.is_static() && value_names.insert(f.clr_name.clone()) {
                        inherited.fields.push(f.clone());
                    }
                }
                current = in_graph_base(graph, ancestor);
            }

            debug!(
                class = %ty.clr_full_name,
                methods = inherited.methods.len(),
                "suppressing extends on static-only class"
            );
            plan.flatten.insert(ty.stable_id.clone());
            plan.inherited_statics.insert(ty.stable_id.clone(), inherited);
        }
        plan
    }
}

fn in_graph_base<'g>(graph: &'g SymbolGraph, ty: &TypeSymbol) -> Option<&'g TypeSymbol> {
    match ty.base.as_ref()? {
        TypeReference::Named { full_name, .. } => graph.resolve_full_name(full_name),
        _ => None,
    }
}
