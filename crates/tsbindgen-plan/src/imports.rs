//! Import and export planning.
//!
//! For each namespace this planner decides what gets imported from where,
//! under which local alias, and what the namespace exports. Heritage
//! positions (`extends` / `implements`) are value positions in the target
//! language, so the types they reference must travel on value imports and
//! are pre-resolved into qualified `Alias.Name` references.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;
use tsbindgen_model::{SymbolGraph, TypeReference, TypeSymbol, Visibility};
use tsbindgen_naming::{BuildContext, sanitize_identifier};
use tsbindgen_shape::ExtensionBucketPlan;

/// One imported type within a namespace import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeImport {
    /// Exported name in the source namespace.
    pub type_name: String,
    /// Local name after collision avoidance (equals `type_name` when free).
    pub alias: String,
    /// True when the symbol appears in a value position (extends /
    /// implements); type-only imports break there.
    pub is_value_import: bool,
    pub clr_full_name: String,
}

/// All imports one namespace takes from one other namespace.
#[derive(Clone, Debug)]
pub struct NamespaceImport {
    pub target_namespace: String,
    /// Qualified-use alias (`__System_IO`), for value positions and for
    /// dodging top-level shadowing.
    pub namespace_alias: String,
    pub types: Vec<TypeImport>,
}

#[derive(Debug, Default)]
pub struct ImportPlan {
    /// Namespace → its import statements, in sorted target order.
    pub namespace_imports: IndexMap<String, Vec<NamespaceImport>>,
    /// Namespace → exported top-level names, in declaration order.
    pub namespace_exports: IndexMap<String, Vec<String>>,
    /// `(namespace, CLR full name)` → pre-resolved `Alias.Name` reference
    /// for value positions.
    pub value_import_qualified_names: IndexMap<(String, String), String>,
}

impl ImportPlan {
    #[must_use]
    pub fn imports_of(&self, namespace: &str) -> &[NamespaceImport] {
        self.namespace_imports
            .get(namespace)
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn exports_of(&self, namespace: &str) -> &[String] {
        self.namespace_exports
            .get(namespace)
            .map_or(&[], Vec::as_slice)
    }

    /// The local alias a namespace uses for an imported CLR type.
    #[must_use]
    pub fn import_alias(&self, namespace: &str, clr_full_name: &str) -> Option<&str> {
        self.imports_of(namespace)
            .iter()
            .flat_map(|ni| ni.types.iter())
            .find(|ti| ti.clr_full_name == clr_full_name)
            .map(|ti| ti.alias.as_str())
    }

    #[must_use]
    pub fn qualified_value_name(&self, namespace: &str, clr_full_name: &str) -> Option<&str> {
        self.value_import_qualified_names
            .get(&(namespace.to_string(), clr_full_name.to_string()))
            .map(String::as_str)
    }
}

/// `__System_IO`-style alias for qualified references.
#[must_use]
pub fn namespace_alias(namespace: &str) -> String {
    if namespace.is_empty() {
        "__root".to_string()
    } else {
        format!("__{}", sanitize_identifier(namespace))
    }
}

/// A referenced CLR type plus whether any occurrence is a value position.
#[derive(Default)]
pub struct ReferenceSet {
    pub order: Vec<String>,
    pub value_position: FxHashMap<String, bool>,
}

impl ReferenceSet {
    pub fn add(&mut self, full_name: &str, value_position: bool) {
        match self.value_position.get_mut(full_name) {
            Some(existing) => *existing = *existing || value_position,
            None => {
                self.order.push(full_name.to_string());
                self.value_position.insert(full_name.to_string(), value_position);
            }
        }
    }

    pub fn add_all(&mut self, reference: &TypeReference, value_position: bool) {
        let mut names = FxHashSet::default();
        reference.collect_named(&mut names);
        let mut sorted: Vec<String> = names.into_iter().collect();
        sorted.sort_unstable();
        for name in sorted {
            // Only the root of a heritage reference is a value position;
            // its type arguments are ordinary type positions.
            let is_root = reference.named_root() == Some(name.as_str());
            self.add(&name, value_position && is_root);
        }
    }
}

pub struct ImportPlanner;

impl ImportPlanner {
    #[must_use]
    pub fn run(
        ctx: &BuildContext,
        graph: &SymbolGraph,
        extensions: &ExtensionBucketPlan,
    ) -> ImportPlan {
        let mut plan = ImportPlan::default();
        let mut ns_names: Vec<String> =
            graph.namespaces().iter().map(|n| n.name.clone()).collect();
        ns_names.sort_unstable();

        for ns_name in &ns_names {
            let mut types = graph.types_in(ns_name);
            types.sort_by(|a, b| a.stable_id.cmp(&b.stable_id));

            // Exports: alias, instance, and views names of public types.
            let mut exports = Vec::new();
            for ty in &types {
                if ty.visibility != Visibility::Public {
                    continue;
                }
                if let Some(final_name) = ctx.renamer.final_type_name(ty) {
                    exports.push(final_name.clone());
                    exports.push(format!("{final_name}$instance"));
                    if !ty.explicit_views.is_empty() {
                        exports.push(format!("__{final_name}$views"));
                    }
                }
            }

            // Collect foreign references of the namespace's public surface.
            let mut refs = ReferenceSet::default();
            for ty in &types {
                if ty.visibility != Visibility::Public {
                    continue;
                }
                collect_type_references(ty, &mut refs);
            }
            for bucket in &extensions.buckets {
                let owner_ns = bucket
                    .methods
                    .first()
                    .and_then(|m| owner_namespace(graph, m.stable_id.as_str()));
                if owner_ns.as_deref() == Some(ns_name.as_str()) {
                    for import in &bucket.required_imports {
                        refs.add(import, false);
                    }
                }
            }

            // Local names the imports must not shadow.
            let mut used_names: FxHashSet<String> = exports.iter().cloned().collect();

            let mut grouped: IndexMap<String, NamespaceImport> = IndexMap::new();
            for clr_full in &refs.order {
                if ctx.typemap.is_builtin(clr_full) {
                    continue;
                }
                let Some(target) = graph.resolve_full_name(clr_full) else {
                    continue;
                };
                if &target.namespace == ns_name {
                    continue;
                }
                let Some(type_name) = ctx.renamer.final_type_name(target) else {
                    continue;
                };
                let value_position = refs.value_position.get(clr_full).copied().unwrap_or(false);

                let alias = if used_names.contains(&type_name) {
                    let mut n = 1usize;
                    loop {
                        let candidate = format!("{type_name}_{n}");
                        if !used_names.contains(&candidate) {
                            break candidate;
                        }
                        n += 1;
                    }
                } else {
                    type_name.clone()
                };
                used_names.insert(alias.clone());

                let entry = grouped
                    .entry(target.namespace.clone())
                    .or_insert_with(|| NamespaceImport {
                        target_namespace: target.namespace.clone(),
                        namespace_alias: namespace_alias(&target.namespace),
                        types: Vec::new(),
                    });
                entry.types.push(TypeImport {
                    type_name: type_name.clone(),
                    alias,
                    is_value_import: value_position,
                    clr_full_name: clr_full.clone(),
                });

                if value_position {
                    plan.value_import_qualified_names.insert(
                        (ns_name.clone(), clr_full.clone()),
                        format!(
                            "{}.{type_name}$instance",
                            namespace_alias(&target.namespace)
                        ),
                    );
                }
            }

            let mut imports: Vec<NamespaceImport> = grouped.into_values().collect();
            imports.sort_by(|a, b| a.target_namespace.cmp(&b.target_namespace));
            for import in &mut imports {
                import.types.sort_by(|a, b| a.type_name.cmp(&b.type_name));
            }

            debug!(
                namespace = %ns_name,
                imports = imports.len(),
                exports = exports.len(),
                "planned namespace imports"
            );
            plan.namespace_imports.insert(ns_name.clone(), imports);
            plan.namespace_exports.insert(ns_name.clone(), exports);
        }
        plan
    }
}

/// Namespace of the type declaring a member, from its stable id prefix.
fn owner_namespace(graph: &SymbolGraph, member_id: &str) -> Option<String> {
    let declaring = member_id.split("::").next()?;
    let (_, full_name) = declaring.split_once(':')?;
    graph
        .resolve_full_name(full_name)
        .map(|t| t.namespace.clone())
}

/// Collect every CLR full name the public surface of a type references,
/// with its value-position flag. Shared with the phase gate's reference
/// rules so both see the same universe.
pub fn collect_type_references(ty: &TypeSymbol, refs: &mut ReferenceSet) {
    if let Some(base) = &ty.base {
        refs.add_all(base, true);
    }
    for iface in &ty.interfaces {
        refs.add_all(iface, true);
    }
    for view in &ty.explicit_views {
        refs.add_all(&view.interface_ref, false);
    }
    for gp in &ty.generic_params {
        for c in &gp.constraints {
            refs.add_all(c, false);
        }
    }
    for m in &ty.members.methods {
        if m.visibility != Visibility::Public {
            continue;
        }
        for p in &m.params {
            refs.add_all(&p.ty, false);
        }
        refs.add_all(&m.return_type, false);
    }
    for p in &ty.members.properties {
        if p.visibility != Visibility::Public {
            continue;
        }
        refs.add_all(&p.property_type, false);
        for ip in &p.index_params {
            refs.add_all(&ip.ty, false);
        }
    }
    for f in &ty.members.fields {
        if f.visibility == Visibility::Public {
            refs.add_all(&f.field_type, false);
        }
    }
    for e in &ty.members.events {
        if e.visibility == Visibility::Public {
            refs.add_all(&e.handler_type, false);
        }
    }
    for c in &ty.members.constructors {
        if c.visibility == Visibility::Public {
            for p in &c.params {
                refs.add_all(&p.ty, false);
            }
        }
    }
    if let Some(sig) = &ty.delegate_signature {
        for p in &sig.params {
            refs.add_all(&p.ty, false);
        }
        refs.add_all(&sig.return_type, false);
    }
    if let Some(underlying) = &ty.enum_underlying {
        refs.add_all(underlying, false);
    }
}
