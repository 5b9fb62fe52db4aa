//! The metadata.json contract.
//!
//! Machine-readable provenance for each namespace: every type, every
//! member, its CLR name and emitted name, normalized signature, rewrite
//! provenance, and the interfaces the declaration honestly dropped.

use serde::Serialize;
use tsbindgen_model::{EmitScope, MemberFlags, Visibility};
use tsbindgen_naming::{BuildContext, member_surface_scope};
use tsbindgen_plan::EmissionPlan;
use tsbindgen_shape::UnsatisfiableEntry;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMetadata {
    pub clr_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_emit_name: Option<String>,
    pub normalized_signature: String,
    pub provenance: &'static str,
    pub emit_scope: &'static str,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub arity: usize,
    pub param_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_interface: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetadata {
    pub clr_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_emit_name: Option<String>,
    pub kind: &'static str,
    pub accessibility: &'static str,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_static: bool,
    pub arity: usize,
    pub methods: Vec<MemberMetadata>,
    pub properties: Vec<MemberMetadata>,
    pub fields: Vec<MemberMetadata>,
    pub events: Vec<MemberMetadata>,
    pub constructors: Vec<MemberMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unsatisfiable_interfaces: Vec<UnsatisfiableEntry>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceMetadata {
    pub namespace: String,
    pub contributing_assemblies: Vec<String>,
    pub types: Vec<TypeMetadata>,
}

fn accessibility(v: Visibility) -> &'static str {
    match v {
        Visibility::Public => "public",
        Visibility::Protected => "protected",
        Visibility::Internal => "internal",
        Visibility::Private => "private",
    }
}

/// Build the metadata for every namespace, in namespace-sorted order.
#[must_use]
pub fn build_metadata(ctx: &BuildContext, plan: &EmissionPlan) -> Vec<NamespaceMetadata> {
    let mut out = Vec::new();
    let mut ns_names: Vec<String> = plan
        .graph
        .namespaces()
        .iter()
        .map(|n| n.name.clone())
        .collect();
    ns_names.sort_unstable();

    for ns_name in ns_names {
        let ns = plan.graph.namespace(&ns_name).expect("listed namespace");
        let mut types = plan.graph.types_in(&ns_name);
        types.sort_by(|a, b| a.stable_id.cmp(&b.stable_id));

        let mut type_entries = Vec::new();
        for ty in types {
            let member_name = |id: &tsbindgen_model::StableId,
                               emit_scope: EmitScope,
                               source_interface: &Option<tsbindgen_model::TypeReference>,
                               is_static: bool| {
                if emit_scope == EmitScope::Omitted {
                    return None;
                }
                let scope = member_surface_scope(
                    &plan.graph,
                    ty,
                    emit_scope,
                    source_interface,
                    is_static,
                );
                ctx.renamer.final_member_name(id, &scope)
            };

            let methods = ty
                .members
                .methods
                .iter()
                .map(|m| MemberMetadata {
                    clr_name: m.clr_name.clone(),
                    ts_emit_name: member_name(&m.stable_id, m.emit_scope, &m.source_interface, m.is_static()),
                    normalized_signature: m.canonical_signature(),
                    provenance: m.provenance.as_str(),
                    emit_scope: m.emit_scope.as_str(),
                    is_static: m.is_static(),
                    is_virtual: m.flags.contains(MemberFlags::VIRTUAL),
                    is_override: m.is_override(),
                    arity: m.arity(),
                    param_count: m.params.len(),
                    source_interface: (m.emit_scope == EmitScope::ViewOnly)
                        .then(|| m.source_interface.as_ref().map(|s| s.canonical_key()))
                        .flatten(),
                })
                .collect();
            let properties = ty
                .members
                .properties
                .iter()
                .map(|p| MemberMetadata {
                    clr_name: p.clr_name.clone(),
                    ts_emit_name: member_name(&p.stable_id, p.emit_scope, &p.source_interface, p.is_static()),
                    normalized_signature: p.canonical_signature(),
                    provenance: p.provenance.as_str(),
                    emit_scope: p.emit_scope.as_str(),
                    is_static: p.is_static(),
                    is_virtual: p.flags.contains(MemberFlags::VIRTUAL),
                    is_override: p.flags.contains(MemberFlags::OVERRIDE),
                    arity: 0,
                    param_count: p.index_params.len(),
                    source_interface: (p.emit_scope == EmitScope::ViewOnly)
                        .then(|| p.source_interface.as_ref().map(|s| s.canonical_key()))
                        .flatten(),
                })
                .collect();
            let fields = ty
                .members
                .fields
                .iter()
                .map(|f| MemberMetadata {
                    clr_name: f.clr_name.clone(),
                    ts_emit_name: member_name(&f.stable_id, f.emit_scope, &f.source_interface, f.is_static()),
                    normalized_signature: f.canonical_signature(),
                    provenance: f.provenance.as_str(),
                    emit_scope: f.emit_scope.as_str(),
                    is_static: f.is_static(),
                    is_virtual: false,
                    is_override: false,
                    arity: 0,
                    param_count: 0,
                    source_interface: None,
                })
                .collect();
            let events = ty
                .members
                .events
                .iter()
                .map(|e| MemberMetadata {
                    clr_name: e.clr_name.clone(),
                    ts_emit_name: member_name(&e.stable_id, e.emit_scope, &e.source_interface, e.is_static()),
                    normalized_signature: e.canonical_signature(),
                    provenance: e.provenance.as_str(),
                    emit_scope: e.emit_scope.as_str(),
                    is_static: e.is_static(),
                    is_virtual: false,
                    is_override: false,
                    arity: 0,
                    param_count: 0,
                    source_interface: (e.emit_scope == EmitScope::ViewOnly)
                        .then(|| e.source_interface.as_ref().map(|s| s.canonical_key()))
                        .flatten(),
                })
                .collect();
            let constructors = ty
                .members
                .constructors
                .iter()
                .map(|c| MemberMetadata {
                    clr_name: tsbindgen_model::Constructor::CLR_NAME.to_string(),
                    ts_emit_name: None,
                    normalized_signature: c.canonical_signature(),
                    provenance: c.provenance.as_str(),
                    emit_scope: c.emit_scope.as_str(),
                    is_static: false,
                    is_virtual: false,
                    is_override: false,
                    arity: 0,
                    param_count: c.params.len(),
                    source_interface: None,
                })
                .collect();

            type_entries.push(TypeMetadata {
                clr_name: ty.clr_full_name.clone(),
                ts_emit_name: ctx.renamer.final_type_name(ty),
                kind: ty.kind.as_str(),
                accessibility: accessibility(ty.visibility),
                is_abstract: ty.is_abstract,
                is_sealed: ty.is_sealed,
                is_static: ty.is_static,
                arity: ty.arity(),
                methods,
                properties,
                fields,
                events,
                constructors,
                unsatisfiable_interfaces: plan
                    .honest_emission
                    .entries_for(&ty.clr_full_name)
                    .to_vec(),
            });
        }

        out.push(NamespaceMetadata {
            namespace: ns_name.clone(),
            contributing_assemblies: ns.contributing_assemblies.iter().cloned().collect(),
            types: type_entries,
        });
    }
    out
}
