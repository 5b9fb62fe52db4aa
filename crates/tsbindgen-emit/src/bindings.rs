//! The bindings.json contract.
//!
//! For each type, V1 lists the member *definitions* it declares and V2
//! lists the *exposures* of its full surface: own members plus everything
//! inherited, each carrying the ultimate declaring type and assembly.
//! Override-wins: a derived exposure suppresses the base exposure with the
//! same signature.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tsbindgen_model::{StableId, SymbolGraph, TypeReference, TypeSymbol};
use tsbindgen_naming::BuildContext;
use tsbindgen_plan::EmissionPlan;

/// One member definition (V1).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDefinition {
    pub clr_name: String,
    pub normalized_signature: String,
    pub kind: &'static str,
}

/// One surface exposure (V2).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exposure {
    pub clr_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_emit_name: Option<String>,
    pub normalized_signature: String,
    pub kind: &'static str,
    /// The ultimate declaring type for inherited members.
    pub declaring_clr_type: String,
    pub declaring_assembly: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBindings {
    pub stable_id: StableId,
    pub clr_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_emit_name: Option<String>,
    pub assembly: String,
    pub definitions: Vec<MemberDefinition>,
    pub exposures: Vec<Exposure>,
}

/// Build bindings for every type of a namespace, sorted by stable id.
#[must_use]
pub fn build_bindings(ctx: &BuildContext, plan: &EmissionPlan, namespace: &str) -> Vec<TypeBindings> {
    let mut types = plan.graph.types_in(namespace);
    types.sort_by(|a, b| a.stable_id.cmp(&b.stable_id));

    let mut memo: FxHashMap<StableId, Vec<Exposure>> = FxHashMap::default();
    types
        .iter()
        .map(|ty| TypeBindings {
            stable_id: ty.stable_id.clone(),
            clr_name: ty.clr_full_name.clone(),
            ts_emit_name: ctx.renamer.final_type_name(ty),
            assembly: ty.assembly.clone(),
            definitions: definitions_of(ty),
            exposures: exposures_of(ctx, &plan.graph, ty, &mut memo),
        })
        .collect()
}

fn definitions_of(ty: &TypeSymbol) -> Vec<MemberDefinition> {
    let mut out = Vec::new();
    for c in &ty.members.constructors {
        out.push(MemberDefinition {
            clr_name: tsbindgen_model::Constructor::CLR_NAME.to_string(),
            normalized_signature: c.canonical_signature(),
            kind: "constructor",
        });
    }
    for m in &ty.members.methods {
        out.push(MemberDefinition {
            clr_name: m.clr_name.clone(),
            normalized_signature: m.canonical_signature(),
            kind: "method",
        });
    }
    for p in &ty.members.properties {
        out.push(MemberDefinition {
            clr_name: p.clr_name.clone(),
            normalized_signature: p.canonical_signature(),
            kind: "property",
        });
    }
    for f in &ty.members.fields {
        out.push(MemberDefinition {
            clr_name: f.clr_name.clone(),
            normalized_signature: f.canonical_signature(),
            kind: "field",
        });
    }
    for e in &ty.members.events {
        out.push(MemberDefinition {
            clr_name: e.clr_name.clone(),
            normalized_signature: e.canonical_signature(),
            kind: "event",
        });
    }
    out
}

/// `exposures(T) = own(T) ⊎ (exposures(base(T)) \ own(T) by signature)`.
fn exposures_of(
    ctx: &BuildContext,
    graph: &SymbolGraph,
    ty: &TypeSymbol,
    memo: &mut FxHashMap<StableId, Vec<Exposure>>,
) -> Vec<Exposure> {
    if let Some(cached) = memo.get(&ty.stable_id) {
        return cached.clone();
    }

    let mut own = own_exposures(ctx, graph, ty);
    let own_keys: FxHashSet<String> = own
        .iter()
        .map(|e| format!("{}{}", e.clr_name, e.normalized_signature))
        .collect();

    let base = match ty.base.as_ref() {
        Some(TypeReference::Named { full_name, .. }) => graph.resolve_full_name(full_name),
        _ => None,
    };
    if let Some(base) = base {
        let inherited = exposures_of(ctx, graph, base, memo);
        for exposure in inherited {
            let key = format!("{}{}", exposure.clr_name, exposure.normalized_signature);
            if !own_keys.contains(&key) {
                own.push(exposure);
            }
        }
    }

    memo.insert(ty.stable_id.clone(), own.clone());
    own
}

fn own_exposures(ctx: &BuildContext, graph: &SymbolGraph, ty: &TypeSymbol) -> Vec<Exposure> {
    let name_of = |id: &StableId,
                   emit_scope: tsbindgen_model::EmitScope,
                   source: &Option<TypeReference>,
                   is_static: bool| {
        if emit_scope == tsbindgen_model::EmitScope::Omitted {
            return None;
        }
        let scope =
            tsbindgen_naming::member_surface_scope(graph, ty, emit_scope, source, is_static);
        ctx.renamer.final_member_name(id, &scope)
    };

    let mut out = Vec::new();
    for m in &ty.members.methods {
        out.push(Exposure {
            clr_name: m.clr_name.clone(),
            ts_emit_name: name_of(&m.stable_id, m.emit_scope, &m.source_interface, m.is_static()),
            normalized_signature: m.canonical_signature(),
            kind: "method",
            declaring_clr_type: ty.clr_full_name.clone(),
            declaring_assembly: ty.assembly.clone(),
        });
    }
    for p in &ty.members.properties {
        out.push(Exposure {
            clr_name: p.clr_name.clone(),
            ts_emit_name: name_of(&p.stable_id, p.emit_scope, &p.source_interface, p.is_static()),
            normalized_signature: p.canonical_signature(),
            kind: "property",
            declaring_clr_type: ty.clr_full_name.clone(),
            declaring_assembly: ty.assembly.clone(),
        });
    }
    for f in &ty.members.fields {
        out.push(Exposure {
            clr_name: f.clr_name.clone(),
            ts_emit_name: name_of(&f.stable_id, f.emit_scope, &f.source_interface, f.is_static()),
            normalized_signature: f.canonical_signature(),
            kind: "field",
            declaring_clr_type: ty.clr_full_name.clone(),
            declaring_assembly: ty.assembly.clone(),
        });
    }
    for e in &ty.members.events {
        out.push(Exposure {
            clr_name: e.clr_name.clone(),
            ts_emit_name: name_of(&e.stable_id, e.emit_scope, &e.source_interface, e.is_static()),
            normalized_signature: e.canonical_signature(),
            kind: "event",
            declaring_clr_type: ty.clr_full_name.clone(),
            declaring_assembly: ty.assembly.clone(),
        });
    }
    out
}
