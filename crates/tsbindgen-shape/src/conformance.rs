//! Structural conformance and explicit-view planning.
//!
//! The source platform lets a class satisfy an interface through explicit
//! implementation, static members, or signatures the structural target
//! cannot line up. For every claimed interface this pass checks whether
//! the class surface carries a signature-equal match for each interface
//! member. Claims that fail are removed from the implements list (honest
//! emission) and replaced by an explicit view: an `As_<Interface>`
//! property exposing the members the surface is missing.

use rustc_hash::FxHashSet;
use tracing::debug;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::{
    EmitScope, ExplicitView, Provenance, StableId, SymbolGraph, TypeKind, TypeReference,
    TypeSubstitution, TypeSymbol,
};
use tsbindgen_naming::{BuildContext, sanitize_identifier};

/// One claim the class cannot satisfy structurally.
#[derive(Clone, Debug)]
pub struct UnsatisfiableClaim {
    pub type_id: StableId,
    pub type_clr_name: String,
    pub interface_ref: TypeReference,
    pub interface_clr_name: String,
    pub reason: &'static str,
    pub issue_count: usize,
}

/// Conformance findings feeding the honest-emission planner.
#[derive(Debug, Default)]
pub struct ConformanceFindings {
    pub unsatisfiable: Vec<UnsatisfiableClaim>,
}

pub const REASON_MISSING_OR_INCOMPATIBLE: &str = "MissingOrIncompatibleMembers";

pub struct StructuralConformance;

impl StructuralConformance {
    #[must_use]
    pub fn run(ctx: &BuildContext, graph: SymbolGraph) -> (SymbolGraph, ConformanceFindings) {
        let mut findings = ConformanceFindings::default();
        let candidate_ids: Vec<StableId> = graph
            .types_sorted()
            .into_iter()
            .filter(|t| {
                matches!(t.kind, TypeKind::Class | TypeKind::Struct) && !t.interfaces.is_empty()
            })
            .map(|t| t.stable_id.clone())
            .collect();

        let mut next = graph.clone();
        for id in candidate_ids {
            let ty = graph.type_by_id(&id).expect("listed id resolves");
            let mut kept = Vec::new();
            let mut views = Vec::new();
            let mut view_members = ViewMembers::default();
            let mut used_view_names: FxHashSet<String> = FxHashSet::default();

            for claim in &ty.interfaces {
                match check_claim(&graph, ty, claim) {
                    ClaimOutcome::Satisfied | ClaimOutcome::Unverifiable => {
                        kept.push(claim.clone());
                    }
                    ClaimOutcome::Unsatisfiable { missing, iface_ref } => {
                        let issue_count = missing.count();
                        let interface_clr_name = iface_ref.canonical_key();
                        ctx.report(Diagnostic::new(
                            codes::UNSATISFIABLE_INTERFACE,
                            &[
                                &ty.clr_full_name,
                                &interface_clr_name,
                                &issue_count.to_string(),
                            ],
                            Location::symbol(ty.stable_id.as_str()),
                        ));

                        let simple = iface_ref.simple_name().unwrap_or("Interface");
                        let base_name = format!("As_{}", sanitize_identifier(simple));
                        let mut view_name = base_name.clone();
                        let mut n = 1usize;
                        while !used_view_names.insert(view_name.clone()) {
                            view_name = format!("{base_name}_{n}");
                            n += 1;
                        }
                        views.push(ExplicitView {
                            interface_ref: iface_ref.clone(),
                            view_property_name: view_name,
                        });
                        view_members.absorb(missing, &iface_ref);
                        findings.unsatisfiable.push(UnsatisfiableClaim {
                            type_id: ty.stable_id.clone(),
                            type_clr_name: ty.clr_full_name.clone(),
                            interface_ref: iface_ref,
                            interface_clr_name,
                            reason: REASON_MISSING_OR_INCOMPATIBLE,
                            issue_count,
                        });
                    }
                }
            }

            if views.is_empty() {
                continue;
            }
            debug!(
                class = %ty.clr_full_name,
                views = views.len(),
                "planned explicit views"
            );
            next = next.with_type(&id, move |mut ty| {
                ty.interfaces = kept;
                ty.explicit_views.extend(views);
                ty.members.methods.extend(view_members.methods);
                ty.members.properties.extend(view_members.properties);
                ty.members.events.extend(view_members.events);
                ty
            });
        }
        (next, findings)
    }
}

enum ClaimOutcome {
    Satisfied,
    /// The interface is external; its surface is unknown, so the claim is
    /// kept as written.
    Unverifiable,
    Unsatisfiable {
        missing: ViewMembers,
        iface_ref: TypeReference,
    },
}

#[derive(Default)]
struct ViewMembers {
    methods: Vec<tsbindgen_model::Method>,
    properties: Vec<tsbindgen_model::Property>,
    events: Vec<tsbindgen_model::Event>,
}

impl ViewMembers {
    fn count(&self) -> usize {
        self.methods.len() + self.properties.len() + self.events.len()
    }

    fn absorb(&mut self, mut other: ViewMembers, _iface: &TypeReference) {
        // Two views may both require the same signature; ids key on the
        // declaring interface, so each view keeps its own copy.
        self.methods.append(&mut other.methods);
        self.properties.append(&mut other.properties);
        self.events.append(&mut other.events);
    }
}

fn check_claim(graph: &SymbolGraph, ty: &TypeSymbol, claim: &TypeReference) -> ClaimOutcome {
    let TypeReference::Named {
        full_name,
        type_args,
        ..
    } = claim
    else {
        return ClaimOutcome::Unverifiable;
    };
    let Some(iface) = graph.resolve_full_name(full_name) else {
        return ClaimOutcome::Unverifiable;
    };

    let subst = TypeSubstitution::new(type_args.clone());
    let iface_ref = iface.self_reference().substitute(&subst);

    let surface_method_keys: FxHashSet<String> = ty
        .members
        .methods
        .iter()
        .filter(|m| m.emit_scope == EmitScope::ClassSurface && !m.is_static())
        .map(|m| m.signature_key())
        .collect();
    let surface_property_keys: FxHashSet<String> = ty
        .members
        .properties
        .iter()
        .filter(|p| p.emit_scope == EmitScope::ClassSurface && !p.is_static())
        .map(|p| format!("{}{}", p.clr_name, p.canonical_signature()))
        .collect();
    let surface_event_keys: FxHashSet<String> = ty
        .members
        .events
        .iter()
        .filter(|e| e.emit_scope == EmitScope::ClassSurface && !e.is_static())
        .map(|e| format!("{}{}", e.clr_name, e.canonical_signature()))
        .collect();

    let mut missing = ViewMembers::default();
    for m in &iface.members.methods {
        let mut m = m.clone();
        m.params = m
            .params
            .iter()
            .map(|p| {
                let mut p = p.clone();
                p.ty = p.ty.substitute(&subst);
                p
            })
            .collect();
        m.return_type = m.return_type.substitute(&subst);
        if !surface_method_keys.contains(&m.signature_key()) {
            m.stable_id = m.expected_id_on(&iface.assembly, &iface.clr_full_name);
            m.emit_scope = EmitScope::ViewOnly;
            m.provenance = Provenance::FromInterface;
            m.source_interface = Some(iface_ref.clone());
            missing.methods.push(m);
        }
    }
    for p in &iface.members.properties {
        let mut p = p.clone();
        p.property_type = p.property_type.substitute(&subst);
        p.index_params = p
            .index_params
            .iter()
            .map(|ip| {
                let mut ip = ip.clone();
                ip.ty = ip.ty.substitute(&subst);
                ip
            })
            .collect();
        let key = format!("{}{}", p.clr_name, p.canonical_signature());
        if !surface_property_keys.contains(&key) {
            p.stable_id = p.expected_id_on(&iface.assembly, &iface.clr_full_name);
            p.emit_scope = EmitScope::ViewOnly;
            p.provenance = Provenance::FromInterface;
            p.source_interface = Some(iface_ref.clone());
            missing.properties.push(p);
        }
    }
    for e in &iface.members.events {
        let mut e = e.clone();
        e.handler_type = e.handler_type.substitute(&subst);
        let key = format!("{}{}", e.clr_name, e.canonical_signature());
        if !surface_event_keys.contains(&key) {
            e.stable_id = StableId::member(
                &iface.assembly,
                &iface.clr_full_name,
                &e.clr_name,
                &e.canonical_signature(),
            );
            e.emit_scope = EmitScope::ViewOnly;
            e.provenance = Provenance::FromInterface;
            e.source_interface = Some(iface_ref.clone());
            missing.events.push(e);
        }
    }

    if missing.count() == 0 {
        ClaimOutcome::Satisfied
    } else {
        ClaimOutcome::Unsatisfiable { missing, iface_ref }
    }
}
