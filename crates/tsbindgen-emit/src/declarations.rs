//! Declaration-file printing.
//!
//! Prints one namespace's ambient declarations from the emission plan.
//! Every identifier comes from the renamer (through the resolver); the
//! printer makes no naming decisions of its own.
//!
//! Classes emit as three coupled declarations:
//!
//! ```typescript
//! export interface Foo$instance { ... }
//! export type Foo = Foo$instance | __Foo$views;
//! export declare const Foo: { new(): Foo$instance; ... };
//! ```
//!
//! The alias form is what signatures reference; because it is a plain
//! union it stays invariant down the hierarchy, letting derived property
//! signatures match base signatures exactly.

use tsbindgen_model::{
    EmitScope, Method, Parameter, Property, TypeKind, TypeSymbol, Visibility,
};
use tsbindgen_naming::{BuildContext, member_surface_scope};
use tsbindgen_plan::{EmissionPlan, TypeNameResolver};

pub struct DeclarationPrinter<'a> {
    ctx: &'a BuildContext,
    plan: &'a EmissionPlan,
    resolver: TypeNameResolver<'a>,
}

impl<'a> DeclarationPrinter<'a> {
    #[must_use]
    pub fn new(ctx: &'a BuildContext, plan: &'a EmissionPlan) -> Self {
        Self {
            ctx,
            plan,
            resolver: TypeNameResolver::new(&plan.graph, &ctx.renamer, &plan.imports),
        }
    }

    /// Print the full declaration file of one namespace.
    #[must_use]
    pub fn print_namespace(&self, namespace: &str) -> String {
        let mut out = String::new();
        self.print_imports(namespace, &mut out);

        let mut types = self.plan.graph.types_in(namespace);
        types.sort_by(|a, b| a.stable_id.cmp(&b.stable_id));
        for ty in types {
            if ty.visibility != Visibility::Public {
                continue;
            }
            match ty.kind {
                TypeKind::Enum => self.print_enum(ty, &mut out),
                TypeKind::Delegate => self.print_delegate(namespace, ty, &mut out),
                TypeKind::Interface => self.print_interface(namespace, ty, &mut out),
                TypeKind::Class | TypeKind::Struct | TypeKind::StaticNamespace => {
                    self.print_class(namespace, ty, &mut out);
                }
            }
        }

        for bucket in &self.plan.extension_methods.buckets {
            // Buckets emit beside the namespace of their declaring class.
            let in_namespace = bucket.methods.first().is_some_and(|m| {
                m.stable_id.as_str().contains(&format!(":{namespace}."))
            });
            if in_namespace {
                self.print_extension_bucket(namespace, bucket, &mut out);
            }
        }
        out
    }

    fn print_imports(&self, namespace: &str, out: &mut String) {
        for ni in self.plan.imports.imports_of(namespace) {
            // Intra-bucket references never become import statements.
            if self
                .plan
                .scc_buckets
                .same_bucket(namespace, &ni.target_namespace)
            {
                continue;
            }
            let path = format!(
                "../{}/internal/index",
                crate::namespace_directory(self.ctx, &ni.target_namespace)
            );
            out.push_str(&format!(
                "import * as {} from \"{path}\";\n",
                ni.namespace_alias
            ));
            let named: Vec<String> = ni
                .types
                .iter()
                .map(|ti| {
                    if ti.alias == ti.type_name {
                        ti.type_name.clone()
                    } else {
                        format!("{} as {}", ti.type_name, ti.alias)
                    }
                })
                .collect();
            if !named.is_empty() {
                // Heritage users need the value side, so no `import type`.
                out.push_str(&format!(
                    "import {{ {} }} from \"{path}\";\n",
                    named.join(", ")
                ));
            }
        }
        if !self.plan.imports.imports_of(namespace).is_empty() {
            out.push('\n');
        }
    }

    fn generic_suffix(&self, ty: &TypeSymbol) -> String {
        if ty.generic_params.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = ty.generic_params.iter().map(|g| g.name.as_str()).collect();
            format!("<{}>", names.join(", "))
        }
    }

    fn print_enum(&self, ty: &TypeSymbol, out: &mut String) {
        let Some(name) = self.ctx.renamer.final_type_name(ty) else {
            return;
        };
        let surface = tsbindgen_naming::ScopeFactory::type_base(&ty.clr_full_name)
            .surface(tsbindgen_naming::Side::Static);
        out.push_str(&format!("export declare enum {name} {{\n"));
        for literal in &ty.enum_literals {
            let literal_id = tsbindgen_model::StableId::member(
                &ty.assembly,
                &ty.clr_full_name,
                &literal.clr_name,
                ":enum-literal",
            );
            let emitted = self
                .ctx
                .renamer
                .final_member_name(&literal_id, &surface)
                .unwrap_or_else(|| literal.clr_name.clone());
            out.push_str(&format!("  {emitted} = {},\n", literal.value));
        }
        out.push_str("}\n\n");
    }

    fn print_delegate(&self, namespace: &str, ty: &TypeSymbol, out: &mut String) {
        let Some(name) = self.ctx.renamer.final_type_name(ty) else {
            return;
        };
        let Some(sig) = &ty.delegate_signature else {
            return;
        };
        let params = self.render_params(namespace, &sig.params);
        let ret = self.resolver.resolve(namespace, &sig.return_type, false);
        out.push_str(&format!(
            "export type {name}{} = ({params}) => {ret};\n\n",
            self.generic_suffix(ty)
        ));
    }

    fn print_interface(&self, namespace: &str, ty: &TypeSymbol, out: &mut String) {
        let Some(name) = self.ctx.renamer.final_type_name(ty) else {
            return;
        };
        out.push_str(&format!(
            "export interface {name}{} {{\n",
            self.generic_suffix(ty)
        ));
        self.print_instance_members(namespace, ty, out);
        out.push_str("}\n\n");
    }

    fn print_class(&self, namespace: &str, ty: &TypeSymbol, out: &mut String) {
        let Some(name) = self.ctx.renamer.final_type_name(ty) else {
            return;
        };
        let generics = self.generic_suffix(ty);
        let flattened = self.plan.static_flattening.is_flattened(&ty.stable_id);

        // Instance side.
        let mut heritage = String::new();
        if !flattened && let Some(base) = &ty.base {
            let rendered = self.resolver.resolve(namespace, base, true);
            heritage = format!(" extends {rendered}");
        }
        out.push_str(&format!(
            "export interface {name}$instance{generics}{heritage} {{\n"
        ));
        self.print_instance_members(namespace, ty, out);
        for view in &ty.explicit_views {
            out.push_str(&format!("  readonly {}: {{\n", view.view_property_name));
            self.print_view_members(namespace, ty, &view.interface_ref, out);
            out.push_str("  };\n");
        }
        out.push_str("}\n");

        // Alias union.
        if ty.explicit_views.is_empty() {
            out.push_str(&format!(
                "export type {name}{generics} = {name}$instance{generics};\n"
            ));
        } else {
            out.push_str(&format!("export interface __{name}$views {{}}\n"));
            out.push_str(&format!(
                "export type {name}{generics} = {name}$instance{generics} | __{name}$views;\n"
            ));
        }

        // Static side.
        out.push_str(&format!("export declare const {name}: {{\n"));
        for c in &ty.members.constructors {
            if c.visibility != Visibility::Public || c.emit_scope != EmitScope::ClassSurface {
                continue;
            }
            out.push_str(&format!(
                "  new ({}): {name}$instance{generics};\n",
                self.render_params(namespace, &c.params)
            ));
        }
        for m in &ty.members.methods {
            if m.is_static() && !self.is_suppressed(ty, m) {
                self.print_method(namespace, ty, m, out);
            }
        }
        for p in &ty.members.properties {
            if p.is_static() && !self.is_suppressed_property(ty, p) {
                self.print_property(namespace, ty, p, out);
            }
        }
        for f in &ty.members.fields {
            if f.is_static()
                && f.visibility == Visibility::Public
                && f.emit_scope == EmitScope::ClassSurface
                && !self
                    .plan
                    .static_conflicts
                    .is_suppressed(&ty.stable_id, &f.stable_id)
                && let Some(field_name) = self.member_name(ty, &f.stable_id, f.emit_scope, &f.source_interface, true)
            {
                let rendered = self.resolver.resolve(namespace, &f.field_type, false);
                out.push_str(&format!("  readonly {field_name}: {rendered};\n"));
            }
        }
        if let Some(inherited) = self
            .plan
            .static_flattening
            .inherited_statics
            .get(&ty.stable_id)
        {
            for m in &inherited.methods {
                self.print_flattened_method(namespace, m, out);
            }
            for p in &inherited.properties {
                let name = self
                    .ancestor_member_name(&p.stable_id, true)
                    .unwrap_or_else(|| p.clr_name.clone());
                let rendered = self.resolver.resolve(namespace, &p.property_type, false);
                out.push_str(&format!("  readonly {name}: {rendered};\n"));
            }
            for f in &inherited.fields {
                let name = self
                    .ancestor_member_name(&f.stable_id, true)
                    .unwrap_or_else(|| f.clr_name.clone());
                let rendered = self.resolver.resolve(namespace, &f.field_type, false);
                out.push_str(&format!("  readonly {name}: {rendered};\n"));
            }
        }
        out.push_str("};\n\n");
    }

    fn print_instance_members(&self, namespace: &str, ty: &TypeSymbol, out: &mut String) {
        for m in &ty.members.methods {
            if !m.is_static() && m.emit_scope == EmitScope::ClassSurface {
                self.print_method(namespace, ty, m, out);
            }
        }
        for p in &ty.members.properties {
            if !p.is_static() && p.emit_scope == EmitScope::ClassSurface {
                self.print_property(namespace, ty, p, out);
            }
        }
        for f in &ty.members.fields {
            if f.is_static()
                || f.visibility != Visibility::Public
                || f.emit_scope != EmitScope::ClassSurface
            {
                continue;
            }
            if let Some(name) =
                self.member_name(ty, &f.stable_id, f.emit_scope, &f.source_interface, false)
            {
                let rendered = self.resolver.resolve(namespace, &f.field_type, false);
                out.push_str(&format!("  {name}: {rendered};\n"));
            }
        }
        for e in &ty.members.events {
            if e.is_static()
                || e.visibility != Visibility::Public
                || e.emit_scope != EmitScope::ClassSurface
            {
                continue;
            }
            if let Some(name) =
                self.member_name(ty, &e.stable_id, e.emit_scope, &e.source_interface, false)
            {
                let rendered = self.resolver.resolve(namespace, &e.handler_type, false);
                out.push_str(&format!("  {name}: {rendered};\n"));
            }
        }
    }

    fn print_view_members(
        &self,
        namespace: &str,
        ty: &TypeSymbol,
        interface_ref: &tsbindgen_model::TypeReference,
        out: &mut String,
    ) {
        let root = interface_ref.named_root();
        for m in &ty.members.methods {
            if m.emit_scope != EmitScope::ViewOnly {
                continue;
            }
            let same_view = m
                .source_interface
                .as_ref()
                .and_then(|s| s.named_root())
                == root;
            if !same_view {
                continue;
            }
            if let Some(name) =
                self.member_name(ty, &m.stable_id, m.emit_scope, &m.source_interface, m.is_static())
            {
                let params = self.render_params(namespace, &m.params);
                let ret = self.resolver.resolve(namespace, &m.return_type, false);
                out.push_str(&format!("    {name}({params}): {ret};\n"));
            }
        }
        for p in &ty.members.properties {
            if p.emit_scope != EmitScope::ViewOnly {
                continue;
            }
            let same_view = p
                .source_interface
                .as_ref()
                .and_then(|s| s.named_root())
                == root;
            if !same_view {
                continue;
            }
            if let Some(name) =
                self.member_name(ty, &p.stable_id, p.emit_scope, &p.source_interface, p.is_static())
            {
                let rendered = self.resolver.resolve(namespace, &p.property_type, false);
                out.push_str(&format!("    {name}: {rendered};\n"));
            }
        }
    }

    fn print_method(&self, namespace: &str, ty: &TypeSymbol, m: &Method, out: &mut String) {
        if m.visibility != Visibility::Public || m.emit_scope != EmitScope::ClassSurface {
            return;
        }
        let Some(name) =
            self.member_name(ty, &m.stable_id, m.emit_scope, &m.source_interface, m.is_static())
        else {
            return;
        };
        let generics = if m.generic_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", m.generic_params.join(", "))
        };
        let params = self.render_params(namespace, &m.params);
        let ret = self.resolver.resolve(namespace, &m.return_type, false);
        out.push_str(&format!("  {name}{generics}({params}): {ret};\n"));
    }

    fn print_flattened_method(&self, namespace: &str, m: &Method, out: &mut String) {
        let name = self
            .ancestor_member_name(&m.stable_id, true)
            .unwrap_or_else(|| m.clr_name.clone());
        let generics = if m.generic_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", m.generic_params.join(", "))
        };
        let params = self.render_params(namespace, &m.params);
        let ret = self.resolver.resolve(namespace, &m.return_type, false);
        out.push_str(&format!("  {name}{generics}({params}): {ret};\n"));
    }

    /// Final name of a member that lives on another type, from its stable
    /// id's declaring segment. Flattened statics print under the name
    /// their ancestor reserved.
    fn ancestor_member_name(
        &self,
        id: &tsbindgen_model::StableId,
        is_static: bool,
    ) -> Option<String> {
        let declaring = id.as_str().split("::").next()?;
        let (_, full_name) = declaring.split_once(':')?;
        let surface = tsbindgen_naming::ScopeFactory::type_base(full_name).surface(
            if is_static {
                tsbindgen_naming::Side::Static
            } else {
                tsbindgen_naming::Side::Instance
            },
        );
        self.ctx.renamer.final_member_name(id, &surface)
    }

    fn print_property(&self, namespace: &str, ty: &TypeSymbol, p: &Property, out: &mut String) {
        if p.visibility != Visibility::Public || p.emit_scope != EmitScope::ClassSurface {
            return;
        }
        let Some(name) =
            self.member_name(ty, &p.stable_id, p.emit_scope, &p.source_interface, p.is_static())
        else {
            return;
        };
        // The unified union wins over the declared type.
        let rendered = match self
            .plan
            .property_overrides
            .union_for(&ty.stable_id, &p.stable_id)
        {
            Some(union) => union.to_string(),
            None => self.resolver.resolve(namespace, &p.property_type, false),
        };
        if p.is_indexer() {
            let index = self.render_params(namespace, &p.index_params);
            out.push_str(&format!("  [{index}]: {rendered};\n"));
        } else if p.has_setter {
            out.push_str(&format!("  {name}: {rendered};\n"));
        } else {
            out.push_str(&format!("  readonly {name}: {rendered};\n"));
        }
    }

    fn print_extension_bucket(
        &self,
        namespace: &str,
        bucket: &tsbindgen_shape::ExtensionBucket,
        out: &mut String,
    ) {
        out.push_str(&format!(
            "export interface {} {{\n",
            bucket.bucket_interface_name
        ));
        for m in &bucket.methods {
            // The receiver parameter becomes `this`.
            let rest = &m.params[1..];
            let receiver = self.resolver.resolve(namespace, &m.params[0].ty, false);
            let mut params = format!("this: {receiver}");
            let rendered_rest = self.render_params(namespace, rest);
            if !rendered_rest.is_empty() {
                params.push_str(", ");
                params.push_str(&rendered_rest);
            }
            let ret = self.resolver.resolve(namespace, &m.return_type, false);
            let name = self
                .ancestor_member_name(&m.stable_id, true)
                .unwrap_or_else(|| m.clr_name.clone());
            out.push_str(&format!("  {name}({params}): {ret};\n"));
        }
        out.push_str("}\n\n");
    }

    fn render_params(&self, namespace: &str, params: &[Parameter]) -> String {
        let rendered: Vec<String> = params
            .iter()
            .map(|p| {
                let ty = self.resolver.resolve(namespace, &p.ty, false);
                let opt = if p.optional { "?" } else { "" };
                format!("{}{opt}: {ty}", sanitize_param(&p.name))
            })
            .collect();
        rendered.join(", ")
    }

    fn member_name(
        &self,
        ty: &TypeSymbol,
        id: &tsbindgen_model::StableId,
        emit_scope: EmitScope,
        source_interface: &Option<tsbindgen_model::TypeReference>,
        is_static: bool,
    ) -> Option<String> {
        if emit_scope == EmitScope::Omitted {
            return None;
        }
        let scope =
            member_surface_scope(&self.plan.graph, ty, emit_scope, source_interface, is_static);
        self.ctx.renamer.final_member_name(id, &scope)
    }

    fn is_suppressed(&self, ty: &TypeSymbol, m: &Method) -> bool {
        self.plan
            .static_conflicts
            .is_suppressed(&ty.stable_id, &m.stable_id)
    }

    fn is_suppressed_property(&self, ty: &TypeSymbol, p: &Property) -> bool {
        self.plan
            .static_conflicts
            .is_suppressed(&ty.stable_id, &p.stable_id)
    }
}

/// Parameter names face no scope rules, only keyword safety.
fn sanitize_param(name: &str) -> String {
    let sanitized = tsbindgen_naming::sanitize_identifier(name);
    if tsbindgen_naming::is_reserved_word(&sanitized) {
        format!("_{sanitized}")
    } else {
        sanitized
    }
}
