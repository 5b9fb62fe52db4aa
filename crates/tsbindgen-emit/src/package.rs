//! The package emitter.
//!
//! Writes the output contract to disk: per namespace a directory holding
//! the declaration file, the provenance metadata, the bindings, and a
//! JavaScript module stub. The global namespace lands in `_root/`.
//!
//! File writes go through one ordered loop so two runs produce
//! byte-identical trees.

use crate::declarations::DeclarationPrinter;
use crate::{EmitError, Emitter, bindings, metadata};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use tsbindgen_naming::BuildContext;
use tsbindgen_plan::EmissionPlan;

pub struct PackageEmitter;

impl PackageEmitter {
    fn write(path: &Path, contents: &str) -> Result<(), EmitError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EmitError::Io(parent.to_path_buf(), e))?;
        }
        fs::write(path, contents).map_err(|e| EmitError::Io(path.to_path_buf(), e))
    }
}

impl Emitter for PackageEmitter {
    fn emit(
        &self,
        ctx: &BuildContext,
        plan: &EmissionPlan,
        out_dir: &Path,
    ) -> Result<(), EmitError> {
        let printer = DeclarationPrinter::new(ctx, plan);
        let all_metadata = metadata::build_metadata(ctx, plan);

        let mut ns_names: Vec<String> = plan
            .graph
            .namespaces()
            .iter()
            .map(|n| n.name.clone())
            .collect();
        ns_names.sort_unstable();

        for ns_name in &ns_names {
            let dir = out_dir.join(crate::namespace_directory(ctx, ns_name));

            let declarations = printer.print_namespace(ns_name);
            Self::write(&dir.join("internal").join("index.d.ts"), &declarations)?;

            let ns_metadata = all_metadata
                .iter()
                .find(|m| &m.namespace == ns_name)
                .expect("metadata built for every namespace");
            let metadata_json = serde_json::to_string_pretty(ns_metadata)
                .expect("metadata serializes");
            Self::write(&dir.join("internal").join("metadata.json"), &metadata_json)?;

            let ns_bindings = bindings::build_bindings(ctx, plan, ns_name);
            let bindings_json =
                serde_json::to_string_pretty(&ns_bindings).expect("bindings serialize");
            Self::write(&dir.join("bindings.json"), &bindings_json)?;

            // Module stub: the declaration package has no runtime body.
            let stub = "\"use strict\";\nmodule.exports = {};\n";
            Self::write(&dir.join("index.js"), stub)?;

            debug!(namespace = %ns_name, dir = %dir.display(), "emitted namespace");
        }

        info!(namespaces = ns_names.len(), out = %out_dir.display(), "emission complete");
        Ok(())
    }
}
