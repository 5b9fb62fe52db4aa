//! The emitter side of the core.
//!
//! This crate owns the artifact models (metadata.json, bindings.json, the
//! validation summary) and the [`Emitter`] contract. The emitter never
//! renames and never makes a naming decision: every identifier it writes
//! comes from the renamer through the type-name resolver.

use std::path::Path;
use tsbindgen_naming::BuildContext;
use tsbindgen_plan::EmissionPlan;

pub mod metadata;
pub use metadata::{MemberMetadata, NamespaceMetadata, TypeMetadata, build_metadata};

pub mod bindings;
pub use bindings::{Exposure, TypeBindings, build_bindings};

pub mod declarations;
pub use declarations::DeclarationPrinter;

pub mod package;
pub use package::PackageEmitter;

pub mod contract;
pub use contract::load_contract;

pub mod summary_writer;
pub use summary_writer::write_summary;

/// Output directory of a namespace: `_root` for the global namespace,
/// otherwise the dotted name with the namespace transform applied per
/// segment. Import paths in declaration files use the same spelling.
#[must_use]
pub fn namespace_directory(ctx: &BuildContext, namespace: &str) -> String {
    if namespace.is_empty() {
        return "_root".to_string();
    }
    namespace
        .split('.')
        .map(|segment| ctx.options.transforms.namespaces.apply(segment))
        .collect::<Vec<_>>()
        .join(".")
}

/// A failure while producing output artifacts.
#[derive(Debug)]
pub enum EmitError {
    Io(std::path::PathBuf, std::io::Error),
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, err) => write!(f, "write to '{}' failed: {err}", path.display()),
        }
    }
}

impl std::error::Error for EmitError {}

/// The output contract: one directory per namespace with a declaration
/// file, provenance metadata, source-to-target bindings, and a module
/// stub. `_root/` holds the global namespace.
pub trait Emitter {
    fn emit(&self, ctx: &BuildContext, plan: &EmissionPlan, out_dir: &Path)
    -> Result<(), EmitError>;
}
