//! The loader contract.
//!
//! Reading the source platform's binary metadata is a collaborator concern;
//! the core only sees the [`MetadataLoader`] trait and the promoted
//! diagnostics of its failures.

use crate::graph::SymbolGraph;
use std::path::{Path, PathBuf};
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, DiagnosticCode, Location};

/// A fatal operational failure while producing the initial graph.
#[derive(Debug)]
pub enum LoadError {
    NotFound(PathBuf),
    Unreadable(PathBuf, String),
    Malformed(PathBuf, String),
    EmptyInputSet,
}

impl LoadError {
    /// The diagnostic code this failure is promoted under.
    #[must_use]
    pub fn code(&self) -> DiagnosticCode {
        match self {
            Self::NotFound(_) => codes::INPUT_NOT_FOUND,
            Self::Unreadable(..) => codes::INPUT_UNREADABLE,
            Self::Malformed(..) => codes::METADATA_MALFORMED,
            Self::EmptyInputSet => codes::EMPTY_INPUT_SET,
        }
    }

    /// Promote to an Error-severity diagnostic carrying the originating
    /// code.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let path_str = |p: &Path| p.display().to_string();
        match self {
            Self::NotFound(p) => {
                Diagnostic::new(codes::INPUT_NOT_FOUND, &[&path_str(p)], Location::default())
            }
            Self::Unreadable(p, why) => Diagnostic::new(
                codes::INPUT_UNREADABLE,
                &[&path_str(p), why],
                Location::default(),
            ),
            Self::Malformed(p, why) => Diagnostic::new(
                codes::METADATA_MALFORMED,
                &[&path_str(p), why],
                Location::default(),
            ),
            Self::EmptyInputSet => {
                Diagnostic::new(codes::EMPTY_INPUT_SET, &[], Location::default())
            }
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(p) => write!(f, "input '{}' not found", p.display()),
            Self::Unreadable(p, why) => write!(f, "input '{}' unreadable: {why}", p.display()),
            Self::Malformed(p, why) => write!(f, "metadata in '{}' malformed: {why}", p.display()),
            Self::EmptyInputSet => write!(f, "no input assemblies were provided"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Produces the initial symbol graph from external metadata.
///
/// Implementations must be deterministic: the same inputs in the same order
/// produce a bit-identical graph.
pub trait MetadataLoader {
    fn load(&self, inputs: &[PathBuf]) -> Result<SymbolGraph, LoadError>;
}
