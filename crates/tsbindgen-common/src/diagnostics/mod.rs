//! Diagnostic types for the binding generator.
//!
//! Every failure in the core flows through these types; the closed severity
//! triple and the stable `TBG###` codes are part of the external contract
//! (they appear verbatim in the machine-readable validation summary).

use serde::Serialize;
use std::fmt;

pub mod codes;
mod sink;

pub use codes::{DiagnosticSpec, registry, spec_for};
pub use sink::DiagnosticSink;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic severity. The set is closed: there is no "hint" or
/// "whitelisted" class anywhere in the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Info = 0,
    Warning = 1,
    Error = 2,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A stable diagnostic code. Rendered as `TBG###`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiagnosticCode(pub u16);

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TBG{:03}", self.0)
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Where a diagnostic points. Symbols are located by stable id and scope
/// rather than by source position; the source platform has no line numbers
/// worth reporting once metadata has been loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Stable id of the offending symbol, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Renamer scope string, if the diagnostic concerns a naming decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Namespace the diagnostic was raised in, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Location {
    #[must_use]
    pub fn symbol(id: impl Into<String>) -> Self {
        Self {
            symbol: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn scope(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn namespace(ns: impl Into<String>) -> Self {
        Self {
            namespace: Some(ns.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// A single diagnostic raised by a pass, planner, or the phase gate.
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "location_is_empty")]
    pub location: Location,
}

fn location_is_empty(loc: &Location) -> bool {
    loc.symbol.is_none() && loc.scope.is_none() && loc.namespace.is_none()
}

impl Diagnostic {
    /// Build a diagnostic from the registry, filling `{0}`, `{1}`, …
    /// placeholders with `args`. The severity is the code's default; use
    /// [`Diagnostic::with_severity`] to override (promotion of collaborator
    /// failures, policy demotion).
    #[must_use]
    pub fn new(code: DiagnosticCode, args: &[&str], location: Location) -> Self {
        let spec = spec_for(code);
        Self {
            code,
            severity: spec.default_severity,
            message: format_message(spec.message, args),
            location,
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Format a diagnostic message by replacing `{0}`, `{1}`, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
