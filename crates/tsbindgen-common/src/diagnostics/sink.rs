//! The diagnostics sink.
//!
//! The sink preserves insertion order, deduplicates by `(code, message)`,
//! and keeps a per-code counter for the summary table. It is shared by
//! reference through the build context, so all entry points take `&self`.

use super::{Diagnostic, DiagnosticCode, Severity};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
pub struct DiagnosticSink {
    entries: RwLock<Vec<Diagnostic>>,
    seen: RwLock<FxHashSet<(DiagnosticCode, String)>>,
    counts: RwLock<IndexMap<DiagnosticCode, usize>>,
}

impl DiagnosticSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. Duplicates (same code and message) are counted
    /// once; the first occurrence wins its position in the stream.
    pub fn report(&self, diag: Diagnostic) {
        let key = (diag.code, diag.message.clone());
        {
            let mut seen = self.seen.write().expect("sink poisoned");
            if !seen.insert(key) {
                return;
            }
        }
        debug!(code = %diag.code, severity = %diag.severity, "{}", diag.message);
        *self
            .counts
            .write()
            .expect("sink poisoned")
            .entry(diag.code)
            .or_insert(0) += 1;
        self.entries.write().expect("sink poisoned").push(diag);
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .read()
            .expect("sink poisoned")
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().expect("sink poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Occurrence count for one code.
    #[must_use]
    pub fn count_for(&self, code: DiagnosticCode) -> usize {
        self.counts
            .read()
            .expect("sink poisoned")
            .get(&code)
            .copied()
            .unwrap_or(0)
    }

    /// Per-code counters in first-occurrence order.
    #[must_use]
    pub fn counts(&self) -> Vec<(DiagnosticCode, usize)> {
        self.counts
            .read()
            .expect("sink poisoned")
            .iter()
            .map(|(code, n)| (*code, *n))
            .collect()
    }

    /// Snapshot of all diagnostics in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries.read().expect("sink poisoned").clone()
    }

    /// Distinct codes at `severity`, in first-occurrence order.
    #[must_use]
    pub fn codes_at(&self, severity: Severity) -> Vec<DiagnosticCode> {
        let mut out = Vec::new();
        for diag in self.entries.read().expect("sink poisoned").iter() {
            if diag.severity == severity && !out.contains(&diag.code) {
                out.push(diag.code);
            }
        }
        out
    }
}
