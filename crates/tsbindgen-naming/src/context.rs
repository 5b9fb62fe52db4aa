//! The build context.
//!
//! One value threaded by reference through every pass and planner. The
//! renamer's reservation maps are the only mutable state it carries; the
//! sink deduplicates internally, so sharing is safe.

use crate::renamer::Renamer;
use crate::typemap::{PrimitiveLift, TypeMap};
use std::sync::Arc;
use tsbindgen_common::{BuildOptions, Diagnostic, DiagnosticSink, StrictPolicy};

pub struct BuildContext {
    pub sink: Arc<DiagnosticSink>,
    pub policy: StrictPolicy,
    pub options: BuildOptions,
    pub renamer: Renamer,
    pub typemap: TypeMap,
    pub lift: PrimitiveLift,
}

impl BuildContext {
    #[must_use]
    pub fn new(options: BuildOptions, policy: StrictPolicy) -> Self {
        let sink = Arc::new(DiagnosticSink::new());
        let renamer = Renamer::new(Arc::clone(&sink), options.reserved_words);
        Self {
            sink,
            policy,
            options,
            renamer,
            typemap: TypeMap::new(),
            lift: PrimitiveLift::new(),
        }
    }

    /// Context with default options; the usual test entry point.
    #[must_use]
    pub fn for_tests() -> Self {
        Self::new(BuildOptions::default(), StrictPolicy::default())
    }

    pub fn report(&self, diag: Diagnostic) {
        self.sink.report(diag);
    }
}
