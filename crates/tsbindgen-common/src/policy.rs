//! Strict-mode policy.
//!
//! The policy is a code-indexed table mapping each known warning-class code
//! to one of two buckets. There is deliberately no "whitelisted warning"
//! bucket: a warning is either forbidden under strict mode or purely
//! informational. Unknown codes are forbidden by default.

use crate::diagnostics::{DiagnosticCode, codes};
use rustc_hash::FxHashMap;

/// Strict-mode bucket for a diagnostic code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyBucket {
    /// The code blocks emission under strict mode.
    Forbidden,
    /// The code never blocks emission.
    Informational,
}

/// The strict-mode policy table.
#[derive(Clone, Debug)]
pub struct StrictPolicy {
    strict: bool,
    buckets: FxHashMap<DiagnosticCode, PolicyBucket>,
}

impl StrictPolicy {
    /// The default policy: every registered warning is Forbidden under
    /// strict mode except the codes that only describe a recorded decision.
    #[must_use]
    pub fn new(strict: bool) -> Self {
        let mut buckets = FxHashMap::default();
        for spec in codes::registry() {
            buckets.insert(spec.code, PolicyBucket::Forbidden);
        }
        // Recorded-decision codes carry no actionable problem.
        buckets.insert(codes::DIAMOND_RESOLVED, PolicyBucket::Informational);
        buckets.insert(codes::HONEST_OMISSION_RECORDED, PolicyBucket::Informational);
        buckets.insert(
            codes::OVERRIDE_UNIFICATION_SKIPPED,
            PolicyBucket::Informational,
        );
        buckets.insert(codes::EXTERNAL_NAME_SANITIZED, PolicyBucket::Informational);
        buckets.insert(codes::RUN_CANCELLED, PolicyBucket::Informational);
        Self { strict, buckets }
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Bucket for a code. Unknown codes are Forbidden.
    #[must_use]
    pub fn bucket(&self, code: DiagnosticCode) -> PolicyBucket {
        self.buckets
            .get(&code)
            .copied()
            .unwrap_or(PolicyBucket::Forbidden)
    }

    /// Reassign one code's bucket (policy input, e.g. demoting TBG120).
    pub fn set_bucket(&mut self, code: DiagnosticCode, bucket: PolicyBucket) {
        self.buckets.insert(code, bucket);
    }

    /// Whether a warning with this code blocks emission under the current
    /// mode. Errors always block and are not consulted here.
    #[must_use]
    pub fn blocks(&self, code: DiagnosticCode) -> bool {
        self.strict && self.bucket(code) == PolicyBucket::Forbidden
    }
}

impl Default for StrictPolicy {
    fn default() -> Self {
        Self::new(false)
    }
}
