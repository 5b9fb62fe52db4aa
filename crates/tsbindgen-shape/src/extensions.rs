//! Extension-method bucketing.
//!
//! The target language cannot add members to a foreign type, so extension
//! methods are grouped by the canonical form of their receiver (the first
//! parameter's type) and each bucket emits as a separate virtual
//! interface.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;
use tsbindgen_common::diagnostics::codes;
use tsbindgen_common::{Diagnostic, Location};
use tsbindgen_model::{Method, SymbolGraph, TypeReference};
use tsbindgen_naming::{BuildContext, sanitize_identifier};

/// One virtual interface of extension methods over a single receiver.
#[derive(Clone, Debug)]
pub struct ExtensionBucket {
    /// Canonical form of the receiver type.
    pub receiver_canonical: String,
    /// The receiver reference itself, for resolution by the planners.
    pub receiver: TypeReference,
    /// Name of the emitted virtual interface.
    pub bucket_interface_name: String,
    pub methods: Vec<Method>,
    /// CLR full names the bucket's signatures pull in.
    pub required_imports: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ExtensionBucketPlan {
    /// Buckets sorted by receiver canonical name.
    pub buckets: Vec<ExtensionBucket>,
}

pub struct ExtensionBucketing;

impl ExtensionBucketing {
    #[must_use]
    pub fn run(ctx: &BuildContext, graph: &SymbolGraph) -> ExtensionBucketPlan {
        let mut by_receiver: IndexMap<String, ExtensionBucket> = IndexMap::new();

        for ty in graph.types_sorted() {
            for m in &ty.members.methods {
                if !m.is_extension {
                    continue;
                }
                let Some(receiver_param) = m.params.first() else {
                    ctx.report(Diagnostic::new(
                        codes::MEMBER_SHAPE_INVALID,
                        &[
                            m.stable_id.as_str(),
                            &ty.clr_full_name,
                            "extension method without a receiver parameter",
                        ],
                        Location::symbol(m.stable_id.as_str()),
                    ));
                    continue;
                };
                let receiver = receiver_param.ty.clone();
                let key = receiver.canonical_key();

                let bucket = by_receiver.entry(key.clone()).or_insert_with(|| {
                    let simple = receiver.simple_name().unwrap_or("Receiver");
                    ExtensionBucket {
                        receiver_canonical: key.clone(),
                        receiver: receiver.clone(),
                        bucket_interface_name: format!("__{}$extensions", sanitize_identifier(simple)),
                        methods: Vec::new(),
                        required_imports: Vec::new(),
                    }
                });
                bucket.methods.push(m.clone());
            }
        }

        let mut buckets: Vec<ExtensionBucket> = by_receiver.into_values().collect();
        buckets.sort_by(|a, b| a.receiver_canonical.cmp(&b.receiver_canonical));

        for bucket in &mut buckets {
            // Method order inside a bucket follows stable ids.
            bucket
                .methods
                .sort_by(|a, b| a.stable_id.cmp(&b.stable_id));
            let mut names = FxHashSet::default();
            for m in &bucket.methods {
                for p in &m.params {
                    p.ty.collect_named(&mut names);
                }
                m.return_type.collect_named(&mut names);
            }
            let mut imports: SmallVec<[String; 8]> = names.into_iter().collect();
            imports.sort_unstable();
            bucket.required_imports = imports.into_vec();
            debug!(
                receiver = %bucket.receiver_canonical,
                methods = bucket.methods.len(),
                "bucketed extension methods"
            );
        }
        ExtensionBucketPlan { buckets }
    }
}
