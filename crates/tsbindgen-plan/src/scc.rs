//! SCC bucketing of the namespace import graph.
//!
//! The target language tolerates import cycles poorly, so the namespace
//! dependency graph is decomposed into strongly-connected components with
//! Tarjan's algorithm. Each non-singleton component becomes one bucket
//! emitted together; imports inside a bucket become intra-bucket
//! references and no import statements are generated for them. The
//! quotient graph over buckets is a DAG by construction.

use crate::imports::ImportPlan;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

/// One group of mutually-dependent namespaces, members sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SccBucket {
    pub namespaces: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SccBuckets {
    /// Non-singleton components, in discovery order (deterministic for a
    /// given import plan).
    pub buckets: Vec<SccBucket>,
    membership: FxHashMap<String, usize>,
}

impl SccBuckets {
    /// Index of the bucket containing `namespace`, if it is in one.
    #[must_use]
    pub fn bucket_of(&self, namespace: &str) -> Option<usize> {
        self.membership.get(namespace).copied()
    }

    /// Whether two namespaces share a bucket (and thus emit without an
    /// import statement between them).
    #[must_use]
    pub fn same_bucket(&self, a: &str, b: &str) -> bool {
        match (self.bucket_of(a), self.bucket_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Compute the buckets for an import plan.
    #[must_use]
    pub fn compute(plan: &ImportPlan) -> SccBuckets {
        // Node order is the plan's (sorted) namespace order.
        let nodes: Vec<&str> = plan.namespace_imports.keys().map(String::as_str).collect();
        let index_of: FxHashMap<&str, usize> =
            nodes.iter().enumerate().map(|(i, n)| (*n, i)).collect();
        let edges: Vec<SmallVec<[usize; 4]>> = nodes
            .iter()
            .map(|n| {
                plan.imports_of(n)
                    .iter()
                    .filter_map(|imp| index_of.get(imp.target_namespace.as_str()).copied())
                    .collect()
            })
            .collect();

        let mut state = Tarjan {
            edges: &edges,
            index: vec![None; nodes.len()],
            lowlink: vec![0; nodes.len()],
            on_stack: vec![false; nodes.len()],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        };
        for v in 0..nodes.len() {
            if state.index[v].is_none() {
                state.visit(v);
            }
        }

        let mut out = SccBuckets::default();
        for component in state.components {
            if component.len() < 2 {
                continue;
            }
            let mut members: Vec<String> =
                component.iter().map(|&v| nodes[v].to_string()).collect();
            members.sort_unstable();
            let bucket_index = out.buckets.len();
            for member in &members {
                out.membership.insert(member.clone(), bucket_index);
            }
            debug!(bucket = bucket_index, members = ?members, "bucketed import cycle");
            out.buckets.push(SccBucket {
                namespaces: members,
            });
        }
        out
    }
}

/// Iterative Tarjan; the explicit frame stack keeps deep namespace graphs
/// off the call stack.
struct Tarjan<'g> {
    edges: &'g [SmallVec<[usize; 4]>],
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    components: Vec<Vec<usize>>,
}

impl Tarjan<'_> {
    fn visit(&mut self, root: usize) {
        // Frame: (node, next edge position to examine).
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(&(v, edge_pos)) = frames.last() {
            if edge_pos == 0 {
                self.index[v] = Some(self.next_index);
                self.lowlink[v] = self.next_index;
                self.next_index += 1;
                self.stack.push(v);
                self.on_stack[v] = true;
            }

            let mut pos = edge_pos;
            let mut child = None;
            while pos < self.edges[v].len() {
                let w = self.edges[v][pos];
                pos += 1;
                match self.index[w] {
                    None => {
                        child = Some(w);
                        break;
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
            }
            frames.last_mut().expect("frame present").1 = pos;
            if let Some(w) = child {
                frames.push((w, 0));
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[v]);
            }
            if self.lowlink[v] == self.index[v].expect("visited") {
                let mut component = Vec::new();
                loop {
                    let w = self.stack.pop().expect("stack holds the component");
                    self.on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}
