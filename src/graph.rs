//! Node registry built from the Mikado notation.
//!
//! The registry keeps nodes in creation order so traversal and rendering are
//! reproducible without sorting. Nodes are merged by exact name: later
//! mentions append prerequisites, OR the done flag and overwrite the root
//! flag.
//!
//! # Examples
//!
//! ```
//! use mikado::graph::MikadoGraph;
//!
//! let mut graph = MikadoGraph::default();
//! graph.get_or_create("goal").root = true;
//! graph.get_or_create("goal").prereqs.push("step".into());
//! graph.get_or_create("step");
//! assert_eq!(graph.traversal_order(), vec!["goal", "step"]);
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// A single task in the dependency tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Display name, already escaped for embedding in a quoted literal.
    pub name: String,
    /// Names this node depends on, in declaration order. Duplicates are kept.
    pub prereqs: Vec<String>,
    /// Whether the task is complete. Only ever moves from `false` to `true`.
    pub done: bool,
    /// Whether the most recent mention had no parent on its line.
    pub root: bool,
}

impl Node {
    /// Create an empty node called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Merge a done marker into the sticky done flag.
    pub const fn mark_done(&mut self, done: bool) {
        self.done |= done;
    }

    /// Report whether the node has no prerequisites.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.prereqs.is_empty()
    }
}

/// Insertion-ordered registry of [`Node`]s keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MikadoGraph {
    nodes: IndexMap<String, Node>,
}

impl MikadoGraph {
    /// Return the node called `name`, creating an empty one on first use.
    pub fn get_or_create(&mut self, name: &str) -> &mut Node {
        self.nodes
            .entry(name.to_owned())
            .or_insert_with(|| Node::new(name))
    }

    /// Look up a node by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Report whether a node called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Number of distinct nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Report whether the registry holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every node in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over root nodes in creation order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| node.root)
    }

    /// Compute the emission order used by the DOT generator.
    ///
    /// Roots seed a queue in creation order and the queue is drained
    /// breadth-first, so each reachable node appears once and ancestors come
    /// before their prerequisites. A node reachable along several paths keeps
    /// the position of the first path that reaches it. Nodes unreachable from
    /// any root are not part of the order.
    #[must_use]
    pub fn traversal_order(&self) -> Vec<&str> {
        let mut queue: VecDeque<&Node> = self.roots().collect();
        let mut seen = HashSet::new();
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(node) = queue.pop_front() {
            if !seen.insert(node.name.as_str()) {
                continue;
            }
            order.push(node.name.as_str());
            queue.extend(node.prereqs.iter().filter_map(|name| self.nodes.get(name)));
        }
        order
    }

    /// Mark every node whose prerequisites are all done as done itself.
    ///
    /// Nodes are visited in reverse [`traversal_order`](Self::traversal_order)
    /// so a freshly completed prerequisite can complete its dependants within
    /// the same pass. Leaves are left untouched.
    pub fn propagate_done(&mut self) {
        let order: Vec<String> = self
            .traversal_order()
            .into_iter()
            .map(str::to_owned)
            .collect();
        for name in order.iter().rev() {
            let Some(node) = self.nodes.get(name) else {
                continue;
            };
            if node.done || node.is_leaf() {
                continue;
            }
            let complete = node
                .prereqs
                .iter()
                .all(|prereq| self.nodes.get(prereq).is_some_and(|dep| dep.done));
            if complete {
                tracing::debug!(node = %name, "all prerequisites done; marking done");
                if let Some(target) = self.nodes.get_mut(name) {
                    target.done = true;
                }
            }
        }
    }
}
