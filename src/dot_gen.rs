//! Graphviz DOT generator.
//!
//! This module converts a [`MikadoGraph`] into the DOT text consumed by the
//! `dot` renderer. Nodes are emitted in [`MikadoGraph::traversal_order`], so
//! the output is byte-identical for a given graph and set of options.

use crate::graph::{MikadoGraph, Node};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Layout direction used when none is configured.
pub const DEFAULT_RANKDIR: &str = "RL";

/// Colour applied to completed nodes and edges pointing at them.
const DONE_COLOUR: &str = "gray";

/// Presentation switches for the generated graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Mark nodes done once all their prerequisites are done.
    pub auto_done: bool,
    /// Leave done nodes and edges into them out of the output.
    pub hide_done: bool,
    /// Graphviz `rankdir` attribute.
    pub rankdir: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            auto_done: false,
            hide_done: false,
            rankdir: DEFAULT_RANKDIR.to_owned(),
        }
    }
}

/// Apply done propagation if requested and generate DOT text.
#[must_use]
pub fn compile(mut graph: MikadoGraph, options: &RenderOptions) -> String {
    if options.auto_done {
        graph.propagate_done();
    }
    generate(&graph, options)
}

/// Generate DOT text for `graph` without altering done flags.
///
/// # Examples
///
/// ```
/// use mikado::dot_gen::{generate, RenderOptions};
/// use mikado::parser::{self, ParseOptions};
///
/// let graph = parser::from_str("A -> B", &ParseOptions::default())?;
/// let dot = generate(&graph, &RenderOptions::default());
/// assert!(dot.contains("\"A\" -> \"B\";"));
/// # Ok::<(), mikado::parser::ParseError>(())
/// ```
#[must_use]
pub fn generate(graph: &MikadoGraph, options: &RenderOptions) -> String {
    DotGraph { graph, options }.to_string()
}

/// Wrapper struct to display a whole graph.
struct DotGraph<'a> {
    graph: &'a MikadoGraph,
    options: &'a RenderOptions,
}

impl Display for DotGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let order: Vec<&Node> = self
            .graph
            .traversal_order()
            .into_iter()
            .filter_map(|name| self.graph.get(name))
            .collect();

        writeln!(f, "digraph G {{")?;
        writeln!(f, "    rankdir=\"{}\";", self.options.rankdir)?;
        for node in &order {
            if self.options.hide_done && node.done {
                continue;
            }
            if node.root || node.done {
                write!(f, "{}", NodeDecl(node))?;
            }
        }
        for node in &order {
            for prereq in &node.prereqs {
                let target_done = self.graph.get(prereq).is_some_and(|dep| dep.done);
                if self.options.hide_done && target_done {
                    continue;
                }
                write!(
                    f,
                    "{}",
                    DisplayEdge {
                        from: &node.name,
                        to: prereq,
                        dimmed: target_done,
                    }
                )?;
            }
        }
        writeln!(f, "}}")
    }
}

/// Wrapper struct to display a styled node declaration.
struct NodeDecl<'a>(&'a Node);

impl Display for NodeDecl<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut attrs = Vec::new();
        if self.0.root {
            attrs.push("style=bold".to_owned());
        }
        if self.0.done {
            attrs.push(format!("color={DONE_COLOUR}"));
            attrs.push(format!("fontcolor={DONE_COLOUR}"));
        }
        writeln!(f, "    \"{}\" [{}];", self.0.name, attrs.iter().join(", "))
    }
}

/// Wrapper struct to display a dependency edge.
struct DisplayEdge<'a> {
    from: &'a str,
    to: &'a str,
    dimmed: bool,
}

impl Display for DisplayEdge<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "    \"{}\" -> \"{}\"", self.from, self.to)?;
        if self.dimmed {
            write!(f, " [color={DONE_COLOUR}]")?;
        }
        writeln!(f, ";")
    }
}
