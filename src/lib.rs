//! Mikado core library.
//!
//! This library parses the Mikado arrow notation into a dependency graph,
//! compiles that graph to Graphviz DOT and drives the external renderer.

pub mod cli;
pub mod diagnostics;
pub mod dot_gen;
pub mod graph;
pub mod parser;
pub mod runner;
