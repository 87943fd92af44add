//! Error types for the parser module.
//!
//! This submodule isolates derive-macro-affected code to scope lint suppressions
//! narrowly. The `unused_assignments` lint fires in some Rust versions due to
//! thiserror/miette derive macro expansion.

// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors raised while building a graph from the arrow notation.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// The input could not be opened or read.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(mikado::parser::unreadable_source))]
    UnreadableSource {
        /// Display name of the input.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A line starting with `->` is not aligned under any earlier node.
    #[error("{name}:{line}: no earlier node spans the arrow at column {column}: {text}")]
    #[diagnostic(
        code(mikado::parser::unresolved_continuation),
        help("align the leading `->` under the node it continues from")
    )]
    UnresolvedContinuation {
        /// Display name of the input.
        name: String,
        /// One-based line number.
        line: usize,
        /// Character column of the leading arrow.
        column: usize,
        /// Raw text of the offending line.
        #[source_code]
        text: String,
        /// Location of the arrow within `text`.
        #[label("this arrow has no parent")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub(crate) fn unresolved(name: &str, line: usize, column: usize, text: &str) -> Self {
        let offset = text
            .char_indices()
            .nth(column)
            .map_or(text.len(), |(idx, _)| idx);
        Self::UnresolvedContinuation {
            name: name.to_owned(),
            line,
            column,
            text: text.to_owned(),
            span: SourceSpan::from((offset, super::ARROW.len())),
        }
    }
}
