//! Error types for the runner module.
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

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating inputs and invoking the renderer.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// An input file does not exist.
    #[error("input file {} not found", .path.display())]
    #[diagnostic(
        code(mikado::runner::input_not_found),
        help("pass an existing notation file, or `-` to read standard input")
    )]
    InputNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// An input path is not valid UTF-8.
    #[error("input path {} is not valid UTF-8", .path.display())]
    #[diagnostic(code(mikado::runner::non_utf8_path))]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The kept DOT file would be overwritten by the rendered output.
    #[error("rendered output {path} would overwrite the emitted DOT file")]
    #[diagnostic(
        code(mikado::runner::output_clash),
        help("choose a format other than `gv`, or drop `--emit-dot`")
    )]
    OutputClash {
        /// The shared path.
        path: String,
    },
}
