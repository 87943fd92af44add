#![forbid(unsafe_code)]

//! Shared environment constants used across mikado crates (library, tests, and
//! helpers).

/// Environment variable override for the Graphviz renderer executable.
///
/// # Examples
///
/// ```
/// use dot_env::DOT_ENV;
/// assert_eq!(DOT_ENV, "MIKADO_DOT");
/// ```
pub const DOT_ENV: &str = "MIKADO_DOT";

/// Renderer executable used when [`DOT_ENV`] is unset.
pub const DOT_PROGRAM: &str = "dot";
