//! Diagnostics utilities.
//!
//! Renders the first `miette` diagnostic found in an error chain with the
//! graphical report handler, falling back to the plain `anyhow` chain for
//! errors that carry no diagnostic metadata.
//!
//! # Examples
//! ```
//! use mikado::diagnostics::render;
//! use mikado::parser::{self, ParseOptions};
//!
//! let err = parser::from_str("  -> orphan", &ParseOptions::default()).unwrap_err();
//! let report = render(&anyhow::Error::new(err));
//! assert!(report.contains("align the leading"));
//! ```

use crate::parser::ParseError;
use crate::runner::RunnerError;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};

/// Format `err` for the terminal.
#[must_use]
pub fn render(err: &anyhow::Error) -> String {
    let context = format!("{err:#}");
    let Some(diagnostic) = find_diagnostic(err) else {
        return context;
    };
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut report = String::new();
    match handler.render_report(&mut report, diagnostic) {
        Ok(()) => format!("{context}\n{report}"),
        Err(_) => context,
    }
}

fn find_diagnostic(err: &anyhow::Error) -> Option<&dyn Diagnostic> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<ParseError>()
            .map(|diag| diag as &dyn Diagnostic)
            .or_else(|| {
                cause
                    .downcast_ref::<RunnerError>()
                    .map(|diag| diag as &dyn Diagnostic)
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use rstest::rstest;

    #[rstest]
    fn plain_errors_keep_their_context_chain() {
        let err = Err::<(), _>(std::io::Error::other("disk on fire"))
            .context("reading plan")
            .expect_err("error");
        assert_eq!(render(&err), "reading plan: disk on fire");
    }

    #[rstest]
    fn runner_errors_include_help() {
        let err = anyhow::Error::new(RunnerError::InputNotFound {
            path: "plan.mikado".into(),
        });
        let report = render(&err);
        assert!(report.contains("input file plan.mikado not found"));
        assert!(report.contains("standard input"));
    }
}
