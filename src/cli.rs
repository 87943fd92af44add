//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and projects its flags onto the
//! option structs consumed by the parser and the DOT generator.

use crate::dot_gen::{DEFAULT_RANKDIR, RenderOptions};
use crate::parser::ParseOptions;
use clap::Parser;
use std::path::PathBuf;

/// Output format handed to the renderer when none is given.
pub const DEFAULT_FORMAT: &str = "png";

/// Render Mikado-method dependency trees written in a simple arrow notation.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Notation files to render; `-` reads standard input.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Print the DOT description instead of running the renderer.
    #[arg(short, long)]
    pub stdout: bool,

    /// Output format passed to the renderer as `-T<FORMAT>`.
    #[arg(
        short,
        long,
        value_name = "FORMAT",
        default_value = DEFAULT_FORMAT,
        env = "MIKADO_FORMAT"
    )]
    pub format: String,

    /// Direction in which the graph is laid out.
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = DEFAULT_RANKDIR,
        env = "MIKADO_RANKDIR",
        value_parser = ["TB", "BT", "LR", "RL"]
    )]
    pub rankdir: String,

    /// Mark tasks done when all of their prerequisites are done.
    #[arg(long)]
    pub auto_done: bool,

    /// Leave done tasks out of the graph.
    #[arg(long)]
    pub hide_done: bool,

    /// Strip done markers without treating tasks as done.
    #[arg(long)]
    pub ignore_done: bool,

    /// Keep the generated DOT file next to the rendered image.
    #[arg(long)]
    pub emit_dot: bool,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether output is piped through the external renderer.
    #[must_use]
    pub const fn render_externally(&self) -> bool {
        !self.stdout
    }

    /// Options for [`crate::parser`].
    #[must_use]
    pub const fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            ignore_done: self.ignore_done,
        }
    }

    /// Options for [`crate::dot_gen`].
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            auto_done: self.auto_done,
            hide_done: self.hide_done,
            rankdir: self.rankdir.clone(),
        }
    }
}
