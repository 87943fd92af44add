//! Input resolution and output naming for the runner module.

use super::RunnerError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Command-line sentinel for reading standard input.
pub const STDIN_SENTINEL: &str = "-";

/// File stem used for outputs rendered from standard input.
const STDIN_STEM: &str = "stdin";

/// Extension of DOT files kept with `--emit-dot`.
pub const DOT_EXTENSION: &str = "gv";

/// Where a notation document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(Utf8PathBuf),
}

impl InputSource {
    /// Classify a command-line path, checking that files exist.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::NonUtf8Path`] for non UTF-8 paths and
    /// [`RunnerError::InputNotFound`] when the file is missing.
    pub fn resolve(path: &Path) -> Result<Self, RunnerError> {
        if path.as_os_str() == STDIN_SENTINEL {
            return Ok(Self::Stdin);
        }
        let file = Utf8Path::from_path(path).ok_or_else(|| RunnerError::NonUtf8Path {
            path: path.to_path_buf(),
        })?;
        if !file.exists() {
            return Err(RunnerError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::File(file.to_owned()))
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Stdin => "<stdin>",
            Self::File(path) => path.as_str(),
        }
    }

    /// Rendered image path: the input's base name with `format` as extension.
    ///
    /// The output lands beside the input, in the same directory. Standard
    /// input renders to `stdin.<format>` in the working directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use mikado::runner::InputSource;
    ///
    /// let source = InputSource::File("plans/release.mikado".into());
    /// assert_eq!(source.output_path("svg"), "plans/release.svg");
    /// assert_eq!(InputSource::Stdin.output_path("png"), "stdin.png");
    /// ```
    #[must_use]
    pub fn output_path(&self, format: &str) -> Utf8PathBuf {
        match self {
            Self::Stdin => Utf8PathBuf::from(STDIN_STEM).with_extension(format),
            Self::File(path) => path.with_extension(format),
        }
    }

    /// Path of the DOT file kept alongside the rendered image.
    #[must_use]
    pub fn dot_path(&self) -> Utf8PathBuf {
        self.output_path(DOT_EXTENSION)
    }
}

impl Display for InputSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
