//! Batch errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use vg_diagnostic::Diagnostic;
use vg_frontend::FrontendError;

/// Anything that aborts a generation batch.
///
/// Every variant is raised before the destination is touched, or while the
/// staged output is still unpersisted, so an existing artifact survives any
/// of them.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The parser reported at least one diagnostic at or above warning.
    #[error("code generation failed: {} reported {}", .path.display(), FatalCount(.diagnostics))]
    FatalDiagnostics {
        path: PathBuf,
        /// Everything the parser reported for `path`, in order.
        diagnostics: Vec<Diagnostic>,
    },

    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

struct FatalCount<'a>(&'a [Diagnostic]);

impl fmt::Display for FatalCount<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match vg_diagnostic::fatal_diagnostics(self.0).count() {
            1 => write!(f, "1 fatal diagnostic"),
            n => write!(f, "{n} fatal diagnostics"),
        }
    }
}

impl GenerateError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenerateError::Output {
            path: path.into(),
            source,
        }
    }
}
