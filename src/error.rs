//! Error types for installer assembly.
//!
//! This module defines all error types together with the process exit-code
//! mapping: usage and wrong-directory errors exit with 2, everything else
//! (missing packaging tool, build/extraction/packaging failures) with 1.

use std::path::Path;
use thiserror::Error;

/// Result type alias for installer builder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all installer builder operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invoked from a directory that is not the project root
    #[error(
        "this does not look like the Kestrel project root ({missing} not found); \
         run the installer builder from the top of the source tree"
    )]
    WrongDirectory {
        /// Sentinel file that was not found
        missing: &'static str,
    },

    /// Required packaging tool not discoverable
    #[error(
        "the makeself packaging tool is required but was found under neither \
         'makeself' nor 'makeself.sh'; install it and retry"
    )]
    PackagingToolMissing,

    /// External command failed to start
    #[error("failed to execute {command}: {source}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// Run was interrupted (Ctrl-C)
    #[error("interrupted")]
    Interrupted,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template registration errors
    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// Template rendering errors
    #[error("template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Generic errors from anyhow (git plumbing and friends)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic string errors
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Map an error to the builder's process exit code.
    ///
    /// Usage and wrong-directory errors are reported with 2, every other
    /// failure with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::WrongDirectory { .. } => 2,
            _ => 1,
        }
    }
}

/// Construct a [`Error::GenericError`] and return it from the enclosing
/// function.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::Error::GenericError(format!($($arg)*)).into())
    };
}

/// Extension trait annotating IO results with the operation and path.
pub trait ErrorExt<T> {
    /// Attach a file-system context (what was attempted, on which path).
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| {
            Error::GenericError(format!("{} ({}): {}", action, path.display(), e))
        })
    }
}
