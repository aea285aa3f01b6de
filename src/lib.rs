//! Installer builder library for the Kestrel server.
//!
//! This library assembles self-extracting Linux installers (`.run`, via
//! makeself) for the two supported architectures:
//! - stages the prebuilt binary-distribution tarball into a scratch directory
//! - generates the interactive `setup` shell script that runs on the target
//!   host at install time
//! - invokes the packaging tool and cleans up after itself
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod builder;
pub mod cli;
pub mod error;
pub mod setup;

// Re-export commonly used types
pub use error::{Error, Result};
