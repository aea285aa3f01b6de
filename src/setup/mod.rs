//! Setup-script generation.
//!
//! The setup script is a text artifact, not code the builder executes: a
//! POSIX shell installer rendered from a structured template and shipped
//! inside the self-extracting archive, where makeself runs it as `./setup`
//! on the target host.
//!
//! # Module Organization
//!
//! - [`params`] - Named template parameters and the substitution table
//! - [`script`] - Template rendering and payload file generation
//! - [`template`] - Setup-script and help-banner template constants

pub mod params;
pub mod script;
pub mod template;

pub use params::SetupParams;
pub use script::{
    HELP_HEADER_NAME, SETUP_SCRIPT_NAME, generate_setup_script, write_help_header,
};
