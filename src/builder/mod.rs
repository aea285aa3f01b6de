//! Installer assembly and coordination.
//!
//! This module provides the [`InstallerBuilder`] orchestrator that produces
//! one self-extracting `.run` installer per target architecture.
//!
//! # Overview
//!
//! The builder:
//! 1. Resolves the release version from the nearest git tag
//! 2. Locates (or builds) the per-architecture distribution tarball
//! 3. Stages the payload into a scratch directory together with the help
//!    banner and the generated `setup` script
//! 4. Invokes makeself to produce the installer
//! 5. Clears the scratch directory between architectures and removes it at
//!    the end
//!
//! # Module Organization
//!
//! - [`config`] - Build configuration and per-architecture jobs
//! - [`orchestrator`] - Main [`InstallerBuilder`] struct and assembly loop
//! - [`preflight`] - Project-root sentinel and packaging-tool checks
//! - [`scratch`] - Scratch directory lifecycle helpers
//! - [`tarball`] - Distribution tarball lookup, local build and extraction
//! - [`version`] - Release version resolution from version control

pub mod config;
pub mod orchestrator;
pub mod preflight;
pub mod scratch;
pub mod tarball;
pub mod version;

pub use config::{Arch, ArchJob, BuildConfig};
pub use orchestrator::InstallerBuilder;
