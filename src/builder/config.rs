//! Build configuration and per-architecture job derivation.
//!
//! The configuration is computed once at startup and immutable from then on;
//! everything the assembly loop and the setup-script generator need (file
//! names, labels, directories) is derived from it.

use std::path::PathBuf;

/// Release name; also the service user and the data directory name on the
/// target host.
pub const RELEASE_NAME: &str = "kestrel";

/// Installation prefix used for superuser installs on the target host.
pub const DEFAULT_PREFIX: &str = "/opt";

/// systemd unit installed by the setup script on superuser installs.
pub const UNIT_NAME: &str = "kestrel.service";

/// Staging area for one architecture's installer payload.
pub const SCRATCH_DIR: &str = ".installer-scratch";

/// CPU architecture for target installers.
///
/// The set is fixed: Kestrel ships Linux installers for x64 and arm64 only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X64,
    /// AArch64 / ARM64 (64-bit)
    Arm64,
}

impl Arch {
    /// All architectures an installer is built for, in build order.
    pub const ALL: [Arch; 2] = [Arch::X64, Arch::Arm64];

    /// Architecture tag as it appears in tarball and installer names.
    pub fn label(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

/// Immutable parameters for one builder invocation.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Release name (fixed, see [`RELEASE_NAME`]).
    pub release: String,

    /// Release version derived from the nearest git tag.
    pub version: String,

    /// Operator-supplied package iteration, embedded verbatim in installer
    /// filenames.
    pub iteration: String,

    /// Directory tarballs are read from and installers are written to;
    /// the current directory (the project root) in production runs.
    pub work_dir: PathBuf,

    /// Scratch directory used as the makeself payload root.
    pub scratch_dir: PathBuf,
}

impl BuildConfig {
    /// Create the configuration for one run.
    pub fn new(version: String, iteration: String) -> Self {
        Self {
            release: RELEASE_NAME.to_string(),
            version,
            iteration,
            work_dir: PathBuf::from("."),
            scratch_dir: PathBuf::from(SCRATCH_DIR),
        }
    }

    /// Input tarball name for one architecture.
    pub fn tarball_name(&self, arch: Arch) -> String {
        format!(
            "{}-{}-linux-{}.tar.gz",
            self.release,
            self.version,
            arch.label()
        )
    }

    /// Output installer name for one architecture.
    pub fn installer_name(&self, arch: Arch) -> String {
        format!(
            "{}-{}-{}-linux-{}.run",
            self.release,
            self.version,
            self.iteration,
            arch.label()
        )
    }

    /// Human-readable label shown by the self-extracting archive.
    pub fn label(&self, arch: Arch) -> String {
        format!(
            "{} {} installer (linux-{})",
            self.release,
            self.version,
            arch.label()
        )
    }

    /// Derive the job record for one architecture.
    pub fn job(&self, arch: Arch) -> ArchJob {
        ArchJob {
            arch,
            tarball: self.work_dir.join(self.tarball_name(arch)),
            installer: self.work_dir.join(self.installer_name(arch)),
            scratch_dir: self.scratch_dir.clone(),
        }
    }
}

/// One installer build: the paths one architecture's assembly works with.
#[derive(Clone, Debug)]
pub struct ArchJob {
    /// Target architecture.
    pub arch: Arch,
    /// Input distribution tarball.
    pub tarball: PathBuf,
    /// Output installer file.
    pub installer: PathBuf,
    /// Payload staging directory.
    pub scratch_dir: PathBuf,
}
