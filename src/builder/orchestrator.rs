//! Main installer assembly loop.
//!
//! One architecture is processed completely (stage, package, clean) before
//! the next begins; the scratch directory is the only shared resource and
//! sequential processing is what keeps it exclusively owned.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::bail;
use crate::builder::config::{Arch, ArchJob, BuildConfig};
use crate::builder::{scratch, tarball};
use crate::error::{Error, Result};
use crate::setup::{self, SetupParams};

/// Main installer assembly orchestrator.
///
/// Coordinates the per-architecture jobs: tarball staging, setup-script
/// generation, makeself invocation and scratch cleanup.
pub struct InstallerBuilder {
    config: BuildConfig,
    makeself: PathBuf,
    /// In-flight unpack task, kept so cleanup after an interrupt can wait
    /// for it instead of racing its writes into the scratch directory.
    unpack: Mutex<Option<JoinHandle<()>>>,
}

impl InstallerBuilder {
    /// Creates a new builder from the resolved configuration and the path
    /// to the makeself packaging tool.
    pub fn new(config: BuildConfig, makeself: PathBuf) -> Self {
        Self {
            config,
            makeself,
            unpack: Mutex::new(None),
        }
    }

    /// Returns the scratch directory this run stages payloads in.
    pub fn scratch_dir(&self) -> &Path {
        &self.config.scratch_dir
    }

    /// Build one installer per supported architecture.
    ///
    /// Fail-fast: the first tarball, extraction or packaging failure aborts
    /// the run. The caller is responsible for removing the scratch directory
    /// afterwards on every exit path.
    pub async fn build_all(&self) -> Result<()> {
        scratch::ensure_fresh_scratch(&self.config.scratch_dir).await?;

        for arch in Arch::ALL {
            let job = self.config.job(arch);
            self.build_one(&job).await?;
            // Leave nothing behind for the next architecture.
            scratch::clear_scratch(&job.scratch_dir).await?;
        }

        Ok(())
    }

    /// Wait for any in-flight unpack task.
    ///
    /// Runs on the normal path after each extraction and from the CLI after
    /// an interrupt, so scratch removal never overlaps a detached writer.
    pub async fn finish_pending(&self) {
        if let Some(handle) = self.unpack.lock().await.take() {
            let _ = handle.await;
        }
    }

    /// Assemble the installer for a single architecture.
    async fn build_one(&self, job: &ArchJob) -> Result<()> {
        log::info!(
            "Assembling {} (linux-{})",
            job.installer.display(),
            job.arch.label()
        );

        let tarball = tarball::ensure_tarball(&self.config, job.arch).await?;

        let (handle, done) = tarball::spawn_unpack(&tarball, &job.scratch_dir);
        *self.unpack.lock().await = Some(handle);
        let unpacked = done.await.map_err(|_| {
            Error::GenericError("tarball extraction task dropped its result".to_string())
        });
        self.finish_pending().await;
        unpacked??;

        let params = SetupParams::new(&self.config, job.arch);
        let help_header = setup::write_help_header(&params, &job.scratch_dir).await?;
        setup::generate_setup_script(&params, &job.scratch_dir).await?;

        self.run_makeself(job, &help_header).await?;

        log::info!("✓ Created installer: {}", job.installer.display());
        Ok(())
    }

    /// Run makeself to wrap the staged payload into a `.run` installer.
    async fn run_makeself(&self, job: &ArchJob, help_header: &Path) -> Result<()> {
        let label = self.config.label(job.arch);
        log::debug!("Running {} for {}", self.makeself.display(), label);

        let status = tokio::process::Command::new(&self.makeself)
            .arg("--help-header")
            .arg(help_header)
            .arg(&job.scratch_dir)
            .arg(&job.installer)
            .arg(&label)
            .arg("./setup")
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| Error::CommandFailed {
                command: "makeself".to_string(),
                source: e,
            })?;

        if !status.success() {
            bail!("makeself failed with exit code: {:?}", status.code());
        }

        Ok(())
    }
}
