//! Distribution tarball lookup, local build fallback and extraction.
//!
//! The prebuilt binary distribution is consumed as
//! `kestrel-<version>-linux-<arch>.tar.gz` from the configured work
//! directory. A missing tarball is not immediately fatal: the
//! build-binaries collaborator (`make dist-linux-<arch>`) is invoked by
//! convention first, and only a failed or fruitless build aborts the run.

use std::path::{Path, PathBuf};

use crate::bail;
use crate::builder::config::{Arch, BuildConfig};
use crate::error::{Error, ErrorExt as _, Result};

/// Return the tarball path for one architecture, building it locally when
/// it is missing.
pub async fn ensure_tarball(config: &BuildConfig, arch: Arch) -> Result<PathBuf> {
    let tarball = config.work_dir.join(config.tarball_name(arch));
    if tarball.is_file() {
        log::debug!("Using existing tarball {}", tarball.display());
        return Ok(tarball);
    }

    let target = format!("dist-linux-{}", arch.label());
    log::warn!(
        "{} not found, building it locally via 'make {}'",
        tarball.display(),
        target
    );

    let status = tokio::process::Command::new("make")
        .arg(&target)
        .current_dir(&config.work_dir)
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: format!("make {}", target),
            source: e,
        })?;

    if !status.success() {
        bail!("'make {}' failed with exit code: {:?}", target, status.code());
    }
    if !tarball.is_file() {
        bail!(
            "'make {}' succeeded but {} still does not exist",
            target,
            tarball.display()
        );
    }

    Ok(tarball)
}

/// Unpack a gzip-compressed tarball on the blocking pool.
///
/// Returns the task handle together with a receiver for the unpack result.
/// The handle stays valid when the receiver is dropped, so a caller that
/// abandons the result (an interrupted run) can still wait for the task
/// before touching the destination directory.
pub fn spawn_unpack(
    tarball: &Path,
    dest: &Path,
) -> (
    tokio::task::JoinHandle<()>,
    tokio::sync::oneshot::Receiver<Result<()>>,
) {
    log::info!("Extracting {} into {}", tarball.display(), dest.display());

    let tarball = tarball.to_path_buf();
    let dest = dest.to_path_buf();
    let (tx, rx) = tokio::sync::oneshot::channel();

    let handle = tokio::task::spawn_blocking(move || {
        let _ = tx.send(unpack(&tarball, &dest));
    });

    (handle, rx)
}

/// Extract a gzip-compressed tarball into the given directory and wait for
/// the result.
pub async fn extract_tarball(tarball: &Path, dest: &Path) -> Result<()> {
    let (handle, done) = spawn_unpack(tarball, dest);
    let result = done.await.map_err(|_| {
        Error::GenericError("tarball extraction task dropped its result".to_string())
    });
    handle
        .await
        .map_err(|e| Error::GenericError(format!("tarball extraction task panicked: {}", e)))?;
    result?
}

fn unpack(tarball: &Path, dest: &Path) -> Result<()> {
    let file = std::fs::File::open(tarball).fs_context("opening tarball", tarball)?;
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
    archive.set_preserve_permissions(true);
    archive.unpack(dest).fs_context("extracting tarball", dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{Compression, write::GzEncoder};

    fn write_test_tarball(path: &Path) {
        let file = std::fs::File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut header = tar::Header::new_gnu();
        header.set_size(6);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "kestrel/conf/kestrel.conf", &b"test\n\n"[..])
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[tokio::test]
    async fn extracts_into_destination() {
        let dir = tempfile::tempdir().unwrap();
        let tarball = dir.path().join("dist.tar.gz");
        let dest = dir.path().join("scratch");
        std::fs::create_dir_all(&dest).unwrap();
        write_test_tarball(&tarball);

        extract_tarball(&tarball, &dest).await.unwrap();

        assert!(dest.join("kestrel/conf/kestrel.conf").is_file());
    }

    #[tokio::test]
    async fn missing_tarball_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_tarball(&dir.path().join("nope.tar.gz"), dir.path()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unpack_task_outlives_a_dropped_result() {
        let dir = tempfile::tempdir().unwrap();
        let tarball = dir.path().join("dist.tar.gz");
        let dest = dir.path().join("scratch");
        std::fs::create_dir_all(&dest).unwrap();
        write_test_tarball(&tarball);

        let (handle, done) = spawn_unpack(&tarball, &dest);
        // A caller that was cancelled abandons the result; waiting on the
        // handle still means the unpack has finished before cleanup runs.
        drop(done);
        handle.await.unwrap();

        assert!(dest.join("kestrel/conf/kestrel.conf").is_file());
    }
}
