//! Command line interface for the installer builder.
//!
//! Wires argument parsing, preflight checks, version resolution and the
//! per-architecture assembly loop together, and maps every outcome to the
//! documented exit codes (0 success, 2 usage/location error, 1 everything
//! else).

mod args;

pub use args::Args;

use crate::builder::{BuildConfig, InstallerBuilder, preflight, scratch, version};
use crate::error::{Error, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(err) => {
            // clap already renders usage/help/version output
            let code = if err.use_stderr() { 2 } else { 0 };
            let _ = err.print();
            return Ok(code);
        }
    };

    // Preflight before any side effect: correct directory first, then the
    // packaging tool, so the two failure modes keep distinct exit codes.
    preflight::check_project_root()?;
    let makeself = preflight::find_makeself().ok_or(Error::PackagingToolMissing)?;

    let release_version = version::resolve_release_version()?;
    let config = BuildConfig::new(release_version, args.iteration);
    log::info!(
        "Building {} {} installers (iteration {})",
        config.release,
        config.version,
        config.iteration
    );

    let builder = InstallerBuilder::new(config, makeself);

    // The scratch directory must be gone on every exit path, including
    // Ctrl-C, so the loop is raced against the interrupt signal and cleanup
    // runs unconditionally afterwards.
    let result = tokio::select! {
        res = builder.build_all() => res,
        _ = tokio::signal::ctrl_c() => {
            log::warn!("interrupted, removing scratch directory");
            Err(Error::Interrupted)
        }
    };

    // An interrupt can leave the blocking unpack task in flight; wait for
    // it before removing the directory it writes into.
    builder.finish_pending().await;
    let cleanup = scratch::remove_scratch(builder.scratch_dir()).await;

    result?;
    cleanup?;
    Ok(0)
}
