//! Preflight checks: invocation directory and packaging-tool availability.
//!
//! Both checks run before any side effect. The wrong-directory failure keeps
//! its own exit code (2) so callers can tell it apart from a missing tool
//! (1).

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Files that must exist in the current directory for it to count as the
/// Kestrel project root.
pub const SENTINEL_FILES: [&str; 2] = ["Makefile", "LICENSE"];

/// The packaging tool is shipped under either name depending on the distro.
const MAKESELF_NAMES: [&str; 2] = ["makeself", "makeself.sh"];

/// Locate the makeself packaging tool.
///
/// Cached result to avoid repeated PATH searches during the assembly loop.
static MAKESELF: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    for name in MAKESELF_NAMES {
        match which::which(name) {
            Ok(path) => {
                log::debug!("Found {} at: {}", name, path.display());
                return Some(path);
            }
            Err(e) => {
                log::debug!("{} not found in PATH: {}", name, e);
            }
        }
    }
    None
});

/// Verify the builder is being run from the project root.
///
/// Checks for the presence of the sentinel files in the current directory
/// and fails with [`Error::WrongDirectory`] on the first one missing.
pub fn check_project_root() -> Result<()> {
    check_project_root_in(Path::new("."))
}

fn check_project_root_in(dir: &Path) -> Result<()> {
    for sentinel in SENTINEL_FILES {
        if !dir.join(sentinel).is_file() {
            return Err(Error::WrongDirectory { missing: sentinel });
        }
    }
    Ok(())
}

/// Return the path to makeself, if discoverable under either known name.
pub fn find_makeself() -> Option<PathBuf> {
    MAKESELF.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_is_not_the_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_project_root_in(dir.path()).unwrap_err();
        assert!(matches!(err, Error::WrongDirectory { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn both_sentinels_are_required() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Makefile"), "all:\n").unwrap();
        let err = check_project_root_in(dir.path()).unwrap_err();
        assert!(matches!(err, Error::WrongDirectory { missing: "LICENSE" }));

        std::fs::write(dir.path().join("LICENSE"), "Apache-2.0\n").unwrap();
        check_project_root_in(dir.path()).unwrap();
    }
}
