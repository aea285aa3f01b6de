//! Release version resolution from version control.
//!
//! The release version is purely descriptive: it names output files and
//! shows up in display text. It is derived from `git describe` semantics
//! against all tags and normalized, with no semantic-versioning validation;
//! any tag is accepted as-is after the substitutions.

use anyhow::Context as _;
use gix::commit::describe::SelectRef;

use crate::error::{Error, Result};

/// Resolve the release version from the nearest tag of the repository in
/// the current directory.
pub fn resolve_release_version() -> Result<String> {
    let repo = gix::discover(".").context("discovering the git repository")?;
    let head = repo.head_commit().context("resolving the HEAD commit")?;
    let resolution = head
        .describe()
        .names(SelectRef::AllTags)
        .try_resolve()
        .context("describing HEAD against tags")?
        .ok_or_else(|| {
            Error::GenericError("no tag found to derive a release version from".to_string())
        })?;
    let described = resolution
        .format()
        .context("formatting the describe result")?
        .to_string();

    log::debug!("HEAD described as {}", described);
    Ok(normalize_version(&described))
}

/// Normalize a `git describe` string into a release version.
///
/// Strips whitespace, a leading `v` and the trailing `-g<hex>` commit-id
/// suffix, then converts the first remaining separator to a dot:
/// `v1.2.3-4-gdeadbee` becomes `1.2.3.4`.
pub fn normalize_version(described: &str) -> String {
    let mut version: String = described.split_whitespace().collect();

    if let Some(stripped) = version.strip_prefix('v') {
        version = stripped.to_string();
    }

    if let Some(idx) = version.rfind("-g") {
        let hash = &version[idx + 2..];
        if !hash.is_empty() && hash.chars().all(|c| c.is_ascii_hexdigit()) {
            version.truncate(idx);
        }
    }

    version.replacen('-', ".", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_output_with_distance_and_hash() {
        assert_eq!(normalize_version("v1.2.3-4-gdeadbee"), "1.2.3.4");
        assert_eq!(normalize_version("v0.9.0-12-g00ff00"), "0.9.0.12");
    }

    #[test]
    fn exact_tag_keeps_its_digits() {
        assert_eq!(normalize_version("v1.2.3"), "1.2.3");
        assert_eq!(normalize_version("2.0"), "2.0");
    }

    #[test]
    fn whitespace_is_stripped() {
        assert_eq!(normalize_version(" v1.2.3-4-gdeadbee\n"), "1.2.3.4");
    }

    #[test]
    fn non_semver_tags_are_accepted() {
        // Only the first separator becomes a dot; the rest of the tag is
        // carried through untouched.
        assert_eq!(normalize_version("v2.0-rc1"), "2.0.rc1");
        assert_eq!(normalize_version("release-5"), "release.5");
    }

    #[test]
    fn hash_suffix_is_only_stripped_when_it_is_hex() {
        assert_eq!(normalize_version("v1.0-great"), "1.0.great");
    }
}
