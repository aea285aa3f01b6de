//! Scratch directory lifecycle.
//!
//! The scratch directory is the exclusively-owned staging area for one
//! architecture's installer payload. It is emptied before and after each
//! use, so no stale content from one architecture can leak into the next
//! installer, and removed entirely at the end of the run.

use std::io;
use std::path::Path;

use tokio::fs;

use crate::error::Result;

/// Create the scratch directory empty, clearing any leftover content.
pub async fn ensure_fresh_scratch(path: &Path) -> Result<()> {
    remove_scratch(path).await?;
    fs::create_dir_all(path).await?;
    Ok(())
}

/// Remove the scratch directory's contents but keep the directory itself.
pub async fn clear_scratch(path: &Path) -> Result<()> {
    let mut entries = fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let entry_path = entry.path();
        if entry.file_type().await?.is_dir() {
            fs::remove_dir_all(&entry_path).await?;
        } else {
            fs::remove_file(&entry_path).await?;
        }
    }
    Ok(())
}

/// Remove the scratch directory and its contents if it exists.
pub async fn remove_scratch(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_fresh_scratch_drops_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        std::fs::create_dir_all(scratch.join("stale")).unwrap();
        std::fs::write(scratch.join("stale/file"), b"old").unwrap();

        ensure_fresh_scratch(&scratch).await.unwrap();

        assert!(scratch.is_dir());
        assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn clear_scratch_keeps_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().to_path_buf();
        std::fs::write(scratch.join("setup"), b"#!/bin/sh\n").unwrap();
        std::fs::create_dir_all(scratch.join("payload/bin")).unwrap();

        clear_scratch(&scratch).await.unwrap();

        assert!(scratch.is_dir());
        assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn remove_scratch_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");

        remove_scratch(&scratch).await.unwrap();
        std::fs::create_dir_all(&scratch).unwrap();
        remove_scratch(&scratch).await.unwrap();
        assert!(!scratch.exists());
    }
}
