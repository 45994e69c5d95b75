//! Declaration file writer.
//!
//! ## `write_declaration` protocol
//!
//! 1. Write content to `<path>.typenames.tmp`.
//! 2. Rename to the final path (atomic on POSIX).
//! 3. On rename failure, remove the tmp file and report the error.
//!
//! The destination directory must already exist; see [`ensure_dir`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of a pipeline run for one declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (the name set changed).
    Written { path: PathBuf },
    /// File was skipped; the name set matches the last write.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// ensure_dir
// ---------------------------------------------------------------------------

/// Create `path` and any missing ancestors, parent before child.
///
/// No-op when `path` already exists (whatever its type).
pub fn ensure_dir(path: &Path) -> Result<(), SyncError> {
    let mut missing = Vec::new();
    let mut cursor = Some(path);
    while let Some(dir) = cursor {
        if dir.as_os_str().is_empty() || dir.exists() {
            break;
        }
        missing.push(dir);
        cursor = dir.parent();
    }

    for dir in missing.into_iter().rev() {
        match fs::create_dir(dir) {
            Ok(()) => tracing::debug!("created directory: {}", dir.display()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => {}
            Err(e) => return Err(io_err(dir, e)),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// write_declaration
// ---------------------------------------------------------------------------

/// Atomically replace `path` with `content`.
pub fn write_declaration(path: &Path, content: &str) -> Result<(), SyncError> {
    let tmp = PathBuf::from(format!("{}.typenames.tmp", path.display()));
    write_with_tmp(path, content, &tmp)
}

fn write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), SyncError> {
    fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = fs::rename(tmp, path) {
        let _ = fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::debug!("wrote: {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_dir_creates_nested_ancestors() {
        let tmp = TempDir::new().unwrap();
        let deep = tmp.path().join("a").join("b").join("c").join("d");
        ensure_dir(&deep).unwrap();
        assert!(deep.is_dir());
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("types");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        ensure_dir(tmp.path()).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_dir_handles_very_deep_paths() {
        let tmp = TempDir::new().unwrap();
        let mut deep = tmp.path().to_path_buf();
        for _ in 0..64 {
            deep.push("x");
        }
        ensure_dir(&deep).unwrap();
        assert!(deep.is_dir());
    }

    #[test]
    fn ensure_dir_leaves_existing_file_alone() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("taken");
        fs::write(&file, "x").unwrap();
        ensure_dir(&file).unwrap();
        assert!(file.is_file());
    }

    #[test]
    fn ensure_dir_under_a_file_fails_with_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("taken");
        fs::write(&file, "x").unwrap();
        let err = ensure_dir(&file.join("child")).expect_err("must fail");
        match err {
            SyncError::Io { path, .. } => assert_eq!(path, file.join("child")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn write_replaces_content_and_cleans_tmp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ts.d.ts");
        write_declaration(&path, "v1").unwrap();
        write_declaration(&path, "v2").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
        let tmp_path = PathBuf::from(format!("{}.typenames.tmp", path.display()));
        assert!(!tmp_path.exists(), ".typenames.tmp must be cleaned up");
    }

    #[test]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        let root = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file rename.
        let path = root.path().join("ts.d.ts");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let tmp_path = root.path().join("ts.d.ts.typenames.tmp");
        let err = write_with_tmp(&path, "new content", &tmp_path).expect_err("rename should fail");
        assert!(matches!(err, SyncError::Io { .. }));

        assert!(path.join("occupied").is_dir(), "original should be intact");
        assert!(!tmp_path.exists(), ".typenames.tmp should be cleaned up");
    }
}
