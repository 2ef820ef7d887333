//! File operations behind the three culling actions: keep, undo-keep
//! and the bulk delete of viewed source images on exit.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to delete {}: {source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepOutcome {
    /// The source file was copied into the output folder.
    Kept,
    /// A file with the same name is already there; nothing was written.
    AlreadyKept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The kept copy was deleted from the output folder.
    Removed,
    /// There was no kept copy to delete.
    NotKept,
}

/// Where a kept copy of `source` lives: the output folder plus the
/// source file's name. Recomputed on demand, never stored.
pub fn kept_path(output_dir: &Path, source: &Path) -> Result<PathBuf, ActionError> {
    let name = source
        .file_name()
        .ok_or_else(|| ActionError::NoFileName(source.to_path_buf()))?;
    Ok(output_dir.join(name))
}

pub fn keep(output_dir: &Path, source: &Path) -> Result<KeepOutcome, ActionError> {
    let target = kept_path(output_dir, source)?;
    if target.exists() {
        return Ok(KeepOutcome::AlreadyKept);
    }
    fs::copy(source, &target).map_err(|err| ActionError::Copy {
        from: source.to_path_buf(),
        to: target.clone(),
        source: err,
    })?;
    log::info!("Copied {} to {}", source.display(), target.display());
    Ok(KeepOutcome::Kept)
}

pub fn undo_keep(output_dir: &Path, source: &Path) -> Result<UndoOutcome, ActionError> {
    let target = kept_path(output_dir, source)?;
    if !target.exists() {
        return Ok(UndoOutcome::NotKept);
    }
    fs::remove_file(&target).map_err(|err| ActionError::Delete {
        path: target.clone(),
        source: err,
    })?;
    log::info!("Deleted kept copy {}", target.display());
    Ok(UndoOutcome::Removed)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub deleted: usize,
    pub failed: usize,
}

/// Deletes every path in `paths` from disk. Each deletion is
/// independent: a failure is logged and counted, and the loop carries
/// on with the remaining files.
pub fn delete_viewed(paths: &[PathBuf]) -> DeleteSummary {
    let mut summary = DeleteSummary::default();
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => summary.deleted += 1,
            Err(err) => {
                log::warn!("Failed to delete {}: {err}", path.display());
                summary.failed += 1;
            }
        }
    }
    log::info!(
        "Bulk delete finished: {} deleted, {} failed",
        summary.deleted,
        summary.failed
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Fixture {
        _dir: tempfile::TempDir,
        source_dir: PathBuf,
        output_dir: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().expect("failed to create temp dir");
        let source_dir = dir.path().join("source");
        let output_dir = dir.path().join("output");
        fs::create_dir(&source_dir).expect("create source dir");
        fs::create_dir(&output_dir).expect("create output dir");
        Fixture {
            _dir: dir,
            source_dir,
            output_dir,
        }
    }

    fn write_image(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).expect("write fixture file");
        path
    }

    #[test]
    fn keep_copies_the_file_bytes() {
        let fx = fixture();
        let source = write_image(&fx.source_dir, "a.jpg", b"jpeg-bytes");

        let outcome = keep(&fx.output_dir, &source).expect("keep should succeed");

        assert_eq!(outcome, KeepOutcome::Kept);
        let copied = fs::read(fx.output_dir.join("a.jpg")).expect("copy should exist");
        assert_eq!(copied, b"jpeg-bytes");
    }

    #[test]
    fn keep_twice_reports_already_kept_and_keeps_first_copy() {
        let fx = fixture();
        let source = write_image(&fx.source_dir, "a.jpg", b"first");

        assert_eq!(keep(&fx.output_dir, &source).unwrap(), KeepOutcome::Kept);
        // Change the source afterwards; the second keep must not overwrite.
        fs::write(&source, b"second").expect("rewrite source");
        assert_eq!(
            keep(&fx.output_dir, &source).unwrap(),
            KeepOutcome::AlreadyKept
        );

        let copied = fs::read(fx.output_dir.join("a.jpg")).expect("copy should exist");
        assert_eq!(copied, b"first");
    }

    #[test]
    fn keep_of_missing_source_fails() {
        let fx = fixture();
        let source = fx.source_dir.join("gone.jpg");
        assert!(matches!(
            keep(&fx.output_dir, &source),
            Err(ActionError::Copy { .. })
        ));
    }

    #[test]
    fn undo_keep_removes_the_copy() {
        let fx = fixture();
        let source = write_image(&fx.source_dir, "a.jpg", b"data");
        keep(&fx.output_dir, &source).expect("keep should succeed");

        let outcome = undo_keep(&fx.output_dir, &source).expect("undo should succeed");

        assert_eq!(outcome, UndoOutcome::Removed);
        assert!(!fx.output_dir.join("a.jpg").exists());
    }

    #[test]
    fn undo_keep_without_copy_reports_not_kept() {
        let fx = fixture();
        let source = write_image(&fx.source_dir, "a.jpg", b"data");

        let outcome = undo_keep(&fx.output_dir, &source).expect("undo should succeed");

        assert_eq!(outcome, UndoOutcome::NotKept);
        // No filesystem mutation anywhere.
        assert!(source.exists());
        assert_eq!(fs::read_dir(&fx.output_dir).unwrap().count(), 0);
    }

    #[test]
    fn delete_viewed_removes_exactly_the_given_paths() {
        let fx = fixture();
        let a = write_image(&fx.source_dir, "a.jpg", b"a");
        let b = write_image(&fx.source_dir, "b.jpg", b"b");
        let c = write_image(&fx.source_dir, "c.jpg", b"c");

        let summary = delete_viewed(&[a.clone(), b.clone()]);

        assert_eq!(summary, DeleteSummary { deleted: 2, failed: 0 });
        assert!(!a.exists());
        assert!(!b.exists());
        assert!(c.exists());
    }

    #[test]
    fn delete_viewed_continues_past_failures() {
        let fx = fixture();
        let a = write_image(&fx.source_dir, "a.jpg", b"a");
        let missing = fx.source_dir.join("already-gone.jpg");
        let b = write_image(&fx.source_dir, "b.jpg", b"b");

        let summary = delete_viewed(&[a.clone(), missing, b.clone()]);

        assert_eq!(summary, DeleteSummary { deleted: 2, failed: 1 });
        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn kept_path_joins_output_dir_and_basename() {
        let path = kept_path(Path::new("/out"), Path::new("/src/photo.png")).unwrap();
        assert_eq!(path, Path::new("/out/photo.png"));
    }
}
