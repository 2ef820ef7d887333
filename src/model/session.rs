//! The ordered set of image paths for one browsing session and the
//! cursor that walks it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions recognized as images, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Lists the image files directly inside `dir` (non-recursive), in the
/// order the filesystem enumerates them. That order is not sorted.
pub fn scan_source(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_supported_extension(&path) {
            images.push(path);
        }
    }
    log::info!("Found {} image(s) in {}", images.len(), dir.display());
    Ok(images)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Immutable-after-construction list of images plus the current cursor.
///
/// The cursor is always within bounds: `Session` can only be built from
/// a non-empty list and navigation clamps at both ends.
#[derive(Debug, Clone)]
pub struct Session {
    images: Vec<PathBuf>,
    cursor: usize,
}

impl Session {
    /// Returns `None` for an empty image list; an empty source folder is
    /// a fatal startup condition handled by the caller.
    pub fn new(images: Vec<PathBuf>) -> Option<Self> {
        if images.is_empty() {
            None
        } else {
            Some(Self { images, cursor: 0 })
        }
    }

    pub fn current(&self) -> &Path {
        &self.images[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 1-based position for the window title.
    pub fn position(&self) -> usize {
        self.cursor + 1
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Moves the cursor back one image. Returns whether it moved; at the
    /// first image this is a no-op, not a wraparound.
    pub fn move_previous(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor forward one image, clamped at the last one.
    pub fn move_next(&mut self) -> bool {
        if self.cursor + 1 < self.images.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Every image viewed so far, including the current one.
    pub fn viewed(&self) -> &[PathBuf] {
        &self.images[..=self.cursor]
    }
}
