//! File naming and the temporary sidecar copy.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Suffix appended to the input file name for the rewritten copy.
pub const TEMP_SUFFIX: &str = ".eps2pdf~";

/// Default output path: the input with its extension replaced by `pdf`.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Sidecar path for the rewritten copy: `<basename><ext>.eps2pdf~` next to
/// the input.
pub fn temp_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// A file that is deleted when dropped, unless [kept](TempFile::keep).
///
/// Backed by [`tempfile::TempPath`] at a caller-chosen location. The staged
/// copy is created just before the interpreter runs, so every exit path after
/// that, including unwinding, removes it.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
    guard: Option<TempPath>,
}

impl TempFile {
    /// Write `contents` to `path` and take ownership of the file.
    pub fn create(path: impl Into<PathBuf>, contents: &[u8]) -> Result<Self> {
        let path = path.into();
        let write_error = |source| Error::TempFileWrite {
            path: path.clone(),
            source,
        };

        // Guard first, so a partial write is removed too.
        let guard = TempPath::try_from_path(&path).map_err(write_error)?;
        fs::write(&guard, contents).map_err(write_error)?;
        log::debug!("Wrote {} bytes to {}", contents.len(), path.display());

        Ok(Self {
            path,
            guard: Some(guard),
        })
    }

    /// Take ownership of `path`, which may not exist yet.
    ///
    /// Whatever is at `path` when the guard drops is removed.
    pub fn adopt(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let guard = TempPath::try_from_path(&path)?;
        Ok(Self {
            path,
            guard: Some(guard),
        })
    }

    /// Location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Disarm the guard and leave the file in place.
    pub fn keep(mut self) -> PathBuf {
        if let Some(mut guard) = self.guard.take() {
            guard.disable_cleanup(true);
        }
        std::mem::take(&mut self.path)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let Some(guard) = self.guard.take() else {
            return;
        };
        match guard.close() {
            Ok(()) => log::debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {},
            Err(e) => log::warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(output_path(Path::new("dir/figure.eps")), PathBuf::from("dir/figure.pdf"));
        assert_eq!(output_path(Path::new("figure")), PathBuf::from("figure.pdf"));
        assert_eq!(output_path(Path::new("plot.v2.eps")), PathBuf::from("plot.v2.pdf"));
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(temp_path(Path::new("dir/figure.eps")), PathBuf::from("dir/figure.eps.eps2pdf~"));
        assert_eq!(temp_path(Path::new("figure")), PathBuf::from("figure.eps2pdf~"));
    }

    #[test]
    fn test_temp_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.eps.eps2pdf~");
        {
            let temp = TempFile::create(&path, b"%!PS").unwrap();
            assert_eq!(fs::read(temp.path()).unwrap(), b"%!PS");
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_file_already_gone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone~");
        let temp = TempFile::create(&path, b"x").unwrap();
        fs::remove_file(&path).unwrap();
        drop(temp);
        assert!(!path.exists());
    }

    #[test]
    fn test_adopted_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.pdf");
        let guard = TempFile::adopt(&path).unwrap();
        fs::write(&path, b"%PDF-1.7").unwrap();
        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn test_adopted_missing_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-written.pdf");
        drop(TempFile::adopt(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_kept_file_survives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.pdf");
        let guard = TempFile::adopt(&path).unwrap();
        fs::write(&path, b"%PDF-1.7").unwrap();
        assert_eq!(guard.keep(), path);
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_temp_file_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("a~");
        let err = TempFile::create(&path, b"x").unwrap_err();
        assert!(matches!(err, Error::TempFileWrite { .. }));
    }
}
