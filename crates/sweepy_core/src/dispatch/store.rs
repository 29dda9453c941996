//! Filesystem side of persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::SweepArchive;
use crate::error::Result;

/// The storage operations the dispatcher needs
pub trait Store {
    fn exists(&self, location: &Path) -> bool;

    /// Create `location`, including missing parents
    fn create(&self, location: &Path) -> Result<()>;

    /// Ensure the sub-area `name` exists under `location` and return its path
    fn create_area(&self, location: &Path, name: &str) -> Result<PathBuf>;

    fn write_text(&self, location: &Path, name: &str, content: &str) -> Result<PathBuf>;

    fn write_blob(&self, location: &Path, name: &str, archive: &SweepArchive) -> Result<PathBuf>;
}

/// [`Store`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl Store for FsStore {
    fn exists(&self, location: &Path) -> bool {
        location.is_dir()
    }

    fn create(&self, location: &Path) -> Result<()> {
        fs::create_dir_all(location)?;
        debug!(location = %location.display(), "created output directory");
        Ok(())
    }

    fn create_area(&self, location: &Path, name: &str) -> Result<PathBuf> {
        let path = location.join(sanitize_filename(name));
        if !path.is_dir() {
            fs::create_dir(&path)?;
        }
        Ok(path)
    }

    fn write_text(&self, location: &Path, name: &str, content: &str) -> Result<PathBuf> {
        let path = location.join(sanitize_filename(name));
        atomic_write(&path, content.as_bytes())?;
        debug!(path = %path.display(), "wrote text file");
        Ok(path)
    }

    fn write_blob(&self, location: &Path, name: &str, archive: &SweepArchive) -> Result<PathBuf> {
        let path = location.join(sanitize_filename(name));
        let bytes = serde_json::to_vec(archive)?;
        atomic_write(&path, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote data archive");
        Ok(path)
    }
}

/// Write to a temporary sibling, then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    fs::write(&temp, content)?;
    fs::rename(&temp, path)?;
    Ok(())
}

/// Replace characters that are unsafe in file names
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.txt");

        atomic_write(&path, b"hello\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!dir.path().join("README.txt.tmp").exists());
    }

    #[test]
    fn test_create_and_areas() {
        let dir = tempdir().unwrap();
        let location = dir.path().join("nested").join("out");
        let store = FsStore;

        assert!(!store.exists(&location));
        store.create(&location).unwrap();
        assert!(store.exists(&location));

        let area = store.create_area(&location, "A/B").unwrap();
        assert_eq!(area, location.join("A_B"));
        assert!(area.is_dir());
        // Idempotent
        store.create_area(&location, "A/B").unwrap();
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("z_8.5"), "z_8.5");
        assert_eq!(sanitize_filename("../etc"), ".._etc");
        assert_eq!(sanitize_filename("a:b*c"), "a_b_c");
    }
}
