//! File system operations (read, write, rename, remove).

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    /// Write the full contents and fsync before returning, so a crash
    /// immediately after a reported success cannot lose the data.
    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_impl(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        runtime.write(&file_path, b"hello").unwrap();
        assert!(runtime.exists(&file_path));

        let content = runtime.read_to_string(&file_path).unwrap();
        assert_eq!(content, "hello");

        let renamed_path = dir.path().join("renamed.txt");
        runtime.rename(&file_path, &renamed_path).unwrap();
        assert!(!runtime.exists(&file_path));
        assert!(runtime.exists(&renamed_path));

        runtime.remove_file(&renamed_path).unwrap();
        assert!(!runtime.exists(&renamed_path));
    }

    #[test]
    fn test_real_runtime_create_dir_all() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        runtime.create_dir_all(&nested).unwrap();
        assert!(runtime.exists(&nested));
    }

    #[test]
    fn test_real_runtime_read_missing_file() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();

        let result = runtime.read_to_string(&dir.path().join("absent.txt"));
        assert!(result.is_err());
    }
}
