//! Read-only access to markdown content.
//!
//! The navigation builder only ever needs to read a page by its path relative
//! to the content root. [`ContentSource`] is that seam: [`FsSource`] is the
//! production implementation, tests substitute an in-memory map.

use std::io;
use std::path::{Path, PathBuf};

/// Source of markdown files addressed relative to the content root.
pub trait ContentSource: Sync {
    /// Read a file as UTF-8. Missing files report `io::ErrorKind::NotFound`.
    fn read(&self, relative: &str) -> io::Result<String>;
}

/// Content rooted in a directory on disk.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for FsSource {
    fn read(&self, relative: &str) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(relative))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory source that records every path it was asked for.
    /// Uses Mutex (not RefCell) so it is Sync like the production source.
    #[derive(Default)]
    pub struct MemorySource {
        pub files: HashMap<String, String>,
        pub reads: Mutex<Vec<String>>,
    }

    impl MemorySource {
        pub fn with_files(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(path, body)| (path.to_string(), body.to_string()))
                    .collect(),
                reads: Mutex::new(Vec::new()),
            }
        }

        pub fn get_reads(&self) -> Vec<String> {
            self.reads.lock().unwrap().clone()
        }
    }

    impl ContentSource for MemorySource {
        fn read(&self, relative: &str) -> io::Result<String> {
            self.reads.lock().unwrap().push(relative.to_string());
            self.files
                .get(relative)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, relative.to_string()))
        }
    }

    #[test]
    fn fs_source_reads_relative_to_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("guide")).unwrap();
        std::fs::write(tmp.path().join("guide/setup.md"), "# Setup").unwrap();

        let source = FsSource::new(tmp.path());
        assert_eq!(source.read("guide/setup.md").unwrap(), "# Setup");
        assert_eq!(source.root(), tmp.path());
    }

    #[test]
    fn fs_source_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = FsSource::new(tmp.path()).read("nope.md").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn memory_source_records_reads() {
        let source = MemorySource::with_files(&[("a.md", "# A")]);
        assert!(source.read("a.md").is_ok());
        assert!(source.read("b.md").is_err());
        assert_eq!(source.get_reads(), vec!["a.md", "b.md"]);
    }
}
