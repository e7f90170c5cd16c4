use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single entry directly under a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub path: PathBuf,
    pub is_file: bool,
}

/// Filesystem seam used by the context engine.
pub trait FileSystemOps {
    fn exists(&self, path: &Path) -> bool;
    fn create_directories(&self, path: &Path) -> io::Result<()>;
    /// `Ok(vec![])` is an empty directory; `Err` means it could not be read.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<FsEntry>>;
    fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;
    fn read_text(&self, path: &Path) -> io::Result<String>;
    /// Returns false when the file is absent or could not be removed.
    fn delete(&self, path: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystemOps for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_directories(&self, path: &Path) -> io::Result<()> {
        debug!("Creating directory: {}", path.display());
        fs::create_dir_all(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        debug!("Listing entries in: {}", dir.display());
        let mut entries = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(io::Error::from)?;
            entries.push(FsEntry {
                path: entry.path().to_path_buf(),
                is_file: entry.file_type().is_file(),
            });
        }

        debug!("Found {} entries in {}", entries.len(), dir.display());
        Ok(entries)
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        debug!("Writing {} bytes to {}", content.len(), path.display());
        fs::write(path, content)?;
        info!("Wrote file: {}", path.display());
        Ok(())
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        debug!("Reading file contents: {}", path.display());
        let contents = fs::read_to_string(path)?;
        debug!("Read {} bytes from file", contents.len());
        Ok(contents)
    }

    fn delete(&self, path: &Path) -> bool {
        match fs::remove_file(path) {
            Ok(()) => {
                info!("Deleted file: {}", path.display());
                true
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};

    /// In-memory filesystem for engine tests.
    #[derive(Debug, Default)]
    pub struct InMemoryFileSystem {
        files: RefCell<BTreeMap<PathBuf, String>>,
        dirs: RefCell<BTreeSet<PathBuf>>,
        pub unreadable_dirs: RefCell<BTreeSet<PathBuf>>,
        pub unreadable_files: RefCell<BTreeSet<PathBuf>>,
        pub read_only_dirs: RefCell<BTreeSet<PathBuf>>,
        pub undeletable: RefCell<BTreeSet<PathBuf>>,
    }

    impl InMemoryFileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_dir(&self, path: impl Into<PathBuf>) {
            self.dirs.borrow_mut().insert(path.into());
        }

        pub fn add_file(&self, path: impl Into<PathBuf>, content: &str) {
            let path = path.into();
            if let Some(parent) = path.parent() {
                self.add_dir(parent);
            }
            self.files.borrow_mut().insert(path, content.to_string());
        }

        pub fn content(&self, path: &Path) -> Option<String> {
            self.files.borrow().get(path).cloned()
        }

        pub fn file_count(&self) -> usize {
            self.files.borrow().len()
        }
    }

    impl FileSystemOps for InMemoryFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
        }

        fn create_directories(&self, path: &Path) -> io::Result<()> {
            if self.read_only_dirs.borrow().iter().any(|d| path.starts_with(d)) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "read-only filesystem",
                ));
            }
            for ancestor in path.ancestors() {
                if !ancestor.as_os_str().is_empty() {
                    self.add_dir(ancestor);
                }
            }
            Ok(())
        }

        fn list_files(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
            if self.unreadable_dirs.borrow().contains(dir) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            if !self.dirs.borrow().contains(dir) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
            }

            let mut entries: Vec<FsEntry> = self
                .files
                .borrow()
                .keys()
                .filter(|path| path.parent() == Some(dir))
                .map(|path| FsEntry {
                    path: path.clone(),
                    is_file: true,
                })
                .collect();
            entries.extend(
                self.dirs
                    .borrow()
                    .iter()
                    .filter(|path| path.parent() == Some(dir))
                    .map(|path| FsEntry {
                        path: path.clone(),
                        is_file: false,
                    }),
            );
            // Unordered, like a real directory read.
            entries.reverse();
            Ok(entries)
        }

        fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
            let parent_ok = path
                .parent()
                .map(|p| self.dirs.borrow().contains(p))
                .unwrap_or(false);
            let read_only = path
                .parent()
                .map(|p| self.read_only_dirs.borrow().iter().any(|d| p.starts_with(d)))
                .unwrap_or(false);
            if !parent_ok || read_only {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "cannot write here",
                ));
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn read_text(&self, path: &Path) -> io::Result<String> {
            if self.unreadable_files.borrow().contains(path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not found"))
        }

        fn delete(&self, path: &Path) -> bool {
            if self.undeletable.borrow().contains(path) {
                return false;
            }
            self.files.borrow_mut().remove(path).is_some()
        }
    }
}
