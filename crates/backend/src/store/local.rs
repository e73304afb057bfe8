//! Local-disk transport.
//!
//! [`LocalStore`] serves store paths out of a directory on the local
//! filesystem: `/home/alice` maps to `<root>/home/alice`. It is the transport
//! used by the inspection binary and by the test suite.
//!
//! This mapping is not a sandbox. `..` components are passed through to the
//! host filesystem unchanged.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::trace;

use super::{EntryKind, RemoteStore, StoreMetadata};

/// Remote store backed by a local directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory that backs the store root `/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path for a store path.
    fn host_path(&self, path: &str) -> PathBuf {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    fn to_metadata(name: String, metadata: &fs::Metadata) -> StoreMetadata {
        let file_type = metadata.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        StoreMetadata {
            name,
            kind,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }
}

impl RemoteStore for LocalStore {
    type Reader = File;
    type Writer = File;

    fn stat(&self, path: &str) -> io::Result<StoreMetadata> {
        let host = self.host_path(path);
        let metadata = fs::metadata(&host)?;
        let name = host
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "/".to_string());
        Ok(Self::to_metadata(name, &metadata))
    }

    /// Entries are returned sorted by name so listings are stable across
    /// host filesystems.
    fn read_dir(&self, path: &str) -> io::Result<Vec<StoreMetadata>> {
        let host = self.host_path(path);
        trace!(path = %path, host = ?host, "Reading local directory");

        let mut entries = Vec::new();
        for entry in fs::read_dir(&host)? {
            let entry = entry?;
            let metadata = fs::symlink_metadata(entry.path())?;
            let name = entry.file_name().to_string_lossy().to_string();
            entries.push(Self::to_metadata(name, &metadata));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn open(&self, path: &str) -> io::Result<File> {
        File::open(self.host_path(path))
    }

    fn create(&self, path: &str) -> io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.host_path(path))
    }

    fn mkdir_all(&self, path: &str) -> io::Result<()> {
        fs::create_dir_all(self.host_path(path))
    }

    fn remove(&self, path: &str) -> io::Result<()> {
        let host = self.host_path(path);
        if fs::symlink_metadata(&host)?.is_dir() {
            fs::remove_dir(host)
        } else {
            fs::remove_file(host)
        }
    }

    fn remove_all(&self, path: &str) -> io::Result<()> {
        let host = self.host_path(path);
        if fs::symlink_metadata(&host)?.is_dir() {
            fs::remove_dir_all(host)
        } else {
            fs::remove_file(host)
        }
    }

    fn rename(&self, from: &str, to: &str) -> io::Result<()> {
        fs::rename(self.host_path(from), self.host_path(to))
    }

    /// Absolute targets that point inside the root are mapped back into
    /// store paths; anything else is returned as stored in the link.
    fn read_link(&self, path: &str) -> io::Result<String> {
        let target = fs::read_link(self.host_path(path))?;
        if target.is_absolute() {
            if let Ok(inside) = target.strip_prefix(&self.root) {
                return Ok(format!("/{}", inside.to_string_lossy()));
            }
        }
        Ok(target.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    fn create_test_store() -> (LocalStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("data/docs")).unwrap();
        fs::write(temp_dir.path().join("data/b.txt"), "bee").unwrap();
        fs::write(temp_dir.path().join("data/a.txt"), "ay").unwrap();
        (LocalStore::new(temp_dir.path()), temp_dir)
    }

    #[test]
    fn test_read_dir_sorted() {
        let (store, _temp_dir) = create_test_store();

        let entries = store.read_dir("/data").unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "docs"]);
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].size, 2);
        assert!(entries[2].is_dir());
    }

    #[test]
    fn test_read_dir_reports_symlinks() {
        let (store, temp_dir) = create_test_store();
        symlink("docs", temp_dir.path().join("data/link")).unwrap();

        let entries = store.read_dir("/data").unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_symlink());

        // stat follows the link
        assert!(store.stat("/data/link").unwrap().is_dir());
    }

    #[test]
    fn test_stat_root() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.stat("/").unwrap().is_dir());
        assert!(store.stat("").unwrap().is_dir());
    }

    #[test]
    fn test_stat_missing() {
        let (store, _temp_dir) = create_test_store();
        let err = store.stat("/data/missing").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_create_truncates() {
        let (store, _temp_dir) = create_test_store();

        let mut writer = store.create("/data/b.txt").unwrap();
        writer.write_all(b"x").unwrap();
        drop(writer);

        let mut content = String::new();
        store
            .open("/data/b.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "x");
    }

    #[test]
    fn test_remove_and_remove_all() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join("data/docs/inner.txt"), "in").unwrap();

        store.remove("/data/a.txt").unwrap();
        assert!(!temp_dir.path().join("data/a.txt").exists());

        // Non-empty directory needs remove_all
        assert!(store.remove("/data/docs").is_err());
        store.remove_all("/data/docs").unwrap();
        assert!(!temp_dir.path().join("data/docs").exists());
    }

    #[test]
    fn test_mkdir_all_and_rename() {
        let (store, temp_dir) = create_test_store();

        store.mkdir_all("/data/x/y/z").unwrap();
        assert!(temp_dir.path().join("data/x/y/z").is_dir());

        store.rename("/data/a.txt", "/data/x/a.txt").unwrap();
        assert!(temp_dir.path().join("data/x/a.txt").exists());
    }

    #[test]
    fn test_read_link_relative_and_absolute() {
        let (store, temp_dir) = create_test_store();
        symlink("docs", temp_dir.path().join("data/rel")).unwrap();
        symlink(temp_dir.path().join("data/docs"), temp_dir.path().join("data/abs")).unwrap();
        symlink("/nowhere/at/all", temp_dir.path().join("data/outside")).unwrap();

        assert_eq!(store.read_link("/data/rel").unwrap(), "docs");
        assert_eq!(store.read_link("/data/abs").unwrap(), "/data/docs");
        assert_eq!(store.read_link("/data/outside").unwrap(), "/nowhere/at/all");
    }
}
