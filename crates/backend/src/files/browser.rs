//! Directory browsing over a remote store.
//!
//! [`DirectoryBrowser`] turns raw store listings into the [`FileEntry`]
//! records the UI renders. It enumerates the storages at the store root and
//! lists single directories, classifying symlinks by looking one hop ahead
//! at their target.

use std::io;

use chrono::{DateTime, Utc};
use protocol::{FileEntry, FileType, PUBLIC_VISIBILITY};
use tracing::{debug, warn};

use super::resolver::{extension, join, needs_navigation_entries, parent_dir};
use crate::store::{RemoteStore, StoreMetadata};

/// Root of the store; storages are its direct children.
const STORE_ROOT: &str = "/";

/// Directory browser bound to one store handle.
pub struct DirectoryBrowser<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> DirectoryBrowser<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Names of the storages under the store root.
    ///
    /// Only directories and symlinks count; the root never holds plain
    /// files meant for the UI.
    pub fn list_storages(&self) -> io::Result<Vec<String>> {
        let entries = self.store.read_dir(STORE_ROOT)?;

        Ok(entries
            .into_iter()
            .filter(|e| e.is_dir() || e.is_symlink())
            .map(|e| e.name)
            .collect())
    }

    /// List the entries of `path` as seen under `adapter`.
    ///
    /// Entries keep the store's order. A symlink whose target cannot be
    /// resolved is still listed, with its type left unset.
    pub fn scan(&self, path: &str, adapter: &str) -> io::Result<Vec<FileEntry>> {
        debug!(path = %path, adapter = %adapter, "Listing directory");

        let entries = self.store.read_dir(path)?;
        Ok(entries
            .into_iter()
            .map(|entry| self.to_entry(entry, path, adapter))
            .collect())
    }

    /// [`scan`](Self::scan) preceded by `.` and `..` unless `path` is a
    /// storage root.
    pub fn scan_files(&self, path: &str, adapter: &str) -> io::Result<Vec<FileEntry>> {
        let mut files = Vec::new();

        if needs_navigation_entries(path) {
            files.push(FileEntry::navigation(".", path, adapter));
            files.push(FileEntry::navigation("..", parent_dir(path), adapter));
        }

        files.extend(self.scan(path, adapter)?);
        Ok(files)
    }

    fn to_entry(&self, entry: StoreMetadata, dir: &str, adapter: &str) -> FileEntry {
        let file_type = if entry.is_dir() {
            Some(FileType::Dir)
        } else if entry.is_symlink() {
            match self.link_type(dir, &entry.name) {
                Ok(file_type) => Some(file_type),
                Err(err) => {
                    warn!(
                        dir = %dir,
                        name = %entry.name,
                        error = %err,
                        "Failed to resolve symlink target"
                    );
                    None
                }
            }
        } else {
            Some(FileType::File)
        };

        let ext = extension(&entry.name).to_string();
        let mime_type = mime_guess::from_ext(&ext)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        FileEntry {
            file_type,
            path: format!("{}/{}", dir, entry.name),
            visibility: PUBLIC_VISIBILITY.to_string(),
            last_modified: DateTime::<Utc>::from(entry.modified),
            mime_type,
            extra_metadata: Vec::new(),
            basename: entry.name,
            extension: ext,
            storage: adapter.to_string(),
            file_size: entry.size,
        }
    }

    /// Classify the target of the link `dir/name` without following any
    /// further links of its own.
    fn link_type(&self, dir: &str, name: &str) -> io::Result<FileType> {
        let target = self.store.read_link(&join(dir, name))?;
        let target = if target.starts_with('/') {
            target
        } else {
            join(dir, &target)
        };

        let info = self.store.stat(&target)?;
        Ok(if info.is_dir() {
            FileType::Dir
        } else {
            FileType::File
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;
    use std::fs;
    use std::os::unix::fs::symlink;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_test_structure(root: &Path) {
        fs::create_dir_all(root.join("home/alice/projects")).unwrap();
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(root.join("home/alice/notes.txt"), "# notes").unwrap();
        fs::write(root.join("home/alice/Makefile"), "all:").unwrap();
        fs::write(root.join("stray.txt"), "root file").unwrap();
        symlink("home", root.join("users")).unwrap();
    }

    fn setup() -> (LocalStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        create_test_structure(temp_dir.path());
        (LocalStore::new(temp_dir.path()), temp_dir)
    }

    #[test]
    fn test_list_storages_skips_files() {
        let (store, _temp_dir) = setup();
        let browser = DirectoryBrowser::new(&store);

        let storages = browser.list_storages().unwrap();
        assert_eq!(storages, vec!["data", "home", "users"]);
    }

    #[test]
    fn test_list_storages_error_propagates() {
        let store = LocalStore::new("/nonexistent/finder/root");
        let browser = DirectoryBrowser::new(&store);

        let err = browser.list_storages().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_scan_entries() {
        let (store, _temp_dir) = setup();
        let browser = DirectoryBrowser::new(&store);

        let entries = browser.scan("/home/alice", "home").unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.basename.as_str()).collect();
        assert_eq!(names, vec!["Makefile", "notes.txt", "projects"]);

        let notes = &entries[1];
        assert_eq!(notes.file_type, Some(FileType::File));
        assert_eq!(notes.path, "/home/alice/notes.txt");
        assert_eq!(notes.extension, "txt");
        assert_eq!(notes.mime_type, "text/plain");
        assert_eq!(notes.file_size, 7);
        assert_eq!(notes.storage, "home");
        assert_eq!(notes.visibility, "public");

        let makefile = &entries[0];
        assert_eq!(makefile.extension, "");
        assert_eq!(makefile.mime_type, "");

        assert_eq!(entries[2].file_type, Some(FileType::Dir));
    }

    #[test]
    fn test_scan_unknown_extension_has_empty_mime() {
        let (store, temp_dir) = setup();
        fs::write(temp_dir.path().join("data/blob.zzqq"), "?").unwrap();
        let browser = DirectoryBrowser::new(&store);

        let entries = browser.scan("/data", "data").unwrap();
        assert_eq!(entries[0].extension, "zzqq");
        assert_eq!(entries[0].mime_type, "");
    }

    #[test]
    fn test_scan_missing_directory() {
        let (store, _temp_dir) = setup();
        let browser = DirectoryBrowser::new(&store);

        assert!(browser.scan("/home/bob", "home").is_err());
    }

    #[test]
    fn test_scan_files_adds_navigation_entries() {
        let (store, _temp_dir) = setup();
        let browser = DirectoryBrowser::new(&store);

        let files = browser.scan_files("/home/alice", "home").unwrap();
        assert_eq!(files[0].basename, ".");
        assert_eq!(files[0].path, "/home/alice");
        assert_eq!(files[1].basename, "..");
        assert_eq!(files[1].path, "/home");
        assert!(files[0].is_dir() && files[1].is_dir());
        assert_eq!(files.len(), 5);
    }

    #[test]
    fn test_scan_files_storage_root_has_no_navigation() {
        let (store, _temp_dir) = setup();
        let browser = DirectoryBrowser::new(&store);

        let files = browser.scan_files("/home", "home").unwrap();
        assert!(files.iter().all(|f| f.basename != "." && f.basename != ".."));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "/home/alice");
    }

    #[test]
    fn test_symlink_to_directory() {
        let (store, temp_dir) = setup();
        symlink("projects", temp_dir.path().join("home/alice/proj")).unwrap();
        let browser = DirectoryBrowser::new(&store);

        let entries = browser.scan("/home/alice", "home").unwrap();
        let link = entries.iter().find(|e| e.basename == "proj").unwrap();
        assert_eq!(link.file_type, Some(FileType::Dir));
    }

    #[test]
    fn test_symlink_to_file() {
        let (store, temp_dir) = setup();
        symlink(
            temp_dir.path().join("home/alice/notes.txt"),
            temp_dir.path().join("home/alice/notes-link.txt"),
        )
        .unwrap();
        let browser = DirectoryBrowser::new(&store);

        let entries = browser.scan("/home/alice", "home").unwrap();
        let link = entries.iter().find(|e| e.basename == "notes-link.txt").unwrap();
        assert_eq!(link.file_type, Some(FileType::File));
    }

    #[test]
    fn test_broken_symlink_leaves_type_unset() {
        let (store, temp_dir) = setup();
        symlink("gone", temp_dir.path().join("home/alice/dangling")).unwrap();
        let browser = DirectoryBrowser::new(&store);

        let entries = browser.scan("/home/alice", "home").unwrap();
        assert_eq!(entries.len(), 4);

        let link = entries.iter().find(|e| e.basename == "dangling").unwrap();
        assert_eq!(link.file_type, None);

        let others_typed = entries
            .iter()
            .filter(|e| e.basename != "dangling")
            .all(|e| e.file_type.is_some());
        assert!(others_typed);
    }
}
