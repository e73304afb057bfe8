//! The Finder: file-manager operations over a remote store.
//!
//! [`Finder`] is the capability set a web layer drives on behalf of one
//! user. [`StoreFinder`] implements it for any [`RemoteStore`]; a caller
//! keeps one `StoreFinder` per store session and passes it wherever a
//! request for that session is handled.
//!
//! Mutating operations finish by re-indexing the caller's current
//! [`Location`] so the UI can redraw from the returned collection.

use std::io::{self, Read, Write};

use protocol::{ArchiveRequest, FileEntry, FileType, Item, Location, Preview, StorageCollection};
use tracing::{debug, info};

use super::archive::ArchiveBuilder;
use super::browser::DirectoryBrowser;
use super::error::FinderResult;
use super::guard::{Action, LengthHeuristic, SafetyPolicy};
use super::resolver::{base_name, join, parent_dir, resolve_path};
use crate::store::RemoteStore;

/// Adapter value the UI sends before it knows which storage to show.
pub const UNSCOPED_ADAPTER: &str = "null";

/// Adapter used for the user's home directory.
pub const HOME_ADAPTER: &str = "home";

/// MIME type reported for previews of files with unknown extensions.
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// File-manager operations exposed to the UI layer.
pub trait Finder {
    /// Storages, the resolved directory and its listing.
    fn index(&self, adapter: &str, path: &str) -> FinderResult<StorageCollection>;

    /// [`index`](Finder::index) restricted to entries whose basename
    /// contains `filter`.
    fn search(&self, adapter: &str, path: &str, filter: &str) -> FinderResult<StorageCollection>;

    /// Directories directly below `path`, for folder pickers.
    fn subfolders(&self, adapter: &str, path: &str) -> FinderResult<Vec<FileEntry>>;

    /// Create directory `name` inside the current location.
    fn new_folder(&self, location: &Location, name: &str) -> FinderResult<StorageCollection>;

    /// Create an empty file `name` inside the current location.
    fn new_file(&self, location: &Location, name: &str) -> FinderResult<StorageCollection>;

    /// Give `item` the new final segment `name`.
    fn rename(
        &self,
        location: &Location,
        item: &str,
        name: &str,
    ) -> FinderResult<StorageCollection>;

    /// Remove `items`; blocked items are skipped.
    fn remove(&self, location: &Location, items: &[Item]) -> FinderResult<StorageCollection>;

    /// Move `items` into the directory `target`.
    fn move_items(
        &self,
        location: &Location,
        target: &str,
        items: &[Item],
    ) -> FinderResult<StorageCollection>;

    /// Pack the requested items into a zip archive on the store.
    fn archive(
        &self,
        location: &Location,
        request: &ArchiveRequest,
    ) -> FinderResult<StorageCollection>;

    /// Write the contents of `reader` to `name` below `dir`.
    fn upload(&self, dir: &str, name: &str, reader: &mut dyn Read) -> FinderResult<()>;

    /// Full contents of the file at `path`.
    fn download(&self, path: &str) -> FinderResult<Vec<u8>>;

    /// Contents of `path` with a MIME type for inline display.
    fn preview(&self, path: &str) -> FinderResult<Preview>;

    /// Replace the contents of `path` with `content`.
    fn save(&self, path: &str, content: &str) -> FinderResult<()>;
}

/// [`Finder`] backed by a [`RemoteStore`] session.
pub struct StoreFinder<S> {
    store: S,
    user: String,
    policy: Box<dyn SafetyPolicy>,
}

impl<S: RemoteStore> StoreFinder<S> {
    /// Create a Finder for `user` over `store`, guarded by the
    /// [`LengthHeuristic`] policy.
    pub fn new(store: S, user: impl Into<String>) -> Self {
        Self {
            store,
            user: user.into(),
            policy: Box::new(LengthHeuristic),
        }
    }

    /// Replace the safety policy.
    pub fn with_policy(mut self, policy: impl SafetyPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Home directory of the session user.
    pub fn home_dir(&self) -> String {
        format!("/home/{}", self.user)
    }

    fn browser(&self) -> DirectoryBrowser<'_, S> {
        DirectoryBrowser::new(&self.store)
    }

    /// Absolute directory a location points at.
    fn location_dir(&self, location: &Location) -> String {
        if location.adapter == UNSCOPED_ADAPTER {
            self.home_dir()
        } else {
            resolve_path(&location.adapter, &location.path)
        }
    }

    fn refresh(&self, location: &Location) -> FinderResult<StorageCollection> {
        self.index(&location.adapter, &location.path)
    }

    fn read_all(&self, path: &str) -> FinderResult<Vec<u8>> {
        let mut reader = self.store.open(path)?;
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl<S: RemoteStore> Finder for StoreFinder<S> {
    fn index(&self, adapter: &str, path: &str) -> FinderResult<StorageCollection> {
        let browser = self.browser();
        let storages = browser.list_storages()?;

        let location = Location::new(adapter, path);
        let dirname = self.location_dir(&location);
        let adapter = if adapter == UNSCOPED_ADAPTER {
            HOME_ADAPTER.to_string()
        } else {
            location.adapter
        };

        let files = browser.scan_files(&dirname, &adapter)?;

        Ok(StorageCollection {
            adapter,
            storages,
            dirname,
            files,
        })
    }

    fn search(&self, adapter: &str, path: &str, filter: &str) -> FinderResult<StorageCollection> {
        debug!(adapter = %adapter, path = %path, filter = %filter, "Searching directory");

        let mut collection = self.index(adapter, path)?;
        collection.files.retain(|f| f.basename.contains(filter));
        Ok(collection)
    }

    fn subfolders(&self, adapter: &str, path: &str) -> FinderResult<Vec<FileEntry>> {
        let dir = resolve_path(adapter, path);

        let mut entries = self.browser().scan(&dir, adapter)?;
        entries.retain(|e| e.file_type == Some(FileType::Dir));
        Ok(entries)
    }

    fn new_folder(&self, location: &Location, name: &str) -> FinderResult<StorageCollection> {
        let path = join(&self.location_dir(location), name);
        info!(path = %path, "Creating folder");

        self.store.mkdir_all(&path)?;
        self.refresh(location)
    }

    fn new_file(&self, location: &Location, name: &str) -> FinderResult<StorageCollection> {
        let path = join(&self.location_dir(location), name);
        info!(path = %path, "Creating file");

        self.store.create(&path)?;
        self.refresh(location)
    }

    /// A rename the safety policy blocks does nothing and still reports
    /// success.
    fn rename(
        &self,
        location: &Location,
        item: &str,
        name: &str,
    ) -> FinderResult<StorageCollection> {
        let new_path = join(parent_dir(item), name);

        if !self.policy.blocked(Action::Rename, item, &new_path) {
            info!(from = %item, to = %new_path, "Renaming");
            self.store.rename(item, &new_path)?;
        }

        self.refresh(location)
    }

    /// Blocked items are skipped; the first store error stops the batch.
    fn remove(&self, location: &Location, items: &[Item]) -> FinderResult<StorageCollection> {
        let dir = self.location_dir(location);

        for item in items {
            if self.policy.blocked(Action::Remove, &dir, &item.path) {
                continue;
            }

            info!(path = %item.path, kind = ?item.file_type, "Removing");
            match item.file_type {
                FileType::Dir => self.store.remove_all(&item.path)?,
                FileType::File => self.store.remove(&item.path)?,
            }
        }

        self.refresh(location)
    }

    fn move_items(
        &self,
        location: &Location,
        target: &str,
        items: &[Item],
    ) -> FinderResult<StorageCollection> {
        for item in items {
            let dest = join(target, base_name(&item.path));
            info!(from = %item.path, to = %dest, "Moving");
            self.store.rename(&item.path, &dest)?;
        }

        self.refresh(location)
    }

    fn archive(
        &self,
        location: &Location,
        request: &ArchiveRequest,
    ) -> FinderResult<StorageCollection> {
        ArchiveBuilder::new(&self.store, self.policy.as_ref()).archive(
            &request.items,
            &request.name,
            &request.base,
        )?;

        self.refresh(location)
    }

    /// A `name` containing `/` has its leading segments appended to `dir`.
    /// The target directory is created when the store reports it missing.
    fn upload(&self, dir: &str, name: &str, reader: &mut dyn Read) -> FinderResult<()> {
        let (dir, file_name) = match name.rsplit_once('/') {
            Some((sub_dir, file_name)) => (join(dir, sub_dir), file_name),
            None => (dir.to_string(), name),
        };
        let path = join(&dir, file_name);

        match self.store.stat(&dir) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => self.store.mkdir_all(&dir)?,
            _ => {}
        }

        info!(path = %path, "Uploading file");
        let mut writer = self.store.create(&path)?;
        io::copy(reader, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn download(&self, path: &str) -> FinderResult<Vec<u8>> {
        debug!(path = %path, "Downloading file");
        self.read_all(path)
    }

    fn preview(&self, path: &str) -> FinderResult<Preview> {
        let content = self.read_all(path)?;
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();

        Ok(Preview { mime_type, content })
    }

    fn save(&self, path: &str, content: &str) -> FinderResult<()> {
        info!(path = %path, bytes = content.len(), "Saving file");

        let mut writer = self.store.create(path)?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
