//! Finder data model exchanged with the file-manager UI layer.
//!
//! Every record here is built fresh for a single request from live store
//! queries and serialized with the field names the UI expects
//! (`last_modified`, `mime_type`, `file_size`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Visibility reported for every entry. Permissions are not modeled.
pub const PUBLIC_VISIBILITY: &str = "public";

/// Kind of a listed entry as shown by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Directory, or a symlink whose target is a directory.
    Dir,
    /// Anything that is not a directory.
    File,
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Entry type. `None` when a symlink target could not be resolved.
    #[serde(rename = "type")]
    pub file_type: Option<FileType>,
    /// Absolute store path.
    pub path: String,
    /// Always [`PUBLIC_VISIBILITY`].
    pub visibility: String,
    /// Modification time as reported by the store.
    pub last_modified: DateTime<Utc>,
    /// MIME type guessed from the extension, empty if unknown.
    pub mime_type: String,
    /// Always empty.
    pub extra_metadata: Vec<String>,
    /// Final path segment.
    pub basename: String,
    /// Text after the last `.` of the basename, without the dot.
    pub extension: String,
    /// Adapter label the entry was listed under.
    pub storage: String,
    /// Size in bytes as reported by the store.
    pub file_size: u64,
}

impl FileEntry {
    /// Build one of the navigation entries (`.` or `..`) that point at
    /// `path` without touching the store.
    pub fn navigation(basename: &str, path: impl Into<String>, storage: &str) -> Self {
        Self {
            file_type: Some(FileType::Dir),
            path: path.into(),
            visibility: PUBLIC_VISIBILITY.to_string(),
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
            mime_type: String::new(),
            extra_metadata: Vec::new(),
            basename: basename.to_string(),
            extension: String::new(),
            storage: storage.to_string(),
            file_size: 0,
        }
    }

    /// Whether this entry is a directory (or a link to one).
    pub fn is_dir(&self) -> bool {
        self.file_type == Some(FileType::Dir)
    }
}

/// Response of an index or search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCollection {
    /// Adapter the listing was produced for.
    pub adapter: String,
    /// Root-level storages of the store.
    pub storages: Vec<String>,
    /// Absolute path of the directory that was listed.
    pub dirname: String,
    /// Entries of `dirname`, possibly preceded by `.` and `..`.
    pub files: Vec<FileEntry>,
}

impl StorageCollection {
    /// Serialize to the JSON shape the UI consumes.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a collection previously produced by [`StorageCollection::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Target of a batch operation (remove, move, archive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Absolute store path.
    pub path: String,
    /// Kind of the target.
    #[serde(rename = "type")]
    pub file_type: FileType,
}

impl Item {
    /// Create a directory item.
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_type: FileType::Dir,
        }
    }

    /// Create a file item.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_type: FileType::File,
        }
    }
}

/// The view a UI is currently showing: adapter plus raw directory path.
///
/// Mutating calls re-index this location after they finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub adapter: String,
    pub path: String,
}

impl Location {
    pub fn new(adapter: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
            path: path.into(),
        }
    }
}

/// Request to pack a set of items into a zip archive on the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRequest {
    /// Archive file name. A `.zip` suffix is added when missing.
    pub name: String,
    /// Items to pack.
    pub items: Vec<Item>,
    /// Literal prefix stripped from every absolute path to form entry names.
    pub base: String,
}

/// File content returned for inline display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// MIME type guessed from the file extension.
    pub mime_type: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}
