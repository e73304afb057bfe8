//! Remote file store contract.
//!
//! The Finder core never talks to a transport directly. Everything it needs
//! from the remote side is expressed by [`RemoteStore`]: a blocking,
//! path-addressed capability set modeled on an SFTP session. Paths are
//! absolute store paths (`/home/alice/report.txt`), independent of how the
//! transport maps them.
//!
//! Errors are plain [`std::io::Error`] values and are handed back to callers
//! without translation.

pub mod local;

use std::io::{self, Read, Seek, Write};
use std::time::SystemTime;

pub use local::LocalStore;

/// Kind of a store entry, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Other (device, socket, fifo, etc.).
    Other,
}

/// Metadata of a single store entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMetadata {
    /// Entry name (final path segment).
    pub name: String,
    /// Entry kind.
    pub kind: EntryKind,
    /// Size in bytes as reported by the store.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
}

impl StoreMetadata {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// Capabilities the Finder core consumes from a remote file store.
///
/// All calls may block on network I/O. Implementations decide how (and
/// whether) a single handle may be shared between threads.
pub trait RemoteStore {
    /// Readable byte stream returned by [`RemoteStore::open`].
    type Reader: Read;
    /// Writable byte stream returned by [`RemoteStore::create`].
    type Writer: Write + Seek;

    /// Metadata of `path`, following symlinks.
    fn stat(&self, path: &str) -> io::Result<StoreMetadata>;

    /// Entries of the directory at `path`, symlinks reported as
    /// [`EntryKind::Symlink`]. Order is whatever the store returns.
    fn read_dir(&self, path: &str) -> io::Result<Vec<StoreMetadata>>;

    /// Open an existing file for reading.
    fn open(&self, path: &str) -> io::Result<Self::Reader>;

    /// Create a file for writing, truncating it if it exists.
    fn create(&self, path: &str) -> io::Result<Self::Writer>;

    /// Create a directory and any missing parents.
    fn mkdir_all(&self, path: &str) -> io::Result<()>;

    /// Remove a file or an empty directory.
    fn remove(&self, path: &str) -> io::Result<()>;

    /// Remove a path and everything beneath it.
    fn remove_all(&self, path: &str) -> io::Result<()>;

    /// Rename `from` to `to`.
    fn rename(&self, from: &str, to: &str) -> io::Result<()>;

    /// Target of the symlink at `path`, as stored in the link.
    fn read_link(&self, path: &str) -> io::Result<String>;
}
