//! Zip archive creation on the remote store.
//!
//! [`ArchiveBuilder`] packs a set of items into a zip file written straight
//! to the store. Directories are walked depth-first with an explicit stack:
//! a directory's header is written before any of its children, and children
//! follow the store's listing order.
//!
//! The first failure aborts the whole call. Whatever was already written
//! stays on the store; there is no rollback.
//!
//! Each entry name is written once per archive. Overlapping items (a folder
//! and a file inside it) only contribute the entries not yet written, and
//! the archive file itself is never packed into its own contents.

use std::collections::HashSet;
use std::io;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Timelike, Utc};
use protocol::Item;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::FinderResult;
use super::guard::{Action, SafetyPolicy};
use super::resolver::join;
use crate::store::RemoteStore;

/// Suffix every archive name ends with.
pub const ZIP_EXTENSION: &str = ".zip";

/// Append `.zip` to `name` unless it already ends with it.
pub fn ensure_zip_extension(name: &str) -> String {
    if name.ends_with(ZIP_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{ZIP_EXTENSION}")
    }
}

/// Where the archive for `name` is created: relative names land inside
/// `base`, absolute names are used as given.
pub fn archive_path(name: &str, base: &str) -> String {
    let name = ensure_zip_extension(name);
    if name.starts_with('/') {
        name
    } else {
        join(base, &name)
    }
}

/// Name of the zip entry for `path`: the literal prefix `base` removed.
///
/// This is a textual strip. A `base` that is not a prefix of `path` leaves
/// the path unchanged.
pub fn entry_name<'p>(path: &'p str, base: &str) -> &'p str {
    path.strip_prefix(base).unwrap_or(path)
}

/// Writes zip archives of store items back onto the store.
pub struct ArchiveBuilder<'a, S> {
    store: &'a S,
    policy: &'a dyn SafetyPolicy,
}

impl<'a, S: RemoteStore> ArchiveBuilder<'a, S> {
    pub fn new(store: &'a S, policy: &'a dyn SafetyPolicy) -> Self {
        Self { store, policy }
    }

    /// Pack `items` into the archive `name`, naming entries relative to
    /// `base`. Returns the store path of the archive.
    ///
    /// Items the safety policy blocks are skipped without error.
    pub fn archive(&self, items: &[Item], name: &str, base: &str) -> FinderResult<String> {
        let target = archive_path(name, base);
        info!(target = %target, base = %base, items = items.len(), "Creating archive");

        let mut zip = ZipWriter::new(self.store.create(&target)?);
        let mut written = HashSet::new();

        for item in items {
            if self.policy.blocked(Action::Archive, base, &item.path) {
                continue;
            }
            self.write_tree(&mut zip, &mut written, &item.path, base, &target)?;
        }

        zip.finish()?;
        Ok(target)
    }

    /// Write `root` and, if it is a directory, everything below it.
    /// Entries already in `written` and the archive `target` are skipped.
    fn write_tree(
        &self,
        zip: &mut ZipWriter<S::Writer>,
        written: &mut HashSet<String>,
        root: &str,
        base: &str,
        target: &str,
    ) -> FinderResult<()> {
        let mut pending = vec![root.to_string()];

        while let Some(path) = pending.pop() {
            if path == target {
                debug!(path = %path, "Skipping the archive being written");
                continue;
            }

            let name = entry_name(&path, base);
            if !written.insert(name.to_string()) {
                debug!(path = %path, entry = %name, "Skipping entry already in archive");
                continue;
            }

            let info = self.store.stat(&path)?;
            let options = SimpleFileOptions::default().last_modified_time(zip_time(info.modified));

            if info.is_dir() {
                debug!(path = %path, entry = %name, "Adding directory to archive");
                zip.add_directory(
                    format!("{name}/"),
                    options.compression_method(CompressionMethod::Stored),
                )?;

                // Reversed so the first listed child is popped first.
                let children = self.store.read_dir(&path)?;
                pending.extend(children.iter().rev().map(|child| join(&path, &child.name)));
            } else {
                debug!(path = %path, entry = %name, size = info.size, "Adding file to archive");
                zip.start_file(
                    name,
                    options
                        .compression_method(CompressionMethod::Deflated)
                        .large_file(info.size >= u64::from(u32::MAX)),
                )?;

                let mut reader = self.store.open(&path)?;
                io::copy(&mut reader, zip)?;
            }
        }

        Ok(())
    }
}

/// Zip timestamp for a store modification time. Zip cannot express dates
/// before 1980; those fall back to the format's epoch.
fn zip_time(modified: SystemTime) -> zip::DateTime {
    let time = DateTime::<Utc>::from(modified);
    let (Ok(year), Ok(month), Ok(day), Ok(hour), Ok(minute), Ok(second)) = (
        u16::try_from(time.year()),
        u8::try_from(time.month()),
        u8::try_from(time.day()),
        u8::try_from(time.hour()),
        u8::try_from(time.minute()),
        u8::try_from(time.second()),
    ) else {
        return zip::DateTime::default();
    };

    zip::DateTime::from_date_and_time(year, month, day, hour, minute, second).unwrap_or_default()
}
