//! Finder core: listing, navigation, mutation and archiving of store files.
//!
//! This module provides:
//! - Adapter/path resolution for paths coming from the UI
//! - Storage enumeration and directory listing with symlink classification
//! - A safety guard for rename, remove and archive targets
//! - Zip archive creation directly on the store
//! - The [`Finder`] operations tying these together
//!
//! # Safety guard
//!
//! The default [`LengthHeuristic`] only compares path lengths. It is meant
//! to catch accidental parent-directory targets, not to enforce access
//! boundaries; swap it through [`StoreFinder::with_policy`] when real
//! containment checks are needed.

pub mod archive;
pub mod browser;
pub mod error;
pub mod finder;
pub mod guard;
pub mod resolver;

pub use archive::{ensure_zip_extension, ArchiveBuilder};
pub use browser::DirectoryBrowser;
pub use error::{FinderError, FinderResult};
pub use finder::{Finder, StoreFinder, HOME_ADAPTER, UNSCOPED_ADAPTER};
pub use guard::{Action, LengthHeuristic, SafetyPolicy};
pub use resolver::resolve_path;
