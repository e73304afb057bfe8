//! # Finder Backend Library
//!
//! This crate provides the server side of a web file manager: it answers the
//! requests of a vuefinder-style UI by browsing and mutating a remote file
//! store on behalf of one user.
//!
//! ## Overview
//!
//! - **Storage enumeration**: top-level directories of the store become the
//!   storages the UI offers
//! - **Directory listing**: entries with type, size, MIME type and
//!   navigation (`.` / `..`) records, symlinks resolved one hop
//! - **Mutations**: create, rename, move and remove, guarded against
//!   targets that look like parent directories
//! - **Archiving**: zip archives written directly onto the store
//! - **Transfers**: upload, download, preview and save of file contents
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  StoreFinder (Finder)                    │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌────────────┐  ┌────────────────────┐  │
//! │  │  Resolver  │  │   Guard    │  │  ArchiveBuilder    │  │
//! │  └────────────┘  └────────────┘  └────────────────────┘  │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                DirectoryBrowser                    │  │
//! │  └────────────────────────────────────────────────────┘  │
//! ├──────────────────────────────────────────────────────────┤
//! │               RemoteStore (LocalStore, ...)              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use backend::{Finder, LocalStore, StoreFinder};
//!
//! fn main() -> anyhow::Result<()> {
//!     let finder = StoreFinder::new(LocalStore::new("/srv/files"), "alice");
//!
//!     // "null" is what the UI sends before a storage is chosen.
//!     let collection = finder.index("null", "")?;
//!     println!("{}", collection.to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and defaults
//! - [`files`]: Finder operations, listing, guard and archiving
//! - [`store`]: Remote store contract and the local-disk store

pub mod config;
pub mod files;
pub mod store;

// Re-export protocol for convenience
pub use protocol;

// Re-export config types for convenience
pub use config::{Config, ConfigError};

// Re-export files types for convenience
pub use files::{
    Action, ArchiveBuilder, DirectoryBrowser, Finder, FinderError, FinderResult, LengthHeuristic,
    SafetyPolicy, StoreFinder, HOME_ADAPTER, UNSCOPED_ADAPTER,
};

// Re-export store types for convenience
pub use store::{EntryKind, LocalStore, RemoteStore, StoreMetadata};
