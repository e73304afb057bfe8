//! # Finder Protocol Library
//!
//! Data model shared by the Finder backend and the UI layer that calls it.
//!
//! ## Overview
//!
//! - **Listing records**: [`FileEntry`] and [`StorageCollection`], serialized
//!   with the snake_case field names the file-manager UI reads
//! - **Batch targets**: [`Item`] for remove/move/archive calls
//! - **Requests**: [`Location`] (the view to refresh) and [`ArchiveRequest`]
//!
//! ## Example Usage
//!
//! ```rust
//! use protocol::{FileEntry, StorageCollection};
//!
//! let collection = StorageCollection {
//!     adapter: "home".to_string(),
//!     storages: vec!["home".to_string()],
//!     dirname: "/home/alice".to_string(),
//!     files: vec![FileEntry::navigation(".", "/home/alice", "home")],
//! };
//!
//! let json = collection.to_json().unwrap();
//! assert!(json.contains("\"adapter\":\"home\""));
//! ```
//!
//! ## Modules
//!
//! - [`messages`]: Finder records
//! - [`error`]: Error types

pub mod error;
pub mod messages;

pub use error::{ProtocolError, Result};
pub use messages::{
    ArchiveRequest, FileEntry, FileType, Item, Location, Preview, StorageCollection,
    PUBLIC_VISIBILITY,
};
