//! Finder Backend
//!
//! Runs single Finder operations against a local directory and prints the
//! JSON the web UI would receive.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use backend::protocol::{ArchiveRequest, Item, Location};
use backend::{Config, Finder, LocalStore, RemoteStore, StoreFinder};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

/// Finder Backend - file-manager operations over a store directory.
#[derive(Parser, Debug)]
#[command(name = "finder-backend")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory mapped to the store root (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Session user (overrides config)
    #[arg(long, global = true, value_name = "NAME")]
    pub user: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the UI currently is.
#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// Storage adapter ("null" before one is chosen)
    #[arg(long, default_value = "null")]
    pub adapter: String,

    /// Path as sent by the UI, e.g. "home://docs"
    #[arg(long, default_value = "")]
    pub path: String,
}

impl LocationArgs {
    fn location(&self) -> Location {
        Location::new(&self.adapter, &self.path)
    }
}

/// Available Finder operations.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List storages and the current directory
    Index {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// List entries whose name contains a filter
    Search {
        #[command(flatten)]
        location: LocationArgs,

        /// Substring to match against entry names
        filter: String,
    },

    /// List directories below a path
    Subfolders {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Create a directory in the current location
    NewFolder {
        #[command(flatten)]
        location: LocationArgs,

        /// Name of the new directory
        name: String,
    },

    /// Create an empty file in the current location
    NewFile {
        #[command(flatten)]
        location: LocationArgs,

        /// Name of the new file
        name: String,
    },

    /// Rename an item within its directory
    Rename {
        #[command(flatten)]
        location: LocationArgs,

        /// Store path of the item
        item: String,

        /// New final path segment
        name: String,
    },

    /// Remove items
    Remove {
        #[command(flatten)]
        location: LocationArgs,

        /// Store paths of the items
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Move items into a directory
    Move {
        #[command(flatten)]
        location: LocationArgs,

        /// Destination directory
        #[arg(long)]
        target: String,

        /// Store paths of the items
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Pack items into a zip archive
    Archive {
        #[command(flatten)]
        location: LocationArgs,

        /// Archive name; ".zip" is appended when missing
        #[arg(long)]
        name: String,

        /// Prefix stripped from entry names
        #[arg(long)]
        base: String,

        /// Store paths of the items
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Write a file's contents to stdout
    Cat {
        /// Store path of the file
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default()?
    };

    // Apply environment variable overrides, then command-line ones
    config.apply_env_overrides();
    if let Some(root) = cli.root {
        config.store.root = root;
    }
    if let Some(user) = cli.user {
        config.store.user = user;
    }

    config.validate()?;

    // Initialize tracing
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.log_level.to_lowercase()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        root = %config.store.root.display(),
        user = %config.store.user,
        "Opening store"
    );
    let finder = StoreFinder::new(LocalStore::new(&config.store.root), &config.store.user);

    match cli.command {
        Commands::Index { location } => {
            print_json(&finder.index(&location.adapter, &location.path)?)?;
        }
        Commands::Search { location, filter } => {
            print_json(&finder.search(&location.adapter, &location.path, &filter)?)?;
        }
        Commands::Subfolders { location } => {
            print_json(&finder.subfolders(&location.adapter, &location.path)?)?;
        }
        Commands::NewFolder { location, name } => {
            print_json(&finder.new_folder(&location.location(), &name)?)?;
        }
        Commands::NewFile { location, name } => {
            print_json(&finder.new_file(&location.location(), &name)?)?;
        }
        Commands::Rename {
            location,
            item,
            name,
        } => {
            print_json(&finder.rename(&location.location(), &item, &name)?)?;
        }
        Commands::Remove { location, items } => {
            let items = classify(&finder, &items)?;
            print_json(&finder.remove(&location.location(), &items)?)?;
        }
        Commands::Move {
            location,
            target,
            items,
        } => {
            let items = classify(&finder, &items)?;
            print_json(&finder.move_items(&location.location(), &target, &items)?)?;
        }
        Commands::Archive {
            location,
            name,
            base,
            items,
        } => {
            let request = ArchiveRequest {
                name,
                items: classify(&finder, &items)?,
                base,
            };
            print_json(&finder.archive(&location.location(), &request)?)?;
        }
        Commands::Cat { path } => {
            let content = finder.download(&path)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&content)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Build items the way the UI sends them, typed by what the store reports.
fn classify(finder: &StoreFinder<LocalStore>, paths: &[String]) -> anyhow::Result<Vec<Item>> {
    paths
        .iter()
        .map(|path| {
            let info = finder
                .store()
                .stat(path)
                .with_context(|| format!("Failed to stat {path}"))?;
            Ok(if info.is_dir() {
                Item::dir(path)
            } else {
                Item::file(path)
            })
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{json}");
    Ok(())
}
