use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reelcheck::backend::BackendKind;

/// Check search results against the configured media servers
#[derive(Parser)]
#[command(name = "reelcheck")]
#[command(about = "Marks titles already present on Emby or Jellyfin and prints web-client links", long_about = None)]
pub struct Cli {
    /// Config file (defaults to reelcheck.toml in the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database URL (overrides config and REELCHECK_DATABASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate provider ids against every configured backend
    Check {
        /// Provider (movie database) ids
        #[arg(required = true)]
        provider_ids: Vec<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage server connections
    Server {
        #[command(subcommand)]
        action: ServerAction,
    },
    /// Enable a backend
    Enable { backend: BackendKind },
    /// Disable a backend
    Disable { backend: BackendKind },
    /// Manage known server content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
}

#[derive(Subcommand)]
pub enum ServerAction {
    /// Append a server to a backend's list
    Add {
        backend: BackendKind,
        /// Server id reported by the media server
        #[arg(long)]
        server_id: String,
        /// Public hostname; empty falls back to the backend's default web client
        #[arg(long, default_value = "")]
        hostname: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a backend's settings
    List { backend: BackendKind },
}

#[derive(Subcommand)]
pub enum ContentAction {
    /// Record a title as present on a backend
    Add {
        backend: BackendKind,
        provider_id: String,
        /// Item id inside the media server
        #[arg(long)]
        item_id: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Forget a title
    Remove { backend: BackendKind, provider_id: String },
    /// List titles known for a backend
    List { backend: BackendKind },
}
