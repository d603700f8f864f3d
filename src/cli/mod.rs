use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coursefind")]
#[command(author, version, about = "Course catalog search server and interactive client")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration to .coursefind/config.toml
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Start the search API server
    Serve {
        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default from config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Course catalog JSON file (default from config)
        #[arg(short, long)]
        corpus: Option<PathBuf>,
    },

    /// Rank the catalog for one query and print the results
    Search {
        /// Search query
        query: String,

        /// Course catalog JSON file (default from config)
        #[arg(short, long)]
        corpus: Option<PathBuf>,

        /// Maximum number of results to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Type queries line by line against a running server
    Interactive {
        /// Server base URL (default from config)
        #[arg(short, long)]
        server: Option<String>,

        /// Quiet period before a query is sent, in milliseconds
        #[arg(short, long)]
        debounce_ms: Option<u64>,
    },
}
