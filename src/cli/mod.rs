//! Command-line interface for geolookup.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::*;

/// geolookup - Moscow address lookup service
/// Geocodes free-text addresses and lists nearby metro stations
#[derive(Parser)]
#[command(name = "geolookup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    #[command(alias = "web")]
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Look up an address once and print the results
    #[command(alias = "l")]
    Lookup {
        /// Free-text address
        #[arg(required = true)]
        address: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List addresses that have been searched
    #[command(alias = "h")]
    History {
        #[arg(default_value = "50")]
        limit: u64,
    },

    /// Write a default config.toml
    #[command(alias = "--init")]
    Init,
}
