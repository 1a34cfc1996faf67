//! CLI module for the symbol package gateway
//!
//! - `serve`: run the HTTP download server
//! - `locate`: print where a symbol package is stored

pub mod locate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Symbol Package Gateway - serves NuGet symbol packages from file storage
#[derive(Parser)]
#[command(name = "symbol-package-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the download server
    Serve,

    /// Print the storage location of a symbol package
    Locate(locate::LocateArgs),
}
