use clap::Parser;
use symbol_package_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Locate(args) => cli::locate::run(args).await,
    }
}
