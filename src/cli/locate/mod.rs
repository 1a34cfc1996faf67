//! Locate command - prints where a symbol package lives in storage

use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::domain::package::normalize_version;
use crate::domain::{Package, SymbolPackage};

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Package id
    pub id: String,

    /// Package version; normalized before naming
    pub version: String,

    /// Also print the direct read URI (requires the file to exist)
    #[arg(long)]
    pub uri: bool,
}

pub async fn run(args: LocateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    let state = crate::create_app_state(&config)?;
    let service = &state.symbol_packages;

    let version = normalize_version(&args.version)?;
    let location = service.symbol_package_location(&args.id, &version)?;
    println!("{}", location);

    if args.uri {
        let exists = service.symbol_package_exists_by_id(&args.id, &version).await?;
        if !exists {
            anyhow::bail!(
                "{} is not stored in the {} backend",
                location,
                state.storage().backend_name()
            );
        }

        let symbols = SymbolPackage::new(
            Package::new(&args.id, &version).with_normalized_version(&version),
        );
        let uri = service.symbol_package_read_uri(&symbols).await?;
        println!("{}", uri);
    }

    Ok(())
}
