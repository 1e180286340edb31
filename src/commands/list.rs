use anyhow::Result;
use log::debug;

use crate::package::Package;
use crate::runtime::Runtime;
use crate::store::Store;

use super::config::Config;

const SEPARATOR: &str = "-------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// List tracked packages. An empty registry is reported explicitly in text
/// format rather than printed as an empty table.
#[tracing::instrument(skip(runtime, config))]
pub fn list<R: Runtime>(runtime: &R, format: OutputFormat, config: &Config) -> Result<()> {
    let store: Store<'_, R, Package> = Store::load(runtime, config.storage_path.clone())?;
    let packages = store.all();
    debug!("found {} package(s)", packages.len());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(packages)?);
        }
        OutputFormat::Text => {
            if packages.is_empty() {
                println!("No installed packages found.");
                return Ok(());
            }

            println!("Installed Packages:");
            println!("{}", SEPARATOR);
            for package in packages.values() {
                println!("{}", package);
                println!("{}", SEPARATOR);
            }
        }
    }

    Ok(())
}
