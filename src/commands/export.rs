use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::package::Package;
use crate::runtime::Runtime;
use crate::store::Store;

use super::config::Config;

pub const DEFAULT_EXPORT_FILE: &str = "goman.json";
pub const DEFAULT_DUMP_FILE: &str = "goman-dump.json";

/// Export the registry to a file (default `~/goman.json`).
#[tracing::instrument(skip(runtime, config))]
pub fn export<R: Runtime>(runtime: &R, file: Option<PathBuf>, config: &Config) -> Result<()> {
    let path = resolve_target(runtime, file, DEFAULT_EXPORT_FILE)?;
    save_to(runtime, &path, config)?;
    println!("Installed packages exported to: {}", path.display());
    Ok(())
}

/// Legacy alias of [`export`] with a different default file name.
#[tracing::instrument(skip(runtime, config))]
pub fn dump<R: Runtime>(runtime: &R, file: Option<PathBuf>, config: &Config) -> Result<()> {
    let path = resolve_target(runtime, file, DEFAULT_DUMP_FILE)?;
    save_to(runtime, &path, config)?;
    println!("Installed packages dumped to: {}", path.display());
    Ok(())
}

fn save_to<R: Runtime>(runtime: &R, path: &Path, config: &Config) -> Result<()> {
    let store: Store<'_, R, Package> = Store::load(runtime, config.storage_path.clone())?;
    store.export(path)?;
    Ok(())
}

fn resolve_target<R: Runtime>(
    runtime: &R,
    file: Option<PathBuf>,
    default_name: &str,
) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => {
            let home = runtime
                .home_dir()
                .context("could not determine home directory")?;
            Ok(home.join(default_name))
        }
    }
}
