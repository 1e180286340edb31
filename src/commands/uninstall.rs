use anyhow::Result;
use log::info;

use crate::error::Error;
use crate::package::Package;
use crate::runtime::Runtime;
use crate::store::Store;

use super::config::Config;

/// Uninstall packages: remove the binary from the bin directory, then drop
/// the record from the registry. A failure aborts the loop at the failing
/// name; names already processed stay uninstalled.
#[tracing::instrument(skip(runtime, config))]
pub fn uninstall<R: Runtime>(runtime: &R, names: &[String], config: &Config) -> Result<()> {
    let mut store = Store::open(runtime, config.storage_path.clone())?;

    for name in names {
        let package: Package = store
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.clone()))?;

        let bin_path = config.bin_dir.join(&package.name);
        runtime
            .remove_file(&bin_path)
            .map_err(|source| Error::BinaryRemoval {
                path: bin_path.clone(),
                source,
            })?;
        info!("removed binary {:?}", bin_path);

        store.delete(package.id())?;
        println!("Uninstalled package: {}", package.name);
    }

    Ok(())
}
