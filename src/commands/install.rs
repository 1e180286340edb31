use anyhow::{Context, Result};
use log::{debug, warn};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::package::Package;
use crate::runtime::Runtime;
use crate::store::Store;

use super::config::Config;

/// Install packages and record them in the registry.
///
/// A record is persisted only after its installer invocation succeeded, so
/// the registry never contains a partially installed entry. A failure aborts
/// the loop at the failing identifier; earlier identifiers keep their
/// already-persisted state.
#[tracing::instrument(skip(runtime, config))]
pub fn install<R: Runtime>(
    runtime: &R,
    identifiers: &[String],
    forced_name: Option<&str>,
    config: &Config,
) -> Result<()> {
    if identifiers.len() > 1 && forced_name.is_some() {
        return Err(Error::ConflictingOptions.into());
    }

    let mut store = Store::open(runtime, config.storage_path.clone())?;

    for identifier in identifiers {
        let package = install_one(runtime, &mut store, identifier, forced_name, config)
            .with_context(|| format!("failed to install package {}", identifier))?;
        println!("Installed package: {}", package.name);
    }

    Ok(())
}

fn install_one<'a, R: Runtime>(
    runtime: &R,
    store: &mut Store<'a, R, Package>,
    identifier: &str,
    forced_name: Option<&str>,
    config: &Config,
) -> Result<Package> {
    let mut package = Package::new(identifier)?;
    let derived_path = config.bin_dir.join(&package.name);

    // The installer writes to the derived name. When the caller forces a
    // different name, any pre-existing binary at the derived path must
    // survive this install, whatever happens below.
    let _swap = match forced_name {
        Some(_) => Some(
            BinarySwap::acquire(runtime, derived_path.clone()).with_context(|| {
                format!("failed to set aside existing binary at {:?}", derived_path)
            })?,
        ),
        None => None,
    };

    let output = package.install(runtime)?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    if let Some(name) = forced_name {
        let target_path = config.bin_dir.join(name);
        debug!("renaming {:?} to {:?}", derived_path, target_path);
        runtime
            .rename(&derived_path, &target_path)
            .with_context(|| format!("failed to rename binary to {}", name))?;
        package.name = name.to_string();
    }

    store.put(package.id(), package.clone())?;
    Ok(package)
}

/// Scoped rename of a pre-existing binary out of the installer's way.
///
/// Acquiring renames `<path>` to `<path>.bak` when such a binary exists;
/// dropping the guard renames it back, on success and failure alike. A
/// failed restore is logged rather than raised over the primary error, so
/// the user learns that manual cleanup may be required without losing the
/// original diagnostic.
struct BinarySwap<'a, R: Runtime> {
    runtime: &'a R,
    original: PathBuf,
    backup: PathBuf,
    acquired: bool,
}

impl<'a, R: Runtime> BinarySwap<'a, R> {
    fn acquire(runtime: &'a R, original: PathBuf) -> io::Result<Self> {
        let backup = backup_path(&original);
        let acquired = runtime.exists(&original);

        if acquired {
            debug!("moving existing binary {:?} to {:?}", original, backup);
            runtime.rename(&original, &backup)?;
        }

        Ok(BinarySwap {
            runtime,
            original,
            backup,
            acquired,
        })
    }
}

impl<R: Runtime> Drop for BinarySwap<'_, R> {
    fn drop(&mut self) {
        if !self.acquired {
            return;
        }

        if let Err(e) = self.runtime.rename(&self.backup, &self.original) {
            warn!(
                "failed to restore original binary {:?} from {:?}: {}",
                self.original, self.backup, e
            );
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut backup = OsString::from(path.as_os_str());
    backup.push(".bak");
    PathBuf::from(backup)
}
