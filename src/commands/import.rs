use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::package::Package;
use crate::runtime::Runtime;
use crate::store::Store;

use super::config::Config;
use super::export::DEFAULT_EXPORT_FILE;

/// Import a registry file, fully replacing the current registry. Binaries
/// are not reinstalled; only the record set is repopulated.
#[tracing::instrument(skip(runtime, config))]
pub fn import<R: Runtime>(runtime: &R, file: Option<PathBuf>, config: &Config) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => runtime
            .home_dir()
            .context("could not determine home directory")?
            .join(DEFAULT_EXPORT_FILE),
    };

    let mut store: Store<'_, R, Package> = Store::new(runtime, config.storage_path.clone());
    store.import(&path)?;

    println!(
        "Imported {} package(s) from {}",
        store.all().len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{registry_json, test_config};
    use mockall::predicate::eq;
    use std::path::Path;

    #[test]
    fn test_import_replaces_registry_without_installing() {
        let mut runtime = MockRuntime::new();
        let imported = vec![Package::new("example.com/tool@latest").unwrap()];
        let json = registry_json(&imported);

        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("/tmp/in.json")))
            .returning(move |_| Ok(json.clone()));

        // The replacement is persisted straight to the bound storage path
        runtime
            .expect_write()
            .withf(|p, _| p == Path::new("/cfg/storage.json.tmp"))
            .times(1)
            .returning(|_, _| Ok(()));
        runtime
            .expect_rename()
            .with(
                eq(PathBuf::from("/cfg/storage.json.tmp")),
                eq(PathBuf::from("/cfg/storage.json")),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        // No expect_run_installer: import must never invoke the installer
        import(&runtime, Some(PathBuf::from("/tmp/in.json")), &test_config()).unwrap();
    }

    #[test]
    fn test_import_missing_file_is_storage_io() {
        let mut runtime = MockRuntime::new();
        runtime.expect_read_to_string().returning(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            ))
        });

        let err = import(
            &runtime,
            Some(PathBuf::from("/tmp/absent.json")),
            &test_config(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::StorageIo { .. })
        ));
    }

    #[test]
    fn test_import_malformed_file_leaves_registry_untouched() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("not json".to_string()));

        // No write/rename expectations: a malformed import must not persist
        let err = import(
            &runtime,
            Some(PathBuf::from("/tmp/bad.json")),
            &test_config(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::StorageFormat { .. })
        ));
    }
}
