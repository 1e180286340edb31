use anyhow::{Context, Result};
use log::debug;

use crate::error::Error;
use crate::package::{LATEST, Package};
use crate::runtime::Runtime;
use crate::store::Store;

use super::config::Config;

/// Update tracked packages.
///
/// A named package is updated first and unconditionally (NotFound if it is
/// not in the registry). The remaining records are then scanned: those
/// already tracking the `latest` sentinel are reinstalled, and `force`
/// extends that to records pinned to a concrete version.
#[tracing::instrument(skip(runtime, config))]
pub fn update<R: Runtime>(
    runtime: &R,
    name: Option<&str>,
    force_non_latest: bool,
    config: &Config,
) -> Result<()> {
    let mut store = Store::open(runtime, config.storage_path.clone())?;

    if let Some(name) = name {
        let mut package = store
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        reinstall(runtime, &mut store, &mut package)?;
    }

    let remaining: Vec<Package> = store
        .all()
        .values()
        .filter(|p| Some(p.id()) != name)
        .cloned()
        .collect();

    for mut package in remaining {
        if package.is_latest() || force_non_latest {
            debug!(
                "updating package {} from version {}",
                package.uri, package.version
            );
            reinstall(runtime, &mut store, &mut package)?;
        }
    }

    Ok(())
}

fn reinstall<R: Runtime>(
    runtime: &R,
    store: &mut Store<'_, R, Package>,
    package: &mut Package,
) -> Result<()> {
    package.set_version(LATEST);

    let output = package
        .install(runtime)
        .with_context(|| format!("failed to update package {}", package.name))?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    store.put(package.id(), package.clone())?;
    println!("Package {} updated successfully", package.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{
        expect_registry_load, expect_registry_save, installer_output, registry_json, test_config,
    };
    use mockall::predicate::eq;

    fn package(identifier: &str) -> Package {
        Package::new(identifier).unwrap()
    }

    #[test]
    fn test_update_unknown_name_is_not_found() {
        let mut runtime = MockRuntime::new();
        expect_registry_load(&mut runtime, registry_json(&[]));

        let err = update(&runtime, Some("missing"), false, &test_config()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_update_reinstalls_only_latest_records() {
        let mut runtime = MockRuntime::new();
        let tracked = vec![
            package("example.com/latest-tool@latest"),
            package("example.com/pinned-tool@v1.2.3"),
        ];
        expect_registry_load(&mut runtime, registry_json(&tracked));
        expect_registry_save(&mut runtime);

        // Only the latest-tracking record is reinstalled
        runtime
            .expect_run_installer()
            .with(eq("example.com/latest-tool@latest"))
            .times(1)
            .returning(|_| Ok(installer_output(0, "", "")));

        update(&runtime, None, false, &test_config()).unwrap();
    }

    #[test]
    fn test_update_force_reinstalls_pinned_records() {
        let mut runtime = MockRuntime::new();
        let tracked = vec![
            package("example.com/latest-tool@latest"),
            package("example.com/pinned-tool@v1.2.3"),
        ];
        expect_registry_load(&mut runtime, registry_json(&tracked));
        expect_registry_save(&mut runtime);

        // Both records reinstall; the pinned one moves to the latest sentinel
        runtime
            .expect_run_installer()
            .with(eq("example.com/latest-tool@latest"))
            .times(1)
            .returning(|_| Ok(installer_output(0, "", "")));
        runtime
            .expect_run_installer()
            .with(eq("example.com/pinned-tool@latest"))
            .times(1)
            .returning(|_| Ok(installer_output(0, "", "")));

        update(&runtime, None, true, &test_config()).unwrap();
    }

    #[test]
    fn test_update_named_pinned_record_reinstalls_once() {
        let mut runtime = MockRuntime::new();
        let tracked = vec![package("example.com/pinned-tool@v1.2.3")];
        expect_registry_load(&mut runtime, registry_json(&tracked));
        expect_registry_save(&mut runtime);

        // The named record updates unconditionally, and the follow-up scan
        // must not pick it up a second time
        runtime
            .expect_run_installer()
            .with(eq("example.com/pinned-tool@latest"))
            .times(1)
            .returning(|_| Ok(installer_output(0, "", "")));

        update(&runtime, Some("pinned-tool"), false, &test_config()).unwrap();
    }

    #[test]
    fn test_update_failure_aborts_scan() {
        let mut runtime = MockRuntime::new();
        let tracked = vec![
            package("example.com/a@latest"),
            package("example.com/b@latest"),
        ];
        expect_registry_load(&mut runtime, registry_json(&tracked));

        // First reinstall fails; the scan stops there
        runtime
            .expect_run_installer()
            .times(1)
            .returning(|_| Ok(installer_output(1, "", "network down")));

        let err = update(&runtime, None, false, &test_config()).unwrap_err();
        assert!(err.to_string().contains("failed to update package"));
    }

    #[test]
    fn test_update_empty_registry_is_ok() {
        let mut runtime = MockRuntime::new();
        expect_registry_load(&mut runtime, registry_json(&[]));

        update(&runtime, None, false, &test_config()).unwrap();
    }
}
