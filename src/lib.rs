pub mod commands;
pub mod error;
pub mod package;
pub mod runtime;
pub mod store;

/// Shared helpers for unit tests: a fixed configuration, registry JSON
/// fixtures, and canned installer subprocess output.
#[cfg(test)]
pub mod test_utils {
    use crate::commands::Config;
    use crate::package::Package;
    use crate::runtime::MockRuntime;
    use crate::store::{FORMAT_VERSION, RegistryFile};
    use chrono::Utc;
    use mockall::predicate::{always, eq};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::process::{ExitStatus, Output};

    /// A configuration with fixed paths, for mock-runtime tests.
    /// - config dir `/cfg`, storage `/cfg/storage.json`, bin dir `/go/bin`
    pub fn test_config() -> Config {
        Config {
            config_dir: PathBuf::from("/cfg"),
            storage_path: PathBuf::from("/cfg/storage.json"),
            bin_dir: PathBuf::from("/go/bin"),
        }
    }

    /// Serialized registry file containing the given packages.
    pub fn registry_json(packages: &[Package]) -> String {
        let file = RegistryFile {
            version: FORMAT_VERSION.to_string(),
            updated_at: Utc::now(),
            binaries: packages
                .iter()
                .map(|p| (p.id().to_string(), p.clone()))
                .collect::<BTreeMap<_, _>>(),
        };
        serde_json::to_string(&file).unwrap()
    }

    /// Expect the registry at the [`test_config`] storage path to exist and
    /// load with the given content.
    pub fn expect_registry_load(runtime: &mut MockRuntime, json: String) {
        let storage = test_config().storage_path;
        runtime
            .expect_exists()
            .with(eq(storage.clone()))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(storage))
            .returning(move |_| Ok(json.clone()));
    }

    /// Expect any number of registry persists (tmp write + rename) at the
    /// [`test_config`] storage path.
    pub fn expect_registry_save(runtime: &mut MockRuntime) {
        let storage = test_config().storage_path;
        let tmp = PathBuf::from("/cfg/storage.json.tmp");
        runtime
            .expect_write()
            .with(eq(tmp.clone()), always())
            .returning(|_, _| Ok(()));
        runtime
            .expect_rename()
            .with(eq(tmp), eq(storage))
            .returning(|_, _| Ok(()));
    }

    /// A canned installer [`Output`] with the given exit code and streams.
    pub fn installer_output(code: i32, stdout: &str, stderr: &str) -> Output {
        #[cfg(unix)]
        let status = {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw(code << 8)
        };
        #[cfg(windows)]
        let status = {
            use std::os::windows::process::ExitStatusExt;
            ExitStatus::from_raw(code as u32)
        };

        Output {
            status,
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }
}
