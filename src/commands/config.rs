use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

const CONFIG_DIR_NAME: &str = "goman";
const STORAGE_FILE_NAME: &str = "storage.json";

/// Resolved paths for one command invocation, built once in `main` and
/// threaded by reference into every workflow.
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub storage_path: PathBuf,
    pub bin_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration directory (flag/env override, else the
    /// platform config dir), create it if needed, and locate the registry
    /// file and the go bin directory.
    #[tracing::instrument(skip(runtime, config_dir))]
    pub fn new<R: Runtime>(runtime: &R, config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => runtime
                .config_dir()
                .context("could not determine user config directory")?
                .join(CONFIG_DIR_NAME),
        };

        runtime
            .create_dir_all(&config_dir)
            .with_context(|| format!("failed to create config directory {:?}", config_dir))?;
        debug!("using config dir {:?}", config_dir);

        let storage_path = config_dir.join(STORAGE_FILE_NAME);
        let bin_dir = go_bin_dir(runtime)?;
        debug!(
            "using storage file {:?}, bin dir {:?}",
            storage_path, bin_dir
        );

        Ok(Config {
            config_dir,
            storage_path,
            bin_dir,
        })
    }
}

/// The directory `go install` drops binaries into: `$GOBIN`, else
/// `$GOPATH/bin`, else `<home>/go/bin`.
#[tracing::instrument(skip(runtime))]
pub fn go_bin_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    if let Ok(gobin) = runtime.env_var("GOBIN")
        && !gobin.is_empty()
    {
        return Ok(PathBuf::from(gobin));
    }

    if let Ok(gopath) = runtime.env_var("GOPATH")
        && !gopath.is_empty()
    {
        return Ok(PathBuf::from(gopath).join("bin"));
    }

    let home = runtime
        .home_dir()
        .context("could not determine home directory")?;
    Ok(home.join("go").join("bin"))
}
