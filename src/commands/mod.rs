//! Per-command workflows over the registry store, package records, and the
//! external installer.

pub mod config;
mod export;
mod import;
mod install;
mod list;
mod uninstall;
mod update;

pub use config::Config;
pub use export::{dump, export};
pub use import::import;
pub use install::install;
pub use list::{OutputFormat, list};
pub use uninstall::uninstall;
pub use update::update;
