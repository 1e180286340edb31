//! External installer subprocess invocation.

use std::io;
use std::process::{Command, Output};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_installer_impl(&self, reference: &str) -> io::Result<Output> {
        Command::new("go").args(["install", reference]).output()
    }
}
