//! Package records: one tracked installed binary and the act of installing it.

mod spec;

pub use spec::PackageSpec;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Distinguished version meaning "re-resolve to the newest version on update".
pub const LATEST: &str = "latest";

/// Metadata for one binary tracked in the registry.
///
/// `name` is the registry key; `uri` never carries the `@version` suffix —
/// the combined reference is derived by [`Package::uri_with_version`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Package {
    pub version: String,
    pub uri: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Build a record from a `source@version` identifier.
    pub fn new(identifier: &str) -> Result<Self> {
        let spec: PackageSpec = identifier.parse()?;

        let name = binary_name(&spec.source).ok_or_else(|| Error::InvalidIdentifier {
            input: identifier.to_string(),
            reason: format!("could not determine binary name from '{}'", spec.source),
        })?;

        Ok(Package {
            version: spec.version,
            uri: spec.source,
            name,
            updated_at: Utc::now(),
        })
    }

    /// The registry key for this record.
    pub fn id(&self) -> &str {
        &self.name
    }

    /// The full reference passed to the external installer.
    pub fn uri_with_version(&self) -> String {
        format!("{}@{}", self.uri, self.version)
    }

    pub fn is_latest(&self) -> bool {
        self.version == LATEST
    }

    /// Invoke the external installer for this record and block until it
    /// exits. Success requires a zero exit code AND an empty stderr stream;
    /// the wrapped tool reports failures on stderr even when it exits zero.
    /// Returns the captured stdout as installer log text.
    #[tracing::instrument(skip(self, runtime))]
    pub fn install<R: Runtime>(&self, runtime: &R) -> Result<String> {
        let reference = self.uri_with_version();

        let output = runtime
            .run_installer(&reference)
            .map_err(|e| Error::Install {
                reference: reference.clone(),
                detail: format!("could not spawn installer: {}", e),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(Error::Install {
                reference,
                detail: format!(
                    "installer exited with {}, stderr: {}",
                    output.status,
                    stderr.trim()
                ),
            });
        }

        if !output.stderr.is_empty() {
            return Err(Error::Install {
                reference,
                detail: format!("installer wrote to stderr: {}", stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Change the requested version and refresh the update timestamp. Does
    /// not reinstall; callers invoke [`Package::install`] separately when a
    /// new binary is wanted.
    pub fn set_version(&mut self, version: &str) {
        self.version = version.to_string();
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Name: {}\nURI: {}\nUpdated: {}",
            self.name,
            self.uri_with_version(),
            self.updated_at.to_rfc3339()
        )
    }
}

/// Derive the binary name from a source URI: the last path segment, unless
/// that segment is a `v<digits>` major-version suffix, in which case the
/// second-to-last segment is used (`example.com/cmd/tool/v2` installs `tool`).
fn binary_name(uri: &str) -> Option<String> {
    let mut segments = uri.rsplit('/');
    let last = segments.next()?;

    let candidate = if is_major_version_suffix(last) {
        segments.next()?
    } else {
        last
    };

    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}

fn is_major_version_suffix(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}
