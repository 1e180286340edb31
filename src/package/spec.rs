//! Package identifier parsing for the install command.

use std::str::FromStr;

use crate::error::Error;

/// A parsed `source@version` identifier.
///
/// The version is mandatory: a bare source is rejected rather than defaulting
/// to `latest`, so the registry always records what was actually asked for.
#[derive(Debug, PartialEq, Clone)]
pub struct PackageSpec {
    pub source: String,
    pub version: String,
}

impl std::fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.source, self.version)
    }
}

impl FromStr for PackageSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidIdentifier {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let Some(at_pos) = s.rfind('@') else {
            return Err(invalid("expected 'source@version'"));
        };

        let (source, version) = s.split_at(at_pos);
        let version = &version[1..]; // Skip the @

        if source.is_empty() {
            return Err(invalid("source before '@' cannot be empty"));
        }
        if version.is_empty() {
            return Err(invalid("version after '@' cannot be empty"));
        }

        Ok(PackageSpec {
            source: source.to_string(),
            version: version.to_string(),
        })
    }
}
