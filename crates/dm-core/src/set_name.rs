//! Validated migration set name.
//!
//! The set name is interpolated directly into table identifiers, so the
//! only way to obtain a [`MigrationSetName`] is through the `^\w{3,8}$`
//! check below.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::OnceLock;

/// Prefix of the tracking-mechanism version table.
const VERSION_TABLE_PREFIX: &str = "dirmigv_";

/// Prefix of the applied-paths table.
const APPLIED_TABLE_PREFIX: &str = "dirmig_";

fn set_name_pattern() -> &'static Regex {
    static SET_NAME_RE: OnceLock<Regex> = OnceLock::new();
    SET_NAME_RE.get_or_init(|| Regex::new(r"^\w{3,8}$").expect("valid regex"))
}

/// Operator-chosen identifier that namespaces a pair of tracking tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MigrationSetName(String);

impl MigrationSetName {
    /// Validate `name` and wrap it.
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        if set_name_pattern().is_match(&name) {
            Ok(Self(name))
        } else {
            Err(CoreError::InvalidSetName { name })
        }
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the version table, `dirmigv_<name>`.
    pub fn version_table(&self) -> String {
        format!("{VERSION_TABLE_PREFIX}{}", self.as_str())
    }

    /// Name of the applied-paths table, `dirmig_<name>`.
    pub fn applied_table(&self) -> String {
        format!("{APPLIED_TABLE_PREFIX}{}", self.as_str())
    }
}

impl FromStr for MigrationSetName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MigrationSetName {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MigrationSetName {
    type Error = CoreError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl fmt::Display for MigrationSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for MigrationSetName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for MigrationSetName {
    type Target = str;
    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for MigrationSetName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "set_name_test.rs"]
mod tests;
