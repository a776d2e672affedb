//! SQL templates over the tracking tables of one migration set.
//!
//! Table identifiers come from a [`MigrationSetName`], whose `^\w{3,8}$`
//! invariant is what makes interpolating them into SQL safe. Values always
//! go through bound parameters.

use dm_core::MigrationSetName;

/// Version of the tracking-table layout written by the null migration.
pub const META_VERSION: i64 = 1;

/// Names of the version and applied-paths tables for one migration set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTables {
    version: String,
    applied: String,
}

impl MetaTables {
    pub fn new(set: &MigrationSetName) -> Self {
        Self {
            version: set.version_table(),
            applied: set.applied_table(),
        }
    }

    /// `dirmigv_<name>`
    pub fn version_table(&self) -> &str {
        &self.version
    }

    /// `dirmig_<name>`
    pub fn applied_table(&self) -> &str {
        &self.applied
    }

    pub fn create_version_table(&self) -> String {
        format!(
            "create table if not exists {} (version int primary key, created timestamp with time zone default now())",
            self.version
        )
    }

    pub fn select_max_version(&self) -> String {
        format!("select cast(max(version) as bigint) from {}", self.version)
    }

    pub fn insert_meta_version(&self) -> String {
        format!(
            "insert into {} (version) values ({})",
            self.version, META_VERSION
        )
    }

    pub fn create_applied_table(&self) -> String {
        format!(
            "create table if not exists {} (path text primary key, created timestamp with time zone default now())",
            self.applied
        )
    }

    pub fn select_applied_paths(&self) -> String {
        format!("select path from {}", self.applied)
    }

    /// Takes the file name as its single parameter.
    pub fn insert_applied_path(&self) -> String {
        format!("insert into {} (path) values (?)", self.applied)
    }
}
