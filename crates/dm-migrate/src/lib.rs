//! Migration engine for dirmig.
//!
//! Applies a directory of SQL scripts exactly once each per migration set.
//! [`bootstrap`] makes sure the `dirmigv_<name>` and `dirmig_<name>` tracking
//! tables exist; [`apply`] then runs every unrecorded script in file-name
//! order inside a single transaction, so a batch either lands completely or
//! not at all.

pub mod apply;
pub mod bootstrap;
pub mod error;
pub mod migrator;
pub mod script;
pub mod tables;

pub use apply::{apply, ApplyReport};
pub use bootstrap::{bootstrap, BootstrapOutcome};
pub use error::{MigrateError, MigrateResult};
pub use migrator::Migrator;
pub use tables::MetaTables;
