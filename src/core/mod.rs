//! Core module: models, ledger, persistence and configuration

pub mod config;
pub mod ledger;
pub mod models;
pub mod store;

/// Returns the current version of the `gpa-ledger` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
