//! Library for `gpa-ledger`
//! Course ledger, GPA derivation and snapshot persistence used by the `gpacalc` CLI

pub mod core;
pub mod logger;

pub use crate::core::*;
