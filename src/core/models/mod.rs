//! Data models for `gpa-ledger`

pub mod course;
pub mod gpa;

pub use course::{CourseId, CourseRecord};
pub use gpa::{compute_gpa, Gpa};
