//! Course record model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a course record within a ledger.
///
/// Ids are millisecond timestamps taken when the record is created and are
/// never reused after the record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One entry in the course ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Unique id (creation timestamp in milliseconds)
    pub id: CourseId,

    /// Course name (e.g., "Linear Algebra"); persisted under the `course` key
    #[serde(rename = "course")]
    pub name: String,

    /// Credit weight (can be fractional)
    pub credits: f64,

    /// Grade-point value (can be fractional, no bounds enforced)
    pub grade: f64,
}

impl CourseRecord {
    /// Create a new course record
    ///
    /// # Arguments
    /// * `id` - Ledger-unique id
    /// * `name` - Course name
    /// * `credits` - Credit weight
    /// * `grade` - Grade-point value
    #[must_use]
    pub const fn new(id: CourseId, name: String, credits: f64, grade: f64) -> Self {
        Self {
            id,
            name,
            credits,
            grade,
        }
    }

    /// Weighted grade points contributed by this course (`credits * grade`)
    #[must_use]
    pub fn quality_points(&self) -> f64 {
        self.credits * self.grade
    }
}
