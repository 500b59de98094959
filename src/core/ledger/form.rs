//! Course entry form state

use super::{Added, Field, Ledger, ValidationError};

/// The three text inputs used to add a course.
///
/// Fields are cleared only after a successful submit; a rejected submit
/// leaves them as typed so the user can fix the offending one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseForm {
    /// Course name text
    pub course: String,
    /// Credits text
    pub credits: String,
    /// Grade text
    pub grade: String,
}

impl CourseForm {
    /// Create an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a field
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Course => &self.course,
            Field::Credits => &self.credits,
            Field::Grade => &self.grade,
        }
    }

    /// Replace the text of a field
    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        let slot = match field {
            Field::Course => &mut self.course,
            Field::Credits => &mut self.credits,
            Field::Grade => &mut self.grade,
        };
        *slot = text.into();
    }

    /// Empty all three fields
    pub fn clear(&mut self) {
        self.course.clear();
        self.credits.clear();
        self.grade.clear();
    }

    /// Whether every field is empty
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.course.is_empty() && self.credits.is_empty() && self.grade.is_empty()
    }

    /// Add the entered course to `ledger`, clearing the form on success.
    ///
    /// # Errors
    /// Returns the validation failure; the form is left untouched
    pub fn submit(&mut self, ledger: &mut Ledger) -> Result<Added, ValidationError> {
        let added = ledger.add_course(&self.course, &self.credits, &self.grade)?;
        self.clear();
        Ok(added)
    }
}
