//! Input validation for new course entries

use std::fmt;
use thiserror::Error;

/// Input field of the course entry form.
///
/// Validation failures name the field that should receive focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Course name
    Course,
    /// Credit weight
    Credits,
    /// Grade-point value
    Grade,
}

impl Field {
    /// Fields in entry and validation order
    pub const ORDER: [Self; 3] = [Self::Course, Self::Credits, Self::Grade];

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Credits => "Credits",
            Self::Grade => "Grade",
        }
    }

    /// Field that follows this one when the user submits it, if any
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Course => Some(Self::Credits),
            Self::Credits => Some(Self::Grade),
            Self::Grade => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejection of a course entry. No ledger state changes when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Course name is empty
    #[error("course name is missing")]
    MissingName,
    /// Credits text is empty
    #[error("credits are missing")]
    MissingCredits,
    /// Grade text is empty
    #[error("grade is missing")]
    MissingGrade,
    /// Text has no leading number, or the number is not finite
    #[error("{0} is not a number")]
    NotANumber(Field),
}

/// Label of the single button on a validation notice
pub const DISMISS_LABEL: &str = "OK";

impl ValidationError {
    /// Field that should receive focus
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::MissingName => Field::Course,
            Self::MissingCredits => Field::Credits,
            Self::MissingGrade => Field::Grade,
            Self::NotANumber(field) => field,
        }
    }

    /// Title of the user-facing notice
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::MissingName => "Lost in Class?",
            Self::MissingCredits => "Credits Gone Missing?",
            Self::MissingGrade => "Grade? What Grade?",
            Self::NotANumber(_) => "That's Not a Number",
        }
    }

    /// Body of the user-facing notice
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingName => {
                "Oops! Forgot to name your course? Give it a title before you submit!"
            }
            Self::MissingCredits => "Wait! No credits? Add them before you hit submit!",
            Self::MissingGrade => {
                "No grade, no glory! Don't forget to add your grade before submitting!"
            }
            Self::NotANumber(Field::Credits) => "Credits need to be a number, like 3 or 1.5.",
            Self::NotANumber(_) => "Grades need to be a number, like 4 or 3.7.",
        }
    }
}

/// A validated course entry, ready to be given an id
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEntry {
    /// Course name, surrounding whitespace removed
    pub name: String,
    /// Parsed credits
    pub credits: f64,
    /// Parsed grade
    pub grade: f64,
}

/// Validate raw form text.
///
/// Emptiness is checked first for all three fields in order (course,
/// credits, grade); numbers are only parsed once every field is present.
///
/// # Errors
/// Returns the first failure found
pub fn validate(name: &str, credits_text: &str, grade_text: &str) -> Result<ValidEntry, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if credits_text.is_empty() {
        return Err(ValidationError::MissingCredits);
    }
    if grade_text.is_empty() {
        return Err(ValidationError::MissingGrade);
    }

    let credits =
        parse_leading_number(credits_text).ok_or(ValidationError::NotANumber(Field::Credits))?;
    let grade =
        parse_leading_number(grade_text).ok_or(ValidationError::NotANumber(Field::Grade))?;

    Ok(ValidEntry {
        name: name.to_string(),
        credits,
        grade,
    })
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// `"3abc"` parses as 3 and `"2.5 credits"` as 2.5. Returns `None` when no
/// digits lead the text or the value is not finite.
#[must_use]
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
