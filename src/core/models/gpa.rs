//! Grade-point average derivation

use super::CourseRecord;
use std::fmt;

/// Credit-weighted grade-point average.
///
/// Holds `None` when the average is undefined, i.e. when the ledger is empty
/// or its credits sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gpa(Option<f64>);

impl Gpa {
    /// The undefined average
    pub const UNDEFINED: Self = Self(None);

    /// Wrap a computed value; non-finite values collapse to undefined
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(Some(value))
        } else {
            Self::UNDEFINED
        }
    }

    /// The average, if defined
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        self.0
    }

    /// Whether the average is defined
    #[must_use]
    pub const fn is_defined(self) -> bool {
        self.0.is_some()
    }

    /// Format for display with the given number of decimal places.
    ///
    /// An undefined average renders as `"0"`. A defined average of exactly
    /// zero renders the same way, not as `"0.00"`, so both cases read alike
    /// on screen.
    #[must_use]
    pub fn display_with(self, precision: usize) -> String {
        match self.0 {
            Some(v) if v != 0.0 => format!("{v:.precision$}"),
            _ => "0".to_string(),
        }
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        f.write_str(&self.display_with(precision))
    }
}

/// Compute `Σ(credits × grade) / Σ(credits)` over the given records.
#[must_use]
pub fn compute_gpa(records: &[CourseRecord]) -> Gpa {
    let (points, credits) = records.iter().fold((0.0_f64, 0.0_f64), |(p, c), r| {
        (p + r.quality_points(), c + r.credits)
    });
    if credits == 0.0 {
        return Gpa::UNDEFINED;
    }
    Gpa::new(points / credits)
}
