//! Course ledger command handlers (`add`, `list`, `delete`, `gpa`)

use gpa_ledger::config::Config;
use gpa_ledger::ledger::{Ledger, ValidationError, DISMISS_LABEL};
use gpa_ledger::models::{CourseId, CourseRecord, Gpa};
use gpa_ledger::store::{FileStore, PendingWrite};
use gpa_ledger::{verbose, warn};
use std::fmt::Write as _;
use std::sync::Arc;

/// Text shown in place of the table when no course is recorded
pub const EMPTY_PLACEHOLDER: &str = "Have no record";

/// Open the ledger stored under the configured data directory
pub async fn open_ledger(config: &Config) -> Ledger {
    let store = FileStore::new(&config.storage.data_dir);
    verbose!("Using course list in {}", store.data_dir().display());
    Ledger::initialize(Arc::new(store)).await
}

/// Handle `add`: validate and record one course.
///
/// # Errors
/// Returns the rendered validation notice when the entry is rejected
pub async fn add(
    ledger: &mut Ledger,
    course: &str,
    credits: &str,
    grade: &str,
    precision: usize,
) -> Result<(), String> {
    let added = ledger
        .add_course(course, credits, grade)
        .map_err(render_notice)?;
    println!(
        "✓ Added {} ({} credits, grade {}) as #{}",
        added.record.name, added.record.credits, added.record.grade, added.record.id
    );
    settle(added.write).await;
    println!("GPA: {}", ledger.gpa().display_with(precision));
    Ok(())
}

/// Handle `delete`: remove a course by id (unknown ids are reported, not rejected)
pub async fn delete(ledger: &mut Ledger, id: u64, precision: usize) {
    let deleted = ledger.delete_course(CourseId(id));
    match &deleted.removed {
        Some(record) => println!("✓ Deleted {} (#{})", record.name, record.id),
        None => println!("No course with id {id}; nothing deleted"),
    }
    settle(deleted.write).await;
    println!("GPA: {}", ledger.gpa().display_with(precision));
}

/// Handle `list`
pub fn list(ledger: &Ledger, precision: usize) {
    print!("{}", render_table(ledger.records(), ledger.gpa(), precision));
}

/// Handle `gpa`
pub fn gpa(ledger: &Ledger, precision: usize) {
    println!("{}", ledger.gpa().display_with(precision));
}

/// Wait for a snapshot write. A failure keeps the change for this run only.
pub async fn settle(write: PendingWrite) {
    if let Err(e) = write.settled().await {
        warn!("Change kept in memory only; saving the course list failed: {e}");
    }
}

/// Render a validation failure as a dismiss-only notice
#[must_use]
pub fn render_notice(err: ValidationError) -> String {
    format!(
        "✗ {}\n  {}\n  [{}]  (fix: {})",
        err.title(),
        err.message(),
        DISMISS_LABEL,
        err.field()
    )
}

/// Render the course table followed by the GPA line
#[must_use]
pub fn render_table(records: &[CourseRecord], gpa: Gpa, precision: usize) -> String {
    let mut out = String::new();
    if records.is_empty() {
        let _ = writeln!(out, "{EMPTY_PLACEHOLDER}");
    } else {
        let width = records
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Course".len());
        let _ = writeln!(
            out,
            "{:<15} {:<width$} {:>8} {:>6}",
            "Id", "Course", "Credits", "Grade"
        );
        for r in records {
            let _ = writeln!(
                out,
                "{:<15} {:<width$} {:>8} {:>6}",
                r.id, r.name, r.credits, r.grade
            );
        }
    }
    let _ = writeln!(out, "GPA: {}", gpa.display_with(precision));
    out
}
