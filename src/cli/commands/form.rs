//! Interactive course entry (`form`)

use super::courses::{render_notice, settle};
use gpa_ledger::ledger::{CourseForm, Field, Ledger};
use std::io::{self, BufRead, Write};

/// Prompt for courses until the input ends or the user submits a blank form.
///
/// Fields are asked in order. A rejected entry prints its notice and asks
/// again for the offending field only, keeping what was already typed.
///
/// # Returns
/// Number of courses added
///
/// # Errors
/// Returns an error if reading input or writing prompts fails
pub async fn run_session<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    mut input: R,
    mut out: W,
    precision: usize,
) -> io::Result<usize> {
    let mut form = CourseForm::new();
    let mut added = 0;
    let mut pending: Vec<Field> = Field::ORDER.to_vec();

    writeln!(out, "Enter courses; leave Course empty to finish.")?;

    loop {
        for field in pending.drain(..) {
            let Some(text) = prompt(&mut input, &mut out, field)? else {
                return Ok(added);
            };
            form.set(field, text);
            if field == Field::Course && form.is_blank() {
                return Ok(added);
            }
        }

        match form.submit(ledger) {
            Ok(result) => {
                added += 1;
                writeln!(
                    out,
                    "✓ Added {} as #{}. GPA: {}",
                    result.record.name,
                    result.record.id,
                    ledger.gpa().display_with(precision)
                )?;
                settle(result.write).await;
                pending.extend(Field::ORDER);
            }
            Err(e) => {
                writeln!(out, "{}", render_notice(e))?;
                pending.push(e.field());
            }
        }
    }
}

/// Ask for one field. Returns `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, field: Field) -> io::Result<Option<String>> {
    write!(out, "{}: ", field.label())?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
