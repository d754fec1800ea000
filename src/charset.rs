//! Character check for text placed on the form.
//!
//! Form text is limited to printable ISO-8859-1, the repertoire of the paper
//! form and of every supported font family. Every text field is checked up
//! front so an unsupported character fails the render with the name of the
//! field before anything is laid out.

use crate::error::RenderError;
use crate::model::ReportInput;

/// Returns whether `c` is a printable ISO-8859-1 character.
pub fn is_printable_latin1(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}')
}

/// Fails with [`RenderError::UnsupportedCharacter`] on the first character of
/// `value` that is not printable Latin-1.
pub fn check_field(field: impl Into<String>, value: &str) -> Result<(), RenderError> {
    match value.chars().find(|c| !is_printable_latin1(*c)) {
        Some(character) => Err(RenderError::UnsupportedCharacter {
            field: field.into(),
            character,
        }),
        None => Ok(()),
    }
}

/// Checks every text field of the report in form order.
pub fn check_report(input: &ReportInput) -> Result<(), RenderError> {
    check_field("date", input.date())?;
    check_field("object_number", input.object_number())?;
    check_field("address", input.address())?;

    for (index, task) in input.tasks().iter().enumerate() {
        check_field(format!("tasks[{index}].room_label"), task.room_label())?;
    }

    let staff = input.staff();
    check_field("staff.name", staff.name())?;
    check_field("staff.start", staff.start())?;
    check_field("staff.break_text", staff.break_text())?;
    check_field("staff.end", staff.end())?;
    Ok(())
}
