//! Error type returned by the report renderer.

use thiserror::Error;

/// Errors that can occur while turning a [`ReportInput`](crate::model::ReportInput) into PDF bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A text field contains a character outside printable Latin-1.
    #[error("field `{field}` contains {character:?}, which is not a printable Latin-1 character")]
    UnsupportedCharacter {
        /// Path of the offending field, e.g. `tasks[3].room_label`.
        field: String,
        /// The first character that failed the check.
        character: char,
    },

    /// The report fonts could not be located or loaded.
    #[error("failed to load the report fonts")]
    Fonts(#[source] genpdf::error::Error),

    /// The PDF backend failed while laying out or writing the page.
    #[error("failed to render the PDF document")]
    Pdf(#[source] genpdf::error::Error),

    /// The rendered bytes could not be re-read or rewritten for normalisation.
    #[error("failed to normalise the rendered PDF")]
    Normalize(#[from] lopdf::Error),
}
