//! Renders the Deutsche Glasfaser daily work report ("Tagesarbeitsbericht")
//! into a single-page PDF.
//!
//! A front end assembles a [`ReportInput`]; [`render`] lays it out on the
//! fixed paper-form geometry and returns the PDF bytes. Use
//! [`ReportRenderer`] to configure the font directory or the
//! document title.

pub mod builder;
pub mod catalog;
pub mod charset;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod report;

pub use builder::{report_file_name, RenderedReport, ReportRenderer, PDF_MIME_TYPE};
pub use catalog::{MaterialCatalogEntry, MATERIAL_CATALOG, TASK_COLUMNS};
pub use error::RenderError;
pub use model::{MaterialQuantities, ReportInput, StaffRecord, TaskRow};

/// Renders `input` with the default configuration and returns the PDF bytes.
pub fn render(input: &ReportInput) -> Result<Vec<u8>, RenderError> {
    ReportRenderer::new().render(input).map(|report| report.bytes)
}
