//! Document construction for the report form.

use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::{style, PageDecorator, Size};
use log::debug;

use crate::charset;
use crate::elements::{mm_from_f64, SheetElement};
use crate::error::RenderError;
use crate::fonts;
use crate::model::ReportInput;
use crate::normalize;
use crate::report::{self, REPORT_TITLE};

/// MIME type of the rendered document.
pub const PDF_MIME_TYPE: &str = "application/pdf";

const FILE_NAME_PREFIX: &str = "Raport_DG_";

/// Returns the conventional download file name for a report on `object_number`.
///
/// Characters that are not allowed in file names on common platforms are
/// replaced by `_`.
pub fn report_file_name(object_number: &str) -> String {
    let sanitized: String = object_number
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}{}.pdf", FILE_NAME_PREFIX, sanitized)
}

/// The bytes of a rendered report together with its suggested file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Renders report forms into PDF documents.
///
/// The renderer holds configuration only; every call to [`render`](Self::render)
/// builds a fresh document and shares nothing with other calls.
#[derive(Clone, Debug, Default)]
pub struct ReportRenderer {
    fonts_dir: Option<PathBuf>,
    title: Option<String>,
}

impl ReportRenderer {
    /// Creates a renderer that locates fonts through the default search order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the Liberation Sans files from `fonts_dir` instead of searching for them.
    pub fn with_fonts_dir(mut self, fonts_dir: impl Into<PathBuf>) -> Self {
        self.fonts_dir = Some(fonts_dir.into());
        self
    }

    /// Sets the PDF document title. Defaults to the form title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the explicit font directory, if any.
    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }

    /// Renders `input` into a single-page PDF.
    pub fn render(&self, input: &ReportInput) -> Result<RenderedReport, RenderError> {
        charset::check_report(input)?;
        let title = self.title.as_deref().unwrap_or(REPORT_TITLE);
        charset::check_field("title", title)?;

        let sheet = report::compose(input);
        debug!(
            "composed report for object '{}' with {} cells",
            input.object_number(),
            sheet.cells().len()
        );
        let geometry = sheet.geometry();

        let font_family =
            fonts::report_font_family(self.fonts_dir()).map_err(RenderError::Fonts)?;
        let mut document = genpdf::Document::new(font_family);
        document.set_title(title);
        document.set_minimal_conformance();
        document.set_paper_size(Size::new(
            mm_from_f64(geometry.width),
            mm_from_f64(geometry.height),
        ));
        document.set_page_decorator(SinglePageDecorator::default());
        document.push(SheetElement::new(sheet));

        let mut raw = Vec::new();
        document.render(&mut raw).map_err(RenderError::Pdf)?;
        let bytes = normalize::normalize(&raw, input.date())?;
        debug!("rendered {} bytes ({} before normalisation)", bytes.len(), raw.len());

        Ok(RenderedReport {
            bytes,
            file_name: report_file_name(input.object_number()),
        })
    }
}

/// Hands the whole page to the sheet and refuses to start a second page.
#[derive(Default)]
struct SinglePageDecorator {
    page: usize,
}

impl PageDecorator for SinglePageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;
        if self.page > 1 {
            return Err(Error::new(
                "The report form must fit on a single page",
                ErrorKind::PageSizeExceeded,
            ));
        }
        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_object_number() {
        assert_eq!(report_file_name("87654"), "Raport_DG_87654.pdf");
        assert_eq!(report_file_name(" 12/3 "), "Raport_DG_12_3.pdf");
        assert_eq!(report_file_name("Köln:A"), "Raport_DG_Köln_A.pdf");
    }

    #[test]
    fn unsupported_text_fails_before_fonts_are_loaded() {
        let renderer = ReportRenderer::new().with_fonts_dir("/__dg_report_no_fonts__");
        let input = ReportInput::new("24.05.2024", "Rynek 1, Łódź", "1");
        match renderer.render(&input) {
            Err(RenderError::UnsupportedCharacter { field, character }) => {
                assert_eq!(field, "address");
                assert_eq!(character, 'Ł');
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn title_is_checked_too() {
        let renderer = ReportRenderer::new().with_title("Bericht №1");
        assert!(matches!(
            renderer.render(&ReportInput::default()),
            Err(RenderError::UnsupportedCharacter { ref field, .. }) if field == "title"
        ));
    }
}
