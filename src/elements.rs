//! `genpdf` element that paints a composed [`Sheet`] onto a page.
//!
//! `genpdf` has no filled rectangles, so shaded cells are painted with
//! overlapping horizontal strokes before their borders and text are drawn.
//! Lines use the default PDF width of 1 pt.

use genpdf::error::Error;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};
use log::debug;

use crate::layout::{Align, Borders, PlacedCell, Rgb, Sheet, CELL_PADDING_MM};

/// Width of a default stroke (1 pt).
const STROKE_WIDTH_MM: f64 = 0.3528;
/// Distance between fill strokes; smaller than the stroke width so they overlap.
const FILL_STEP_MM: f64 = 0.3;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn position(x: f64, y: f64) -> Position {
    Position::new(mm_from_f64(x), mm_from_f64(y))
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Vertical positions of the strokes that cover the band from `top` to `bottom`.
fn fill_stroke_offsets(top: f64, bottom: f64) -> Vec<f64> {
    let first = top + STROKE_WIDTH_MM / 2.0;
    let last = bottom - STROKE_WIDTH_MM / 2.0;
    if last < first {
        return Vec::new();
    }
    let strokes = ((last - first) / FILL_STEP_MM).ceil() as usize + 1;
    (0..strokes)
        .map(|index| (first + FILL_STEP_MM * index as f64).min(last))
        .collect()
}

/// Paints every cell of a sheet at its absolute position.
///
/// The element expects an area that covers the whole page with its origin in
/// the top-left corner and always renders completely.
pub struct SheetElement {
    sheet: Sheet,
}

impl SheetElement {
    pub fn new(sheet: Sheet) -> Self {
        Self { sheet }
    }

    fn paint_fill(area: &render::Area<'_>, cell: &PlacedCell, fill: Rgb) {
        for y in fill_stroke_offsets(cell.y, cell.bottom()) {
            area.draw_line(
                vec![position(cell.x, y), position(cell.right(), y)],
                Style::new().with_color(color(fill)),
            );
        }
    }

    fn paint_borders(area: &render::Area<'_>, cell: &PlacedCell) {
        let line_style = Style::new().with_color(Color::Rgb(0, 0, 0));
        match cell.cell.borders {
            Borders::None => {}
            Borders::Bottom => area.draw_line(
                vec![
                    position(cell.x, cell.bottom()),
                    position(cell.right(), cell.bottom()),
                ],
                line_style,
            ),
            Borders::All => area.draw_line(
                vec![
                    position(cell.x, cell.y),
                    position(cell.right(), cell.y),
                    position(cell.right(), cell.bottom()),
                    position(cell.x, cell.bottom()),
                    position(cell.x, cell.y),
                ],
                line_style,
            ),
        }
    }

    fn paint_text(
        context: &genpdf::Context,
        area: &render::Area<'_>,
        cell: &PlacedCell,
    ) -> Result<(), Error> {
        if cell.text().is_empty() {
            return Ok(());
        }

        let mut style = Style::new();
        style.set_font_size(cell.font.size);
        if cell.font.bold {
            style.set_bold();
        }

        let string = StyledString::new(cell.text().to_owned(), style);
        let text_width = mm_to_f64(string.width(&context.font_cache));
        let line_height = mm_to_f64(style.line_height(&context.font_cache));

        let dx = match cell.cell.align {
            Align::Left => CELL_PADDING_MM,
            Align::Center => (cell.cell.width - text_width) / 2.0,
        };
        let dy = (cell.cell.height - line_height) / 2.0;

        let printed = area.print_str(
            &context.font_cache,
            position(cell.x + dx, cell.y + dy),
            style,
            cell.text(),
        )?;
        if !printed {
            debug!("text of cell at ({}, {}) fell outside the page", cell.x, cell.y);
        }
        Ok(())
    }
}

impl Element for SheetElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        for cell in self.sheet.cells() {
            if let Some(fill) = cell.cell.fill {
                Self::paint_fill(&area, cell, fill);
            }
            Self::paint_borders(&area, cell);
            Self::paint_text(context, &area, cell)?;
        }

        let geometry = self.sheet.geometry();
        let mut result = RenderResult::default();
        result.size = Size::new(mm_from_f64(geometry.width), mm_from_f64(geometry.height));
        Ok(result)
    }
}
