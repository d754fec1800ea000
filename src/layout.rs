//! Fixed-geometry layout of the form.
//!
//! [`FormWriter`] is the drawing cursor used while composing the page: it owns
//! the page geometry, the current position and the current font, and appends
//! cells left to right, top to bottom. The result is a [`Sheet`], an owned
//! display list that the element layer paints onto a PDF page. All measures
//! are millimetres from the top-left corner of the page.

/// Width of an A4 page.
pub const A4_WIDTH_MM: f64 = 210.0;
/// Height of an A4 page.
pub const A4_HEIGHT_MM: f64 = 297.0;
/// Inset of left-aligned text from the left cell edge.
pub const CELL_PADDING_MM: f64 = 1.0;

/// Page size and margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub left_margin: f64,
    pub top_margin: f64,
    pub right_margin: f64,
}

impl PageGeometry {
    /// A4 portrait with 10 mm margins.
    pub const fn a4() -> Self {
        Self {
            width: A4_WIDTH_MM,
            height: A4_HEIGHT_MM,
            left_margin: 10.0,
            top_margin: 10.0,
            right_margin: 10.0,
        }
    }

    /// Horizontal space between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.width - self.left_margin - self.right_margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Part of the form a cell belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Header,
    Metadata,
    Tasks,
    Materials,
    Staff,
    Footer,
}

/// Which cell edges are stroked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Borders {
    #[default]
    None,
    All,
    /// Only the bottom edge, used to underline a form value.
    Bottom,
}

/// Horizontal placement of the text inside its cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// An RGB fill color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Font size and weight of the text in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub size: u8,
    pub bold: bool,
}

impl FontSpec {
    pub const fn regular(size: u8) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: u8) -> Self {
        Self { size, bold: true }
    }
}

/// A cell as requested by the composer, before it is placed.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub borders: Borders,
    pub align: Align,
    pub fill: Option<Rgb>,
}

impl Cell {
    /// A borderless, left-aligned cell.
    pub fn new(width: f64, height: f64, text: impl Into<String>) -> Self {
        Self {
            width,
            height,
            text: text.into(),
            borders: Borders::None,
            align: Align::Left,
            fill: None,
        }
    }

    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<Option<Rgb>>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Shorthand for a fully bordered, centred cell.
    pub fn boxed(width: f64, height: f64, text: impl Into<String>) -> Self {
        Self::new(width, height, text)
            .with_borders(Borders::All)
            .with_align(Align::Center)
    }
}

/// A cell at its final page position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedCell {
    pub region: Region,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub cell: Cell,
}

impl PlacedCell {
    pub fn text(&self) -> &str {
        &self.cell.text
    }

    pub fn right(&self) -> f64 {
        self.x + self.cell.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.cell.height
    }
}

/// The composed page: geometry plus every placed cell in drawing order.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    geometry: PageGeometry,
    cells: Vec<PlacedCell>,
}

impl Sheet {
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn cells(&self) -> &[PlacedCell] {
        &self.cells
    }

    /// Iterates over the cells of one region in drawing order.
    pub fn cells_in(&self, region: Region) -> impl Iterator<Item = &PlacedCell> {
        self.cells.iter().filter(move |cell| cell.region == region)
    }

    /// Groups the cells of `region` into visual rows, top to bottom, each row left to right.
    pub fn rows(&self, region: Region) -> Vec<Vec<&PlacedCell>> {
        let mut rows: Vec<Vec<&PlacedCell>> = Vec::new();
        for cell in self.cells_in(region) {
            match rows.last_mut() {
                Some(row) if row[0].y == cell.y => row.push(cell),
                _ => rows.push(vec![cell]),
            }
        }
        rows
    }

    /// Returns the texts of each row of `region`.
    pub fn row_texts(&self, region: Region) -> Vec<Vec<&str>> {
        self.rows(region)
            .into_iter()
            .map(|row| row.into_iter().map(PlacedCell::text).collect())
            .collect()
    }
}

/// Cursor-driven writer that places cells on a single page.
#[derive(Debug)]
pub struct FormWriter {
    geometry: PageGeometry,
    x: f64,
    y: f64,
    line_height: f64,
    font: FontSpec,
    region: Region,
    cells: Vec<PlacedCell>,
}

impl FormWriter {
    /// Creates a writer with the cursor at the top-left margin corner.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            x: geometry.left_margin,
            y: geometry.top_margin,
            line_height: 0.0,
            font: FontSpec::regular(10),
            region: Region::Header,
            cells: Vec::new(),
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Current cursor position.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Sets the region attached to subsequently placed cells.
    pub fn begin(&mut self, region: Region) {
        self.region = region;
    }

    /// Sets the font used by subsequently placed cells.
    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    /// Places `cell` at the cursor and moves the cursor to its right edge.
    pub fn cell(&mut self, cell: Cell) {
        self.line_height = self.line_height.max(cell.height);
        let width = cell.width;
        self.cells.push(PlacedCell {
            region: self.region,
            x: self.x,
            y: self.y,
            font: self.font,
            cell,
        });
        self.x += width;
    }

    /// Places a borderless cell spanning from the cursor to the right margin.
    pub fn full_width_cell(&mut self, height: f64, text: impl Into<String>, align: Align) {
        let width = self.geometry.width - self.geometry.right_margin - self.x;
        self.cell(Cell::new(width, height, text).with_align(align));
    }

    /// Returns to the left margin below the tallest cell of the current line.
    pub fn end_line(&mut self) {
        self.x = self.geometry.left_margin;
        self.y += self.line_height;
        self.line_height = 0.0;
    }

    /// Adds vertical space below the current line.
    pub fn gap(&mut self, height: f64) {
        self.end_line();
        self.y += height;
    }

    /// Moves the cursor to the left margin at the given distance from the top edge.
    pub fn set_y(&mut self, y: f64) {
        self.x = self.geometry.left_margin;
        self.y = y;
        self.line_height = 0.0;
    }

    /// Consumes the writer and returns the composed sheet.
    pub fn finish(self) -> Sheet {
        Sheet {
            geometry: self.geometry,
            cells: self.cells,
        }
    }
}
