//! Composition of the daily work report form.
//!
//! The page is written in one explicit pass: page header, the four body
//! blocks in form order, then the page footer. The geometry below reproduces
//! the paper form; the gaps between blocks are sized so the staff table ends
//! above the footer line.

use log::warn;

use crate::catalog::{find_material, MATERIAL_CATALOG, TASK_COLUMNS, TASK_MARKER};
use crate::layout::{Align, Borders, Cell, FontSpec, FormWriter, PageGeometry, Region, Rgb, Sheet};
use crate::model::{ReportInput, StaffRecord, TaskRow};

/// First title line of the page header.
pub const ORGANISATION_TITLE: &str = "Deutsche Glasfaser";
/// Second title line of the page header; also used as the PDF document title.
pub const REPORT_TITLE: &str = "Tagesarbeitsbericht";
/// Label printed in the page footer.
pub const FOOTER_LABEL: &str = "FIBERGROUND";

const HEADER_LINE_HEIGHT: f64 = 10.0;
const HEADER_GAP: f64 = 3.0;

const META_ROW_HEIGHT: f64 = 8.0;
const META_ROW_GAP: f64 = 2.0;
const META_LABEL_WIDTH: f64 = 30.0;
const META_DATE_WIDTH: f64 = 60.0;
const META_OBJECT_LABEL_WIDTH: f64 = 35.0;
const META_OBJECT_WIDTH: f64 = 60.0;
const META_ADDRESS_WIDTH: f64 = 155.0;

const BLOCK_GAP: f64 = 6.0;

const TASK_WIDTHS: [f64; 6] = [10.0, 40.0, 25.0, 35.0, 35.0, 35.0];
const TASK_HEADER_HEIGHT: f64 = 8.0;
const TASK_ROW_HEIGHT: f64 = 7.0;

const MATERIAL_CAPTION: &str = "Material";
const MATERIAL_CAPTION_HEIGHT: f64 = 8.0;
const MATERIAL_COLUMNS: [(&str, f64, Align); 4] = [
    ("Nr", 10.0, Align::Center),
    ("Material", 100.0, Align::Left),
    ("Masse", 30.0, Align::Center),
    ("Anzahl", 30.0, Align::Center),
];
const MATERIAL_ROW_HEIGHT: f64 = 7.0;

const STAFF_COLUMNS: [(&str, f64); 4] = [
    ("Mietarbeiter", 60.0),
    ("Beginn", 30.0),
    ("Pause", 30.0),
    ("Ende", 30.0),
];
const STAFF_HEADER_HEIGHT: f64 = 7.0;
const STAFF_ROW_HEIGHT: f64 = 8.0;

const FOOTER_OFFSET_FROM_BOTTOM: f64 = 20.0;
const FOOTER_HEIGHT: f64 = 10.0;

const HEADER_SHADE: Rgb = Rgb(240, 240, 240);

/// Lays out the whole form for `input` on an A4 page.
pub fn compose(input: &ReportInput) -> Sheet {
    let mut writer = FormWriter::new(PageGeometry::a4());
    write_page_header(&mut writer);
    write_metadata(&mut writer, input);
    write_tasks(&mut writer, input.tasks());
    write_materials(&mut writer, input);
    write_staff(&mut writer, input.staff());
    write_page_footer(&mut writer);
    writer.finish()
}

/// Distance from the top edge at which the footer line starts.
pub fn footer_top(geometry: &PageGeometry) -> f64 {
    geometry.height - FOOTER_OFFSET_FROM_BOTTOM
}

fn write_page_header(writer: &mut FormWriter) {
    writer.begin(Region::Header);
    writer.set_font(FontSpec::bold(16));
    writer.full_width_cell(HEADER_LINE_HEIGHT, ORGANISATION_TITLE, Align::Left);
    writer.end_line();
    writer.set_font(FontSpec::bold(14));
    writer.full_width_cell(HEADER_LINE_HEIGHT, REPORT_TITLE, Align::Left);
    writer.gap(HEADER_GAP);
}

fn write_metadata(writer: &mut FormWriter, input: &ReportInput) {
    writer.begin(Region::Metadata);
    writer.set_font(FontSpec::regular(10));

    writer.cell(Cell::new(META_LABEL_WIDTH, META_ROW_HEIGHT, "Datum:"));
    writer.cell(underlined(META_DATE_WIDTH, input.date()));
    writer.cell(Cell::new(META_OBJECT_LABEL_WIDTH, META_ROW_HEIGHT, "Obiekt Nummer:"));
    writer.cell(underlined(META_OBJECT_WIDTH, input.object_number()));
    writer.gap(META_ROW_GAP);

    writer.cell(Cell::new(META_LABEL_WIDTH, META_ROW_HEIGHT, "Adresse:"));
    writer.cell(underlined(META_ADDRESS_WIDTH, input.address()));
    writer.gap(BLOCK_GAP);
}

fn underlined(width: f64, text: &str) -> Cell {
    Cell::new(width, META_ROW_HEIGHT, text).with_borders(Borders::Bottom)
}

fn write_tasks(writer: &mut FormWriter, tasks: &[TaskRow]) {
    writer.begin(Region::Tasks);
    writer.set_font(FontSpec::bold(9));
    for (caption, width) in TASK_COLUMNS.iter().zip(TASK_WIDTHS) {
        writer.cell(Cell::boxed(width, TASK_HEADER_HEIGHT, *caption));
    }
    writer.end_line();

    writer.set_font(FontSpec::regular(9));
    for (index, task) in tasks.iter().enumerate() {
        writer.cell(Cell::boxed(TASK_WIDTHS[0], TASK_ROW_HEIGHT, (index + 1).to_string()));
        writer.cell(Cell::boxed(TASK_WIDTHS[1], TASK_ROW_HEIGHT, task.room_label()));
        for (done, width) in task.flags().into_iter().zip(&TASK_WIDTHS[2..]) {
            let marker = if done { TASK_MARKER } else { "" };
            writer.cell(Cell::boxed(*width, TASK_ROW_HEIGHT, marker));
        }
        writer.end_line();
    }
    writer.gap(BLOCK_GAP);
}

fn write_materials(writer: &mut FormWriter, input: &ReportInput) {
    let quantities = input.material_quantities();
    for (name, _) in quantities.iter() {
        if find_material(name).is_none() {
            warn!("ignoring quantity for unknown material '{}'", name);
        }
    }

    writer.begin(Region::Materials);
    writer.set_font(FontSpec::bold(10));
    writer.full_width_cell(MATERIAL_CAPTION_HEIGHT, MATERIAL_CAPTION, Align::Left);
    writer.end_line();

    for (caption, width, align) in MATERIAL_COLUMNS {
        writer.cell(
            Cell::new(width, MATERIAL_ROW_HEIGHT, caption)
                .with_borders(Borders::All)
                .with_align(align)
                .with_fill(HEADER_SHADE),
        );
    }
    writer.end_line();

    writer.set_font(FontSpec::regular(10));
    for (index, entry) in MATERIAL_CATALOG.iter().enumerate() {
        let quantity = match quantities.get(entry.name) {
            0 => String::new(),
            count => count.to_string(),
        };
        let texts = [
            (index + 1).to_string(),
            entry.name.to_string(),
            entry.unit.to_string(),
            quantity,
        ];
        for (text, (_, width, align)) in texts.into_iter().zip(MATERIAL_COLUMNS) {
            writer.cell(
                Cell::new(width, MATERIAL_ROW_HEIGHT, text)
                    .with_borders(Borders::All)
                    .with_align(align),
            );
        }
        writer.end_line();
    }
    writer.gap(BLOCK_GAP);
}

fn write_staff(writer: &mut FormWriter, staff: &StaffRecord) {
    writer.begin(Region::Staff);
    writer.set_font(FontSpec::bold(10));
    for (caption, width) in STAFF_COLUMNS {
        writer.cell(Cell::boxed(width, STAFF_HEADER_HEIGHT, caption).with_fill(HEADER_SHADE));
    }
    writer.end_line();

    writer.set_font(FontSpec::regular(10));
    let values = [staff.name(), staff.start(), staff.break_text(), staff.end()];
    for (value, (_, width)) in values.into_iter().zip(STAFF_COLUMNS) {
        writer.cell(Cell::boxed(width, STAFF_ROW_HEIGHT, value));
    }
    writer.end_line();
}

fn write_page_footer(writer: &mut FormWriter) {
    writer.begin(Region::Footer);
    let top = footer_top(&writer.geometry());
    writer.set_y(top);
    writer.set_font(FontSpec::bold(12));
    writer.full_width_cell(FOOTER_HEIGHT, FOOTER_LABEL, Align::Center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MATERIAL_COUNT, TASK_ROW_COUNT};
    use crate::model::MaterialQuantities;

    fn example_input() -> ReportInput {
        ReportInput::new("24.05.2024", "Hauptstraße 12", "87654")
            .with_quantity("Plombe", 3)
            .with_staff(
                StaffRecord::new("Anna Beck")
                    .with_start("07:30")
                    .with_break_text("30")
                    .with_end("16:00"),
            )
    }

    #[test]
    fn worked_example() {
        let sheet = compose(&example_input());

        let metadata = sheet.row_texts(Region::Metadata);
        assert_eq!(
            metadata,
            vec![
                vec!["Datum:", "24.05.2024", "Obiekt Nummer:", "87654"],
                vec!["Adresse:", "Hauptstraße 12"],
            ]
        );

        let tasks = sheet.row_texts(Region::Tasks);
        assert_eq!(tasks.len(), 1 + TASK_ROW_COUNT);
        for (index, row) in tasks[1..].iter().enumerate() {
            let number = (index + 1).to_string();
            assert_eq!(row, &vec![number.as_str(), "", "", "", "", ""]);
        }

        let materials = sheet.row_texts(Region::Materials);
        for row in &materials[2..] {
            let expected = if row[1] == "Plombe" { "3" } else { "" };
            assert_eq!(row[3], expected, "quantity of {}", row[1]);
        }

        let staff = sheet.row_texts(Region::Staff);
        assert_eq!(staff[1], vec!["Anna Beck", "07:30", "30", "16:00"]);
    }

    #[test]
    fn task_header_matches_form() {
        let sheet = compose(&ReportInput::default());
        assert_eq!(sheet.row_texts(Region::Tasks)[0], TASK_COLUMNS.to_vec());
        let width: f64 = sheet.rows(Region::Tasks)[0]
            .iter()
            .map(|cell| cell.cell.width)
            .sum();
        assert!(width <= PageGeometry::a4().content_width());
    }

    #[test]
    fn task_rows_keep_input_order() {
        let mut input = ReportInput::default();
        for index in 0..TASK_ROW_COUNT {
            input = input.with_task(index, TaskRow::new(format!("WE {:02}", 12 - index)));
        }
        let sheet = compose(&input);
        let labels: Vec<String> = sheet.row_texts(Region::Tasks)[1..]
            .iter()
            .map(|row| row[1].to_string())
            .collect();
        let expected: Vec<String> = (0..TASK_ROW_COUNT)
            .map(|index| format!("WE {:02}", 12 - index))
            .collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn single_flag_yields_single_marker() {
        let input = ReportInput::default().with_task(2, TaskRow::new("").with_gfta(true));
        let sheet = compose(&input);
        let tasks = sheet.row_texts(Region::Tasks);
        assert_eq!(tasks[3][2..], [TASK_MARKER, "", "", ""]);
        let markers = tasks[1..]
            .iter()
            .flat_map(|row| row[2..].iter())
            .filter(|text| **text == TASK_MARKER)
            .count();
        assert_eq!(markers, 1);
    }

    #[test]
    fn all_flags_render_in_their_columns() {
        let row = TaskRow::new("1A")
            .with_gfta(true)
            .with_ont_gpon(false)
            .with_ont_xgs(true)
            .with_patch_ont(true);
        let sheet = compose(&ReportInput::default().with_task(0, row));
        assert_eq!(
            sheet.row_texts(Region::Tasks)[1],
            vec!["1", "1A", "X", "", "X", "X"]
        );
    }

    #[test]
    fn materials_follow_catalog_order() {
        let quantities: MaterialQuantities = MATERIAL_CATALOG
            .iter()
            .rev()
            .enumerate()
            .map(|(index, entry)| (entry.name, index as u32))
            .collect();
        let sheet = compose(&ReportInput::default().with_material_quantities(quantities));
        let materials = sheet.row_texts(Region::Materials);

        assert_eq!(materials[0], vec![MATERIAL_CAPTION]);
        assert_eq!(materials[1], vec!["Nr", "Material", "Masse", "Anzahl"]);
        assert_eq!(materials.len(), 2 + MATERIAL_COUNT);
        for (index, (row, entry)) in materials[2..].iter().zip(MATERIAL_CATALOG).enumerate() {
            let number = (index + 1).to_string();
            let count = MATERIAL_COUNT - 1 - index;
            let quantity = if count == 0 { String::new() } else { count.to_string() };
            assert_eq!(
                row,
                &vec![number.as_str(), entry.name, entry.unit, quantity.as_str()]
            );
        }
    }

    #[test]
    fn unknown_materials_are_ignored() {
        let sheet = compose(&ReportInput::default().with_quantity("Kabelbinder", 7));
        let materials = sheet.row_texts(Region::Materials);
        assert_eq!(materials.len(), 2 + MATERIAL_COUNT);
        assert!(materials[2..].iter().all(|row| row[3].is_empty()));
    }

    #[test]
    fn missing_times_render_blank() {
        let input = ReportInput::default()
            .with_staff(StaffRecord::new("Jan Nowak").with_break_text("0"));
        let sheet = compose(&input);
        assert_eq!(
            sheet.row_texts(Region::Staff)[1],
            vec!["Jan Nowak", "", "0", ""]
        );
    }

    #[test]
    fn values_are_underlined_and_labels_bare() {
        let sheet = compose(&example_input());
        let borders: Vec<Borders> = sheet
            .cells_in(Region::Metadata)
            .map(|cell| cell.cell.borders)
            .collect();
        assert_eq!(
            borders,
            vec![
                Borders::None,
                Borders::Bottom,
                Borders::None,
                Borders::Bottom,
                Borders::None,
                Borders::Bottom,
            ]
        );
    }

    #[test]
    fn table_headers_are_shaded() {
        let sheet = compose(&ReportInput::default());
        let materials = sheet.rows(Region::Materials);
        assert!(materials[1].iter().all(|cell| cell.cell.fill == Some(HEADER_SHADE)));
        assert!(materials[2].iter().all(|cell| cell.cell.fill.is_none()));
        let staff = sheet.rows(Region::Staff);
        assert!(staff[0].iter().all(|cell| cell.cell.fill == Some(HEADER_SHADE)));
        assert!(staff[0].iter().all(|cell| cell.font.bold));
        assert!(staff[1].iter().all(|cell| !cell.font.bold));
    }

    #[test]
    fn form_fits_on_one_page_above_footer() {
        let sheet = compose(&example_input());
        let geometry = sheet.geometry();
        let footer = footer_top(&geometry);

        for cell in sheet.cells() {
            assert!(cell.x >= 0.0 && cell.right() <= geometry.width, "{cell:?}");
            assert!(cell.y >= 0.0 && cell.bottom() <= geometry.height, "{cell:?}");
            if cell.region != Region::Footer {
                assert!(cell.bottom() <= footer, "{cell:?} overlaps the footer");
            }
        }

        let footer_cells: Vec<_> = sheet.cells_in(Region::Footer).collect();
        assert_eq!(footer_cells.len(), 1);
        assert_eq!(footer_cells[0].text(), FOOTER_LABEL);
        assert_eq!(footer_cells[0].cell.align, Align::Center);
        assert_eq!(footer_cells[0].y, footer);
    }

    #[test]
    fn regions_follow_form_order() {
        let sheet = compose(&example_input());
        let order = [
            Region::Header,
            Region::Metadata,
            Region::Tasks,
            Region::Materials,
            Region::Staff,
            Region::Footer,
        ];
        for pair in order.windows(2) {
            let last_of_first = sheet
                .cells_in(pair[0])
                .map(|cell| cell.bottom())
                .fold(f64::MIN, f64::max);
            let first_of_second = sheet
                .cells_in(pair[1])
                .map(|cell| cell.y)
                .fold(f64::MAX, f64::min);
            assert!(last_of_first <= first_of_second, "{:?} before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn composition_is_deterministic() {
        assert_eq!(compose(&example_input()), compose(&example_input()));
    }
}
