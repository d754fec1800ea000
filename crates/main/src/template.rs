//! Sample job file printed by `dg-report template`.

use std::fmt::Write as _;

use dg_report::catalog::{MATERIAL_CATALOG, TASK_ROW_COUNT};

/// Returns a commented job file listing every field and material of the form.
pub fn sample_job() -> String {
    let mut text = String::new();
    text.push_str("# Tagesarbeitsbericht job file\n");
    text.push_str("# date = \"24.05.2024\"      # DD.MM.YYYY, defaults to today\n");
    text.push_str("address = \"\"\n");
    text.push_str("object_number = \"\"\n\n");

    text.push_str("[staff]\n");
    text.push_str("name = \"\"\n");
    text.push_str("start = \"\"                 # HH:MM\n");
    text.push_str("break = \"\"\n");
    text.push_str("end = \"\"                   # HH:MM\n\n");

    let _ = writeln!(text, "# Up to {} rows; missing rows print blank.", TASK_ROW_COUNT);
    text.push_str("[[tasks]]\n");
    text.push_str("room = \"\"\n");
    text.push_str("gfta = false\n");
    text.push_str("ont_gpon = false\n");
    text.push_str("ont_xgs = false\n");
    text.push_str("patch_ont = false\n\n");

    text.push_str("[materials]\n");
    for entry in MATERIAL_CATALOG {
        let _ = writeln!(text, "{:<24} = 0    # {}", format!("\"{}\"", entry.name), entry.unit);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job;

    #[test]
    fn sample_job_round_trips_through_the_collector() {
        let parsed = job::parse(&sample_job()).expect("sample job parses");
        assert_eq!(parsed.materials.len(), MATERIAL_CATALOG.len());
        assert_eq!(parsed.tasks.len(), 1);

        let today = chrono::NaiveDate::from_ymd_opt(2024, 5, 24).unwrap();
        let report = job::assemble(parsed, today).expect("sample job assembles");
        assert!(MATERIAL_CATALOG
            .iter()
            .all(|entry| report.material_quantities().get(entry.name) == 0));
    }
}
