//! Job files: the TOML form a user fills in, and its conversion into a report.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use dg_report::catalog::{find_material, MATERIAL_CATALOG, TASK_ROW_COUNT};
use dg_report::model::{MaterialQuantities, ReportInput, StaffRecord, TaskRow};

const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Contents of a job file as written by the user.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub object_number: String,
    #[serde(default)]
    pub staff: StaffEntry,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
    #[serde(default)]
    pub materials: BTreeMap<String, u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaffEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default, rename = "break")]
    pub break_text: String,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskEntry {
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub gfta: bool,
    #[serde(default)]
    pub ont_gpon: bool,
    #[serde(default)]
    pub ont_xgs: bool,
    #[serde(default)]
    pub patch_ont: bool,
}

impl From<TaskEntry> for TaskRow {
    fn from(entry: TaskEntry) -> Self {
        TaskRow::new(entry.room)
            .with_gfta(entry.gfta)
            .with_ont_gpon(entry.ont_gpon)
            .with_ont_xgs(entry.ont_xgs)
            .with_patch_ont(entry.patch_ont)
    }
}

/// Reads and parses the job file at `path`.
pub fn load(path: &Path) -> Result<JobFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file {}", path.display()))?;
    parse(&text).with_context(|| format!("Failed to parse job file {}", path.display()))
}

/// Parses job file contents.
pub fn parse(text: &str) -> Result<JobFile> {
    Ok(toml::from_str(text)?)
}

/// Assembles the complete report for `job`, using `today` when no date is given.
///
/// The task list is padded with blank rows up to the form's fixed row count.
pub fn assemble(job: JobFile, today: NaiveDate) -> Result<ReportInput> {
    if job.tasks.len() > TASK_ROW_COUNT {
        bail!(
            "The form has room for {} task rows, but the job file lists {}",
            TASK_ROW_COUNT,
            job.tasks.len()
        );
    }

    let mut quantities = MaterialQuantities::new();
    for (name, count) in job.materials {
        if find_material(&name).is_none() {
            let known = MATERIAL_CATALOG
                .iter()
                .map(|entry| entry.name)
                .collect::<Vec<_>>()
                .join(", ");
            bail!("Unknown material '{}'. Known materials: {}", name, known);
        }
        quantities.set(name, count);
    }

    let date = match job.date.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .with_context(|| format!("Invalid date '{}', expected DD.MM.YYYY", text))?,
        _ => today,
    };

    let staff = StaffRecord::new(job.staff.name)
        .with_start(normalize_time("staff.start", job.staff.start)?)
        .with_break_text(job.staff.break_text)
        .with_end(normalize_time("staff.end", job.staff.end)?);

    let mut tasks: [TaskRow; TASK_ROW_COUNT] = Default::default();
    for (slot, entry) in tasks.iter_mut().zip(job.tasks) {
        *slot = entry.into();
    }

    Ok(ReportInput::new(
        date.format(DATE_FORMAT).to_string(),
        job.address,
        job.object_number,
    )
    .with_tasks(tasks)
    .with_material_quantities(quantities)
    .with_staff(staff))
}

fn normalize_time(field: &str, value: Option<String>) -> Result<String> {
    let Some(value) = value else {
        return Ok(String::new());
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    let time = NaiveTime::parse_from_str(value, TIME_FORMAT)
        .with_context(|| format!("Invalid time '{}' for {}, expected HH:MM", value, field))?;
    Ok(time.format(TIME_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 24).unwrap()
    }

    const EXAMPLE: &str = r#"
date = "24.05.2024"
address = "Hauptstraße 12"
object_number = "87654"

[staff]
name = "Anna Beck"
start = "7:30"
break = "30"
end = "16:00"

[[tasks]]
room = "WE 01"
gfta = true

[[tasks]]
room = "WE 02"
patch_ont = true

[materials]
"Plombe" = 3
"#;

    #[test]
    fn example_job_assembles() {
        let report = assemble(parse(EXAMPLE).unwrap(), today()).unwrap();
        assert_eq!(report.date(), "24.05.2024");
        assert_eq!(report.address(), "Hauptstraße 12");
        assert_eq!(report.object_number(), "87654");
        assert_eq!(report.staff().start(), "07:30");
        assert_eq!(report.staff().break_text(), "30");
        assert_eq!(report.staff().end(), "16:00");
        assert_eq!(report.material_quantities().get("Plombe"), 3);

        let tasks = report.tasks();
        assert_eq!(tasks[0].room_label(), "WE 01");
        assert_eq!(tasks[0].flags(), [true, false, false, false]);
        assert_eq!(tasks[1].flags(), [false, false, false, true]);
        assert!(tasks[2..].iter().all(TaskRow::is_blank));
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let report = assemble(JobFile::default(), today()).unwrap();
        assert_eq!(report.date(), "24.05.2024");
        assert_eq!(report.staff().start(), "");
        assert_eq!(report.staff().end(), "");
    }

    #[test]
    fn dates_are_zero_padded() {
        let job = JobFile {
            date: Some("1.2.2024".to_string()),
            ..JobFile::default()
        };
        assert_eq!(assemble(job, today()).unwrap().date(), "01.02.2024");
    }

    #[test]
    fn invalid_date_is_rejected() {
        let job = JobFile {
            date: Some("2024-05-24".to_string()),
            ..JobFile::default()
        };
        let err = assemble(job, today()).unwrap_err();
        assert!(err.to_string().contains("2024-05-24"));
    }

    #[test]
    fn too_many_tasks_are_rejected() {
        let job = JobFile {
            tasks: (0..13).map(|_| TaskEntry::default()).collect(),
            ..JobFile::default()
        };
        let err = assemble(job, today()).unwrap_err();
        assert!(err.to_string().contains("13"));
    }

    #[test]
    fn unknown_material_is_rejected() {
        let job = parse("[materials]\n\"Kabelbinder\" = 4\n").unwrap();
        let err = assemble(job, today()).unwrap_err();
        assert!(err.to_string().contains("Unknown material 'Kabelbinder'"));
    }

    #[test]
    fn negative_quantity_fails_to_parse() {
        assert!(parse("[materials]\n\"Plombe\" = -1\n").is_err());
    }

    #[test]
    fn invalid_time_is_rejected() {
        let job = parse("[staff]\nname = \"A\"\nstart = \"halb acht\"\n").unwrap();
        let err = assemble(job, today()).unwrap_err();
        assert!(err.to_string().contains("staff.start"));
    }

    #[test]
    fn blank_time_stays_blank() {
        let job = parse("[staff]\nstart = \"  \"\n").unwrap();
        assert_eq!(assemble(job, today()).unwrap().staff().start(), "");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("adress = \"typo\"\n").is_err());
    }
}
