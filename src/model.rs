//! Data structures describing one filled-in report form.
//!
//! The types mirror the paper form field by field. They carry no rendering
//! types so a front end can assemble them without touching `genpdf`. The
//! renderer never defaults anything except a missing material quantity,
//! which reads as zero.

use std::collections::BTreeMap;

use crate::catalog::TASK_ROW_COUNT;

/// One line of the task checklist: a dwelling and the four installation steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskRow {
    room_label: String,
    gfta: bool,
    ont_gpon: bool,
    ont_xgs: bool,
    patch_ont: bool,
}

impl TaskRow {
    /// Creates a row for the given dwelling with all steps unchecked.
    pub fn new(room_label: impl Into<String>) -> Self {
        Self {
            room_label: room_label.into(),
            ..Self::default()
        }
    }

    /// Returns the dwelling label, possibly empty.
    pub fn room_label(&self) -> &str {
        &self.room_label
    }

    /// Returns the four step flags in column order: Gfta, Ont gpon, Ont xgs, Patch Ont.
    pub fn flags(&self) -> [bool; 4] {
        [self.gfta, self.ont_gpon, self.ont_xgs, self.patch_ont]
    }

    /// Returns whether the row carries neither a label nor a checked step.
    pub fn is_blank(&self) -> bool {
        self.room_label.is_empty() && !self.flags().contains(&true)
    }

    /// Sets the Gfta flag and returns the updated row.
    pub fn with_gfta(mut self, done: bool) -> Self {
        self.gfta = done;
        self
    }

    /// Sets the Ont gpon flag and returns the updated row.
    pub fn with_ont_gpon(mut self, done: bool) -> Self {
        self.ont_gpon = done;
        self
    }

    /// Sets the Ont xgs flag and returns the updated row.
    pub fn with_ont_xgs(mut self, done: bool) -> Self {
        self.ont_xgs = done;
        self
    }

    /// Sets the Patch Ont flag and returns the updated row.
    pub fn with_patch_ont(mut self, done: bool) -> Self {
        self.patch_ont = done;
        self
    }
}

/// Material counts keyed by catalog name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterialQuantities {
    counts: BTreeMap<String, u32>,
}

impl MaterialQuantities {
    /// Creates an empty set of quantities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count recorded for `name`, or zero.
    pub fn get(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Records the count for `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, count: u32) {
        self.counts.insert(name.into(), count);
    }

    /// Iterates over all recorded entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for MaterialQuantities {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut quantities = Self::new();
        for (name, count) in iter {
            quantities.set(name, count);
        }
        quantities
    }
}

/// The single staff member and working hours entered on the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaffRecord {
    name: String,
    start: String,
    break_text: String,
    end: String,
}

impl StaffRecord {
    /// Creates a record for the named staff member with no times filled in.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the staff member's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the start time (`HH:MM`) or an empty string.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the break as free text.
    pub fn break_text(&self) -> &str {
        &self.break_text
    }

    /// Returns the end time (`HH:MM`) or an empty string.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Sets the start time and returns the updated record.
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    /// Sets the break text and returns the updated record.
    pub fn with_break_text(mut self, break_text: impl Into<String>) -> Self {
        self.break_text = break_text.into();
        self
    }

    /// Sets the end time and returns the updated record.
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }
}

/// A fully assembled report form, the sole input of the renderer.
///
/// The task list is a fixed-size array, so a report always carries exactly
/// [`TASK_ROW_COUNT`] rows; blank rows are rendered like any other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportInput {
    date: String,
    address: String,
    object_number: String,
    tasks: [TaskRow; TASK_ROW_COUNT],
    material_quantities: MaterialQuantities,
    staff: StaffRecord,
}

impl ReportInput {
    /// Creates a report with blank tasks, no materials and an unnamed staff record.
    pub fn new(
        date: impl Into<String>,
        address: impl Into<String>,
        object_number: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            address: address.into(),
            object_number: object_number.into(),
            ..Self::default()
        }
    }

    /// Returns the report date as entered (`DD.MM.YYYY`).
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the site address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the object number.
    pub fn object_number(&self) -> &str {
        &self.object_number
    }

    /// Returns the task rows in form order.
    pub fn tasks(&self) -> &[TaskRow; TASK_ROW_COUNT] {
        &self.tasks
    }

    /// Returns the recorded material quantities.
    pub fn material_quantities(&self) -> &MaterialQuantities {
        &self.material_quantities
    }

    /// Returns the staff record.
    pub fn staff(&self) -> &StaffRecord {
        &self.staff
    }

    /// Replaces all task rows and returns the updated report.
    pub fn with_tasks(mut self, tasks: [TaskRow; TASK_ROW_COUNT]) -> Self {
        self.tasks = tasks;
        self
    }

    /// Replaces the task row at `index` (0-based) and returns the updated report.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`TASK_ROW_COUNT`].
    pub fn with_task(mut self, index: usize, task: TaskRow) -> Self {
        self.tasks[index] = task;
        self
    }

    /// Replaces the material quantities and returns the updated report.
    pub fn with_material_quantities(mut self, quantities: MaterialQuantities) -> Self {
        self.material_quantities = quantities;
        self
    }

    /// Records a single material quantity and returns the updated report.
    pub fn with_quantity(mut self, name: impl Into<String>, count: u32) -> Self {
        self.material_quantities.set(name, count);
        self
    }

    /// Replaces the staff record and returns the updated report.
    pub fn with_staff(mut self, staff: StaffRecord) -> Self {
        self.staff = staff;
        self
    }
}
