//! Static content of the paper form: the material catalog and the task table columns.

/// One line of the material table printed on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialCatalogEntry {
    /// Material name as printed in the `Material` column.
    pub name: &'static str,
    /// Unit printed in the `Masse` column.
    pub unit: &'static str,
}

impl MaterialCatalogEntry {
    const fn new(name: &'static str, unit: &'static str) -> Self {
        Self { name, unit }
    }
}

/// Number of material lines on the form.
pub const MATERIAL_COUNT: usize = 12;

/// The materials in form order. This order is the row order of the rendered table.
pub const MATERIAL_CATALOG: [MaterialCatalogEntry; MATERIAL_COUNT] = [
    MaterialCatalogEntry::new("FTTP 4 faser kabel", "m"),
    MaterialCatalogEntry::new("MultiHüp", "st."),
    MaterialCatalogEntry::new("Hüp", "st."),
    MaterialCatalogEntry::new("T-stücke", "st."),
    MaterialCatalogEntry::new("Instalacionsrohr", "m"),
    MaterialCatalogEntry::new("Muffe M 20", "st."),
    MaterialCatalogEntry::new("Quick Schellen M 20", "st."),
    MaterialCatalogEntry::new("Schutzrohr", "m"),
    MaterialCatalogEntry::new("Metalikanal 30x30", "m"),
    MaterialCatalogEntry::new("Plastik kanal 15x15", "m"),
    MaterialCatalogEntry::new("Plombe", "st."),
    MaterialCatalogEntry::new("Serveschrank", "st."),
];

/// Looks up a catalog entry by its exact name.
pub fn find_material(name: &str) -> Option<(usize, &'static MaterialCatalogEntry)> {
    MATERIAL_CATALOG
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.name == name)
}

/// Number of task rows on the form.
pub const TASK_ROW_COUNT: usize = 12;

/// Column captions of the task table, left to right.
pub const TASK_COLUMNS: [&str; 6] = ["Nr", "Wohnung", "Gfta", "Ont gpon", "Ont xgs", "Patch Ont"];

/// Marker printed into a checked task column.
pub const TASK_MARKER: &str = "X";
