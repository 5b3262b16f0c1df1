use serde::Serialize;

/// One row of the migration dataset.
///
/// Every field is optional: the source is a loosely-typed spreadsheet export
/// and a value that does not parse is stored as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DatasetRecord {
    pub iso_code2: Option<String>,
    pub iso_code3: Option<String>,
    pub name: Option<String>,
    pub total_net_migration: Option<f64>,
    pub percent_change: Option<f64>,
    pub migration_trend: Option<String>,
    pub population: Option<f64>,
}

impl DatasetRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Short human label for logs: name, then ISO-3, then ISO-2.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.iso_code3.as_deref())
            .or(self.iso_code2.as_deref())
            .unwrap_or("<unnamed>")
    }
}
