use std::collections::HashMap;

use crate::record::DatasetRecord;

/// Case-insensitive lookup of dataset records by ISO code or name.
///
/// ISO codes are keyed uppercase, names lowercase; a record is reachable
/// through each identifier it carries. On key collisions the later record
/// wins.
#[derive(Debug, Default, Clone)]
pub struct DatasetIndex {
    records: Vec<DatasetRecord>,
    by_key: HashMap<String, usize>,
}

impl DatasetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(records: impl IntoIterator<Item = DatasetRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    fn insert(&mut self, record: DatasetRecord) {
        let slot = self.records.len();
        let keys = [
            code_key(record.iso_code2.as_deref()),
            code_key(record.iso_code3.as_deref()),
            name_key(record.name.as_deref()),
        ];
        for key in keys.into_iter().flatten() {
            let Some(prev) = self.by_key.insert(key.clone(), slot) else {
                continue;
            };
            // A record repeating its own identifier (iso2 == iso3) is not a collision.
            if let Some(replaced) = self.records.get(prev) {
                tracing::debug!(
                    key = %key,
                    replaced = replaced.label(),
                    by = record.label(),
                    "dataset key collision; later record wins"
                );
            }
        }
        self.records.push(record);
    }

    /// Resolves by ISO code first, then by name.
    ///
    /// `None` means "no data", which is distinct from a record whose numeric
    /// fields happen to be zero.
    pub fn lookup(&self, code: Option<&str>, name: Option<&str>) -> Option<&DatasetRecord> {
        let found = code_key(code)
            .and_then(|k| self.by_key.get(&k))
            .or_else(|| name_key(name).and_then(|k| self.by_key.get(&k)))
            .and_then(|slot| self.records.get(*slot));

        if found.is_none() {
            tracing::debug!(code = ?code, name = ?name, "no dataset record");
        }
        found
    }

    /// Number of records loaded, including ones fully shadowed by collisions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }
}

fn code_key(code: Option<&str>) -> Option<String> {
    let code = code?.trim();
    (!code.is_empty()).then(|| code.to_uppercase())
}

fn name_key(name: Option<&str>) -> Option<String> {
    let name = name?.trim();
    (!name.is_empty()).then(|| name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::DatasetIndex;
    use crate::record::DatasetRecord;

    fn us() -> DatasetRecord {
        DatasetRecord {
            iso_code2: Some("US".to_string()),
            iso_code3: Some("USA".to_string()),
            name: Some("United States".to_string()),
            total_net_migration: Some(1_000_000.0),
            ..DatasetRecord::default()
        }
    }

    #[test]
    fn code_and_name_resolve_to_the_same_record() {
        let index = DatasetIndex::build(vec![us()]);
        let by_code = index.lookup(Some("us"), None).expect("by code");
        let by_name = index.lookup(None, Some("United States")).expect("by name");
        assert!(std::ptr::eq(by_code, by_name));
        assert!(std::ptr::eq(by_code, index.lookup(Some("usa"), None).expect("iso3")));
        assert_eq!(index.key_count(), 3);
    }

    #[test]
    fn falls_back_to_name_when_code_misses() {
        let index = DatasetIndex::build(vec![us()]);
        let hit = index.lookup(Some("ZZ"), Some("UNITED STATES")).expect("name fallback");
        assert_eq!(hit.iso_code2.as_deref(), Some("US"));
    }

    #[test]
    fn misses_and_empty_index_return_none() {
        assert!(DatasetIndex::new().lookup(Some("US"), Some("United States")).is_none());
        let index = DatasetIndex::build(vec![us()]);
        assert!(index.lookup(None, None).is_none());
        assert!(index.lookup(Some("  "), Some("Atlantis")).is_none());
    }

    #[test]
    fn missing_identifiers_add_no_keys() {
        let records = vec![DatasetRecord::named("Chile"), DatasetRecord::default()];
        let index = DatasetIndex::build(records);
        assert_eq!(index.len(), 2);
        assert_eq!(index.key_count(), 1);
    }

    #[test]
    fn later_records_win_on_collision() {
        let mut second = DatasetRecord::named("Georgia");
        second.total_net_migration = Some(2.0);
        let mut first = DatasetRecord::named("georgia");
        first.total_net_migration = Some(1.0);
        let index = DatasetIndex::build(vec![first, second]);
        let hit = index.lookup(None, Some("GEORGIA")).expect("hit");
        assert_eq!(hit.total_net_migration, Some(2.0));
    }
}
