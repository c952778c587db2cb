//! In-memory record list
//!
//! Newest first. No deduplication: a freshly submitted record and the
//! same record from a later bulk load may coexist until the next reload.

use chrono::NaiveDate;
use shared::HarvestRecord;

use crate::error::ClientResult;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<HarvestRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a freshly submitted record at the front
    pub fn prepend(&mut self, record: HarvestRecord) {
        self.records.insert(0, record);
    }

    /// Replace everything with a bulk load, keeping its order
    pub fn replace_all(&mut self, records: Vec<HarvestRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HarvestRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[HarvestRecord] {
        &self.records
    }

    /// First record with the given id
    pub fn get(&self, id: &str) -> Option<&HarvestRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Pretty-printed camelCase JSON of the whole list
    pub fn export_json(&self) -> ClientResult<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Download name for an export taken on `date`
    pub fn export_file_name(date: NaiveDate) -> String {
        format!("agridatum-records-{}.json", date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> HarvestRecord {
        HarvestRecord {
            id: id.to_string(),
            phone_number: "+254700000001".into(),
            plot_location: "North Field".into(),
            crop_type: "Maize".into(),
            weight_kg: 50.0,
            timestamp: "2025-03-01T10:00:00.000Z".into(),
            transaction_hash: None,
            public_key: "pk".into(),
            farmer_address: "addr".into(),
            signature: Some("sig".into()),
            indexed_on_chain: None,
            farmer_id: None,
        }
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut store = RecordStore::new();
        store.replace_all(vec![record("2"), record("1")]);
        store.prepend(record("3"));
        let ids: Vec<_> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }

    #[test]
    fn test_duplicates_coexist() {
        let mut store = RecordStore::new();
        store.replace_all(vec![record("7")]);
        store.prepend(record("7"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("7").unwrap().id, "7");
    }

    #[test]
    fn test_clear() {
        let mut store = RecordStore::new();
        store.prepend(record("1"));
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_export() {
        let mut store = RecordStore::new();
        store.prepend(record("1"));
        let json: serde_json::Value = serde_json::from_str(&store.export_json().unwrap()).unwrap();
        assert_eq!(json[0]["plotLocation"], "North Field");
        assert_eq!(json[0]["weightKg"], 50.0);

        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            RecordStore::export_file_name(date),
            "agridatum-records-2025-03-09.json"
        );
    }
}
