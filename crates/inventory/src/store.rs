use serde::Deserialize;
use serde_json::{Map, Value};

use stockroom_core::{DomainError, DomainResult, Entity, ValueObject};

use crate::record::{Record, RecordData};

/// Aggregate figures over the whole inventory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of distinct records.
    pub distinct_items: usize,
    /// Σ quantity × price, rounded to cents.
    pub total_value: f64,
}

impl ValueObject for Summary {}

/// In-memory keyed collection of records.
///
/// Each record's id is its key; listing follows insertion order. Callers only
/// ever get shared references or clones, so every mutation goes through the
/// validated operations below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    records: Vec<Record>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.position(id).map(|idx| &self.records[idx])
    }

    /// Insert a new record. Fails without touching the store if the id is taken.
    pub fn add(&mut self, record: Record) -> DomainResult<()> {
        if self.contains(record.id_typed().as_str()) {
            return Err(DomainError::duplicate_key(record.id_typed().as_str()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Remove and return the record stored under `id`.
    pub fn remove_by_id(&mut self, id: &str) -> DomainResult<Record> {
        let idx = self.position(id).ok_or_else(|| DomainError::not_found(id))?;
        Ok(self.records.remove(idx))
    }

    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> DomainResult<()> {
        self.get_mut(id)?.set_quantity(quantity)
    }

    pub fn update_price(&mut self, id: &str, price: f64) -> DomainResult<()> {
        self.get_mut(id)?.set_price(price)
    }

    /// Case-insensitive substring search on record names.
    ///
    /// A blank query matches nothing.
    pub fn find_by_name_substring(&self, text: &str) -> Vec<Record> {
        let needle = fold_case(text.trim());
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| fold_case(r.name()).contains(&needle))
            .cloned()
            .collect()
    }

    /// Owned copy of every record, in insertion order.
    pub fn list_all(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn summary(&self) -> Summary {
        let total: f64 = self.records.iter().map(Record::total_value).sum();
        Summary {
            distinct_items: self.records.len(),
            total_value: round_cents(total),
        }
    }

    /// Persisted shape: `{ "<id>": {"id", "name", "quantity", "price"} }`.
    pub fn to_serializable(&self) -> Map<String, Value> {
        self.records
            .iter()
            .map(|r| {
                let data = RecordData::from(r);
                let value = serde_json::json!({
                    "id": data.id,
                    "name": data.name,
                    "quantity": data.quantity,
                    "price": data.price,
                });
                (r.id_typed().to_string(), value)
            })
            .collect()
    }

    /// Rebuild an inventory from its persisted shape.
    ///
    /// Anything other than a JSON object yields an empty inventory. Entries
    /// are decoded one by one; a bad entry is logged and skipped. An entry
    /// without an `id` takes its map key.
    pub fn from_serializable(data: &Value) -> Self {
        let mut inventory = Self::new();

        let Value::Object(entries) = data else {
            tracing::warn!(
                kind = json_kind(data),
                "inventory data is not a JSON object; starting empty"
            );
            return inventory;
        };

        for (key, entry) in entries {
            let loaded = RecordData::deserialize(entry)
                .map_err(|e| DomainError::validation(e.to_string()))
                .and_then(|mut fields| {
                    if fields.id.trim().is_empty() {
                        fields.id = key.clone();
                    }
                    Record::try_from(fields)
                })
                .and_then(|record| inventory.add(record));

            if let Err(err) = loaded {
                tracing::warn!(key = %key, error = %err, "skipping inventory entry");
            }
        }

        inventory
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id().as_str() == id)
    }

    fn get_mut(&mut self, id: &str) -> DomainResult<&mut Record> {
        let idx = self.position(id).ok_or_else(|| DomainError::not_found(id))?;
        Ok(&mut self.records[idx])
    }
}

/// Lowercase, then fold the characters whose lowercase form still differs
/// between spellings (`ß` → `ss`, final `ς` → `σ`).
fn fold_case(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        match c {
            'ß' | 'ẞ' => folded.push_str("ss"),
            'ς' => folded.push('σ'),
            other => folded.push(other),
        }
    }
    folded
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
