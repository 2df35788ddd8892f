use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::coerce::{self, Value};
use crate::config::ConversionConfig;
use crate::reader::Row;

/// One monitored target's configuration: a converted CSV row.
///
/// Keys keep the CSV column order when serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    fields: Vec<(String, Value)>,
}

impl Instance {
    /// Convert a raw row, expanding configured list columns.
    pub fn from_row(row: &Row, conversion: &ConversionConfig) -> Self {
        let mut instance = Self::default();
        for (column, raw) in &row.fields {
            let value = if conversion.is_list_column(column) {
                Value::List(coerce::convert_list(raw))
            } else {
                coerce::convert(raw)
            };
            instance.insert(column.clone(), value);
        }
        instance
    }

    /// Insert or replace a value. A replaced key keeps its original position.
    pub fn insert(&mut self, key: String, value: Value) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The generated `conf.yaml` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigDocument {
    init_config: BTreeMap<String, Value>,
    instances: Vec<Instance>,
}

impl ConfigDocument {
    pub fn new(instances: Vec<Instance>) -> Self {
        Self {
            init_config: BTreeMap::new(),
            instances,
        }
    }

    /// Build the document from parsed rows, preserving row order.
    pub fn from_rows(rows: &[Row], conversion: &ConversionConfig) -> Self {
        let instances = rows
            .iter()
            .map(|row| Instance::from_row(row, conversion))
            .collect();
        Self::new(instances)
    }

    /// Integration-wide settings. Always empty.
    pub fn init_config(&self) -> &BTreeMap<String, Value> {
        &self.init_config
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }
}
