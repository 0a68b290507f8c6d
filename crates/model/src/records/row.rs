use crate::core::value::{FieldValue, Value};
use serde::{Deserialize, Serialize};

/// One fetched row: the entity it came from, its typed cells, and any
/// preloaded child rows keyed by association name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
    pub associations: Vec<Association>,
}

/// A preloaded child row, addressable by the binding name a field spec uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    pub name: String,
    pub row: RowData,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
            associations: Vec::new(),
        }
    }

    pub fn with_association(mut self, name: &str, row: RowData) -> Self {
        self.associations.push(Association {
            name: name.to_string(),
            row,
        });
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    pub fn association(&self, name: &str) -> Option<&RowData> {
        self.associations
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| &a.row)
    }
}
