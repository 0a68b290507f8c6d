use model::core::data_type::DataType;
use std::collections::HashMap;

/// Answers the two reflection questions the engine asks of a schema layer.
pub trait SchemaReflect: Send + Sync {
    /// Semantic type of `column` on `entity`, if known.
    fn column_type(&self, entity: &str, column: &str) -> Option<DataType>;

    /// Entity a named association on `entity` points to. One hop is all the
    /// default value extractor ever walks.
    fn association(&self, entity: &str, binding: &str) -> Option<&str>;
}

/// Map-backed reflection for tests and callers without a live catalog.
#[derive(Debug, Default, Clone)]
pub struct StaticSchema {
    columns: HashMap<String, HashMap<String, DataType>>,
    associations: HashMap<String, HashMap<String, String>>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, entity: &str, column: &str, data_type: DataType) -> Self {
        self.columns
            .entry(entity.to_string())
            .or_default()
            .insert(column.to_string(), data_type);
        self
    }

    pub fn assoc(mut self, entity: &str, binding: &str, target: &str) -> Self {
        self.associations
            .entry(entity.to_string())
            .or_default()
            .insert(binding.to_string(), target.to_string());
        self
    }
}

impl SchemaReflect for StaticSchema {
    fn column_type(&self, entity: &str, column: &str) -> Option<DataType> {
        self.columns.get(entity)?.get(column).copied()
    }

    fn association(&self, entity: &str, binding: &str) -> Option<&str> {
        self.associations
            .get(entity)?
            .get(binding)
            .map(String::as_str)
    }
}
