//! Boundary value extraction: pulls typed sort-key values out of a row to
//! mint the outgoing cursor.

use crate::fields::FieldSpec;
use model::core::{data_type::DataType, value::Value};
use model::records::row::RowData;
use std::sync::Arc;

/// Override hook producing `(type, value)` boundary pairs for a row.
/// Required for anything deeper than one association hop.
pub type ValueFn = Arc<dyn Fn(&RowData, &FieldSpec) -> (DataType, Value) + Send + Sync>;

pub fn boundary_value(
    row: &RowData,
    field: &FieldSpec,
    value_fn: Option<&ValueFn>,
) -> (DataType, Value) {
    match value_fn {
        Some(custom) => custom(row, field),
        None => default_value(row, field),
    }
}

/// Default extraction: the row's own attribute wins (a binding may alias the
/// root entity), then one preloaded association hop.
pub fn default_value(row: &RowData, field: &FieldSpec) -> (DataType, Value) {
    if let Some(cell) = row.get(&field.column) {
        return (cell.data_type, cell.value.clone().unwrap_or(Value::Null));
    }

    if let Some(binding) = &field.binding {
        if let Some(child) = row.association(binding) {
            if let Some(cell) = child.get(&field.column) {
                return (cell.data_type, cell.value.clone().unwrap_or(Value::Null));
            }
        }
    }

    (field.data_type, Value::Null)
}

#[cfg(test)]
mod tests {
    use super::{ValueFn, boundary_value, default_value};
    use crate::fields::FieldSpec;
    use model::core::{data_type::DataType, value::FieldValue, value::Value};
    use model::records::row::RowData;
    use query::ast::common::OrderDir;
    use std::sync::Arc;

    fn spec(binding: Option<&str>, column: &str, data_type: DataType) -> FieldSpec {
        FieldSpec {
            binding: binding.map(String::from),
            column: column.to_string(),
            direction: OrderDir::Asc,
            data_type,
        }
    }

    fn row() -> RowData {
        RowData::new(
            "payments",
            vec![FieldValue::new(
                "id",
                DataType::Integer,
                Some(Value::Int(4)),
            )],
        )
        .with_association(
            "customer",
            RowData::new(
                "customers",
                vec![FieldValue::new(
                    "name",
                    DataType::String,
                    Some(Value::String("Acme".to_string())),
                )],
            ),
        )
    }

    #[test]
    fn test_plain_column_reads_own_attribute() {
        let (data_type, value) = default_value(&row(), &spec(None, "id", DataType::Integer));
        assert_eq!(data_type, DataType::Integer);
        assert_eq!(value, Value::Int(4));
    }

    #[test]
    fn test_bound_column_descends_into_association() {
        let (data_type, value) = default_value(
            &row(),
            &spec(Some("customer"), "name", DataType::String),
        );
        assert_eq!(data_type, DataType::String);
        assert_eq!(value, Value::String("Acme".to_string()));
    }

    #[test]
    fn test_bound_column_prefers_own_attribute() {
        // The binding aliases the root entity when the row itself carries
        // the column.
        let (_, value) = default_value(&row(), &spec(Some("p"), "id", DataType::Integer));
        assert_eq!(value, Value::Int(4));
    }

    #[test]
    fn test_missing_everywhere_reads_as_null() {
        let (data_type, value) =
            default_value(&row(), &spec(Some("merchant"), "city", DataType::String));
        assert_eq!(data_type, DataType::String);
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_custom_value_fn_wins() {
        let custom: ValueFn =
            Arc::new(|_row, _field| (DataType::Integer, Value::Int(99)));
        let (_, value) = boundary_value(
            &row(),
            &spec(None, "id", DataType::Integer),
            Some(&custom),
        );
        assert_eq!(value, Value::Int(99));
    }
}
