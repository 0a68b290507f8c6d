//! Normalization of user-supplied sort keys into field specs.

use crate::{error::PaginateError, schema::SchemaReflect};
use model::core::data_type::DataType;
use query::ast::common::OrderDir;
use std::sync::Arc;
use tracing::warn;

/// Reference to a sort column, optionally through a join binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    Plain(String),
    Bound(String, String), // (binding, column)
}

impl FieldRef {
    pub fn column(&self) -> &str {
        match self {
            FieldRef::Plain(column) => column,
            FieldRef::Bound(_, column) => column,
        }
    }

    pub fn binding(&self) -> Option<&str> {
        match self {
            FieldRef::Plain(_) => None,
            FieldRef::Bound(binding, _) => Some(binding),
        }
    }
}

/// One user-supplied sort key before normalization. Direction defaults to
/// ascending when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortInput {
    pub field: FieldRef,
    pub direction: Option<OrderDir>,
}

impl SortInput {
    /// Parses `"column"` or `"binding.column"`, with an optional
    /// `:asc`/`:desc` suffix.
    pub fn parse(s: &str) -> Result<Self, PaginateError> {
        let (path, direction) = match s.split_once(':') {
            Some((path, dir)) => {
                let parsed = OrderDir::parse(dir)
                    .ok_or_else(|| PaginateError::InvalidDirection(dir.to_string()))?;
                (path, Some(parsed))
            }
            None => (s, None),
        };
        let field = match path.split_once('.') {
            Some((binding, column)) => FieldRef::Bound(binding.to_string(), column.to_string()),
            None => FieldRef::Plain(path.to_string()),
        };
        Ok(SortInput { field, direction })
    }
}

impl From<&str> for SortInput {
    fn from(column: &str) -> Self {
        SortInput {
            field: FieldRef::Plain(column.to_string()),
            direction: None,
        }
    }
}

impl From<(&str, OrderDir)> for SortInput {
    fn from((column, direction): (&str, OrderDir)) -> Self {
        SortInput {
            field: FieldRef::Plain(column.to_string()),
            direction: Some(direction),
        }
    }
}

impl From<((&str, &str), OrderDir)> for SortInput {
    fn from(((binding, column), direction): ((&str, &str), OrderDir)) -> Self {
        SortInput {
            field: FieldRef::Bound(binding.to_string(), column.to_string()),
            direction: Some(direction),
        }
    }
}

/// Fully normalized sort key: `(binding?, column, direction, type)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub binding: Option<String>,
    pub column: String,
    pub direction: OrderDir,
    pub data_type: DataType,
}

/// Override hook resolving a field's semantic type against an entity.
pub type TypeFn = Arc<dyn Fn(&str, &FieldRef) -> Option<DataType> + Send + Sync>;

/// Normalizes the `fields` option. The field order defines the
/// lexicographic row ordering, so it is preserved as given.
pub fn normalize(
    inputs: &[SortInput],
    root_entity: &str,
    schema: &dyn SchemaReflect,
    type_fn: Option<&TypeFn>,
) -> Result<Vec<FieldSpec>, PaginateError> {
    if inputs.is_empty() {
        return Err(PaginateError::MissingFields);
    }

    Ok(inputs
        .iter()
        .map(|input| {
            let data_type = resolve_type(input, root_entity, schema, type_fn);
            let (binding, column) = match &input.field {
                FieldRef::Plain(column) => (None, column.clone()),
                FieldRef::Bound(binding, column) => (Some(binding.clone()), column.clone()),
            };
            FieldSpec {
                binding,
                column,
                direction: input.direction.unwrap_or(OrderDir::Asc),
                data_type,
            }
        })
        .collect())
}

fn resolve_type(
    input: &SortInput,
    root_entity: &str,
    schema: &dyn SchemaReflect,
    type_fn: Option<&TypeFn>,
) -> DataType {
    if let Some(type_fn) = type_fn {
        if let Some(data_type) = type_fn(root_entity, &input.field) {
            return data_type;
        }
    }

    let resolved = match &input.field {
        FieldRef::Plain(column) => schema.column_type(root_entity, column),
        FieldRef::Bound(binding, column) => match schema.association(root_entity, binding) {
            Some(target) => schema.column_type(target, column),
            // A binding with no association aliases the root entity.
            None => schema.column_type(root_entity, column),
        },
    };

    resolved.unwrap_or_else(|| {
        warn!(
            entity = root_entity,
            column = input.field.column(),
            "no column type found; treating cursor value as opaque"
        );
        DataType::Id
    })
}
