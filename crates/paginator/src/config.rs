//! Per-call configuration: option parsing, cursor decoding, limit clamping.

use crate::{
    error::PaginateError,
    extract::ValueFn,
    fields::{self, FieldSpec, SortInput, TypeFn},
    schema::SchemaReflect,
};
use model::{
    core::{data_type::DataType, value::Value},
    pagination::cursor,
};
use query::ast::select::Select;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: u32 = 50;

/// Cap applied when the caller does not pass `limit_max`.
pub const DEFAULT_LIMIT_MAX: u32 = 100;

/// Floor for `limit`. Zero on purpose: `limit: 0` with `total: true`
/// answers "how many rows match" without fetching any.
pub const LIMIT_MIN: u32 = 0;

/// Caller-facing knobs for one `paginate` call.
#[derive(Clone, Default)]
pub struct PaginateOptions {
    /// Sort keys defining the row ordering and the cursor shape. Required.
    pub fields: Vec<SortInput>,

    /// Opaque forward cursor; rows strictly after it are returned.
    pub after: Option<String>,

    /// Opaque backward cursor; rows strictly before it are returned.
    pub before: Option<String>,

    /// Page size, clamped to `[LIMIT_MIN, limit_max]`.
    pub limit: Option<u32>,

    /// Per-call cap on `limit`.
    pub limit_max: Option<u32>,

    /// Issue the auxiliary count query.
    pub total: bool,

    /// Overrides the default boundary value extractor.
    pub value_fn: Option<ValueFn>,

    /// Overrides schema-based field type resolution.
    pub type_fn: Option<TypeFn>,
}

/// Immutable state for one call, derived from the options and the query.
///
/// When `after`/`before` is present the corresponding `*_values` vector has
/// exactly one entry per field.
#[derive(Clone)]
pub struct Config {
    pub fields: Vec<FieldSpec>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub after_values: Option<Vec<Value>>,
    pub before_values: Option<Vec<Value>>,
    pub limit: u32,
    pub limit_max: u32,
    pub total: bool,
    pub value_fn: Option<ValueFn>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("fields", &self.fields)
            .field("after", &self.after)
            .field("before", &self.before)
            .field("after_values", &self.after_values)
            .field("before_values", &self.before_values)
            .field("limit", &self.limit)
            .field("limit_max", &self.limit_max)
            .field("total", &self.total)
            .field("value_fn", &self.value_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Config {
    pub fn build(
        query: &Select,
        options: PaginateOptions,
        schema: &dyn SchemaReflect,
    ) -> Result<Self, PaginateError> {
        let root_entity = query.root_entity().unwrap_or_default();
        let fields = fields::normalize(
            &options.fields,
            root_entity,
            schema,
            options.type_fn.as_ref(),
        )?;
        let types: Vec<DataType> = fields.iter().map(|f| f.data_type).collect();

        // An empty cursor string means the same as no cursor at all.
        let after = options.after.filter(|c| !c.is_empty());
        let before = options.before.filter(|c| !c.is_empty());

        let after_values = match &after {
            Some(cursor) => Some(cursor::decode(&types, cursor)?),
            None => None,
        };
        let before_values = match &before {
            Some(cursor) => Some(cursor::decode(&types, cursor)?),
            None => None,
        };

        let limit_max = options.limit_max.unwrap_or(DEFAULT_LIMIT_MAX);
        let limit = options
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(LIMIT_MIN, limit_max);

        Ok(Config {
            fields,
            after,
            before,
            after_values,
            before_values,
            limit,
            limit_max,
            total: options.total,
            value_fn: options.value_fn,
        })
    }
}
