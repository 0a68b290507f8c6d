//! Keyset (seek-method) pagination over relational queries.
//!
//! Given a user-supplied ordered query, a list of sort keys, and an opaque
//! cursor, the engine returns the next (or previous) page of rows together
//! with cursors for continuing in either direction. Cursors encode the sort
//! key values of the boundary row; on the way back in they become a
//! lexicographic range predicate grafted onto the original query, which
//! keeps pages stable under concurrent inserts.
//!
//! The engine is stateless: every call is a pure function of the query, the
//! options, and the two executor round trips it delegates.

pub mod config;
pub mod count;
pub mod error;
pub mod executor;
pub mod extract;
pub mod fields;
pub mod mutate;
pub mod page;
pub mod predicate;
pub mod schema;

pub use config::{Config, DEFAULT_LIMIT, DEFAULT_LIMIT_MAX, LIMIT_MIN, PaginateOptions};
pub use error::PaginateError;
pub use executor::Executor;
pub use extract::ValueFn;
pub use fields::{FieldRef, FieldSpec, SortInput, TypeFn};
pub use schema::{SchemaReflect, StaticSchema};

use model::{pagination::page::Page, records::row::RowData};
use query::ast::select::Select;
use tracing::debug;

/// The pagination entry point, bound to an executor and a schema layer.
pub struct Paginator<E, S> {
    executor: E,
    schema: S,
}

impl<E, S> Paginator<E, S>
where
    E: Executor,
    S: SchemaReflect,
{
    pub fn new(executor: E, schema: S) -> Self {
        Paginator { executor, schema }
    }

    /// Fetches one page of `query` according to `options`.
    ///
    /// The rows query and the optional count query run sequentially;
    /// executor errors resurface unchanged and never yield a partial page.
    pub async fn paginate(
        &self,
        query: &Select,
        options: PaginateOptions,
    ) -> Result<Page, PaginateError> {
        let config = Config::build(query, options, &self.schema)?;
        let row_query = mutate::paginate_query(query.clone(), &config)?;

        debug!(
            limit = config.limit,
            after = config.after.is_some(),
            before = config.before.is_some(),
            total = config.total,
            "running paginated query"
        );

        let rows = self
            .executor
            .fetch_rows(&row_query)
            .await
            .map_err(PaginateError::executor)?;

        let total = if config.total {
            let count = self
                .executor
                .fetch_scalar(&count::count_query(query))
                .await
                .map_err(PaginateError::executor)?;
            Some(count.max(0) as u64)
        } else {
            None
        };

        page::assemble(rows, &config, total)
    }

    /// The cursor the engine would emit for `row` as a page boundary, with
    /// field types resolved against the row's own entity.
    pub fn cursor_for_record(
        &self,
        row: &RowData,
        fields: &[SortInput],
        value_fn: Option<ValueFn>,
    ) -> Result<String, PaginateError> {
        let specs = fields::normalize(fields, &row.entity, &self.schema, None)?;
        let pairs: Vec<_> = specs
            .iter()
            .map(|field| extract::boundary_value(row, field, value_fn.as_ref()))
            .collect();
        Ok(model::pagination::cursor::encode(&pairs)?)
    }
}
