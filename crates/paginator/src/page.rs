//! Page assembly: folds the `limit + 1` lookahead fetch into the
//! caller-facing page with its continuation cursors.

use crate::{config::Config, error::PaginateError, extract};
use model::{
    pagination::{
        cursor,
        page::{Metadata, Page},
    },
    records::row::RowData,
};

/// Builds the page from the rows the executor returned (up to `limit + 1`
/// of them).
///
/// When the query walked backward (`before` alone), the rows arrive in
/// reversed order and are flipped back so the caller always observes its
/// own sort direction.
pub fn assemble(
    mut rows: Vec<RowData>,
    config: &Config,
    total: Option<u64>,
) -> Result<Page, PaginateError> {
    let limit = config.limit as usize;
    let has_more = rows.len() > limit;
    rows.truncate(limit);

    if config.before.is_some() && config.after.is_none() {
        rows.reverse();
    }

    let first = match rows.first() {
        Some(row) => Some(record_cursor(row, config)?),
        None => None,
    };
    let last = match rows.last() {
        Some(row) => Some(record_cursor(row, config)?),
        None => None,
    };

    let (before, after) = if rows.is_empty() {
        (None, None)
    } else {
        match (&config.after, &config.before) {
            (Some(_), Some(_)) => (first, last),
            (Some(_), None) => (first, if has_more { last } else { None }),
            (None, Some(_)) => (if has_more { first } else { None }, last),
            (None, None) => (None, if has_more { last } else { None }),
        }
    };

    Ok(Page {
        entries: rows,
        metadata: Metadata {
            before,
            after,
            limit: config.limit,
            total,
        },
    })
}

/// The cursor the engine would emit for `row` as a page boundary.
pub fn record_cursor(row: &RowData, config: &Config) -> Result<String, PaginateError> {
    let pairs: Vec<_> = config
        .fields
        .iter()
        .map(|field| extract::boundary_value(row, field, config.value_fn.as_ref()))
        .collect();
    Ok(cursor::encode(&pairs)?)
}
