//! Query mutation: grafts the seek predicate onto the caller's query and
//! prepares it for the lookahead fetch.

use crate::{
    config::Config,
    error::PaginateError,
    predicate::{CursorSide, seek_predicate},
};
use query::ast::{expr::Expr, select::Select};

/// Rewrites the caller's ordered query into the page-fetching query:
///
/// 1. Attach the seek predicate(s), AND-joined with any existing filter.
/// 2. Reverse ORDER BY when walking backward (`before` without `after`);
///    the page assembler restores the caller's order afterwards.
/// 3. Fetch one row past `limit` to learn whether another page exists.
pub fn paginate_query(mut query: Select, config: &Config) -> Result<Select, PaginateError> {
    let mut seek: Option<Expr> = None;
    if let Some(values) = &config.after_values {
        seek = seek_predicate(&query, &config.fields, values, CursorSide::After)?;
    }
    if let Some(values) = &config.before_values {
        let before = seek_predicate(&query, &config.fields, values, CursorSide::Before)?;
        seek = match (seek, before) {
            (Some(after), Some(before)) => Some(Expr::and(after, before)),
            (after, before) => after.or(before),
        };
    }
    if let Some(predicate) = seek {
        query.append_where(predicate);
    }

    if config.before_values.is_some() && config.after_values.is_none() {
        query.reverse_order_by();
    }

    query.set_limit(config.limit as u64 + 1);
    Ok(query)
}
