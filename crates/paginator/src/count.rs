//! Count driver: derives the `SELECT count(*)` companion of a query.

use query::ast::{
    expr::{Expr, FunctionCall},
    select::{FromClause, FromSource, Select},
};

/// Builds the auxiliary total-count query from the caller's original query.
/// ORDER BY, LIMIT, and OFFSET never change the count and are stripped.
///
/// DISTINCT queries keep their select list and are counted through a
/// subquery; GROUP BY queries select their group keys in the subquery so the
/// outer `count(*)` counts groups. Everything else just swaps the select
/// list for `count(*)`.
pub fn count_query(source: &Select) -> Select {
    let mut inner = source.clone();
    inner.strip_order_by();
    inner.limit = None;
    inner.offset = None;

    if !inner.group_by.is_empty() {
        let keys = inner.group_by.clone();
        inner.replace_columns(keys);
        return count_over(inner);
    }

    if inner.distinct {
        return count_over(inner);
    }

    inner.replace_columns(vec![count_star()]);
    inner
}

fn count_over(inner: Select) -> Select {
    Select {
        columns: vec![count_star()],
        from: Some(FromClause {
            source: FromSource::Subquery(Box::new(inner)),
            alias: Some("source".to_string()),
        }),
        ..Select::default()
    }
}

fn count_star() -> Expr {
    Expr::FunctionCall(FunctionCall {
        name: "COUNT".to_string(),
        args: Vec::new(),
        wildcard: true,
    })
}

#[cfg(test)]
mod tests {
    use super::count_query;
    use query::ast::{
        common::{OrderDir, TableRef},
        expr::{BinaryOperator, Expr, FunctionCall},
        select::{FromClause, FromSource, OrderByExpr, Select},
    };
    use query::{ident, value};
    use model::core::value::Value;

    fn count_star() -> Expr {
        Expr::FunctionCall(FunctionCall {
            name: "COUNT".to_string(),
            args: Vec::new(),
            wildcard: true,
        })
    }

    fn payments() -> Select {
        Select {
            columns: vec![ident("id"), ident("amount")],
            from: Some(FromClause {
                source: FromSource::Table(TableRef {
                    schema: None,
                    name: "payments".to_string(),
                }),
                alias: None,
            }),
            where_clause: Some(Expr::binary(
                ident("amount"),
                BinaryOperator::Gt,
                value(Value::Int(100)),
            )),
            order_by: vec![OrderByExpr {
                expr: ident("id"),
                direction: Some(OrderDir::Asc),
            }],
            limit: Some(value(Value::Uint(5))),
            ..Select::default()
        }
    }

    #[test]
    fn test_plain_query_swaps_select_for_count() {
        let count = count_query(&payments());
        assert_eq!(count.columns, vec![count_star()]);
        assert!(count.order_by.is_empty());
        assert!(count.limit.is_none());
        // The caller's filter must survive.
        assert!(count.where_clause.is_some());
        assert_eq!(count.root_entity(), Some("payments"));
    }

    #[test]
    fn test_distinct_query_is_counted_through_a_subquery() {
        let mut distinct = payments();
        distinct.distinct = true;

        let count = count_query(&distinct);
        assert_eq!(count.columns, vec![count_star()]);
        match count.from.unwrap().source {
            FromSource::Subquery(inner) => {
                assert!(inner.distinct);
                // The distinct select list stays intact.
                assert_eq!(inner.columns, vec![ident("id"), ident("amount")]);
                assert!(inner.order_by.is_empty());
            }
            other => panic!("expected subquery source, got {other:?}"),
        }
    }

    #[test]
    fn test_group_by_counts_groups() {
        let mut grouped = payments();
        grouped.group_by = vec![ident("customer_id")];

        let count = count_query(&grouped);
        assert_eq!(count.columns, vec![count_star()]);
        match count.from.unwrap().source {
            FromSource::Subquery(inner) => {
                // The subquery selects exactly the group keys.
                assert_eq!(inner.columns, vec![ident("customer_id")]);
                assert_eq!(inner.group_by, vec![ident("customer_id")]);
            }
            other => panic!("expected subquery source, got {other:?}"),
        }
    }
}
