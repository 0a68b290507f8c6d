#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::core::{data_type::DataType, value::FieldValue, value::Value};
use model::records::row::RowData;
use paginator::{StaticSchema, executor::Executor};
use query::ast::{
    common::{OrderDir, TableRef},
    expr::{BinaryOperator, Expr, Ident},
    select::{FromClause, FromSource, OrderByExpr, Select},
};
use query::builder::select::SelectBuilder;
use query::ident;
use std::cmp::Ordering;
use std::convert::Infallible;

/// Interprets `Select` ASTs over an in-memory dataset, standing in for a
/// SQL backend: WHERE filter, ORDER BY sort, LIMIT truncation.
pub struct MemExecutor {
    pub rows: Vec<RowData>,
}

#[async_trait]
impl Executor for MemExecutor {
    type Error = Infallible;

    async fn fetch_rows(&self, query: &Select) -> Result<Vec<RowData>, Infallible> {
        let mut rows: Vec<RowData> = self
            .rows
            .iter()
            .filter(|row| matches(query.where_clause.as_ref(), row))
            .cloned()
            .collect();
        sort_rows(&mut rows, &query.order_by);
        if let Some(Expr::Value(Value::Uint(limit))) = &query.limit {
            rows.truncate(*limit as usize);
        }
        Ok(rows)
    }

    async fn fetch_scalar(&self, query: &Select) -> Result<i64, Infallible> {
        // Count queries either filter in place or wrap the filter in a
        // subquery; either way the WHERE clause decides what counts.
        let inner = match &query.from {
            Some(FromClause {
                source: FromSource::Subquery(inner),
                ..
            }) => inner,
            _ => query,
        };
        let count = self
            .rows
            .iter()
            .filter(|row| matches(inner.where_clause.as_ref(), row))
            .count();
        Ok(count as i64)
    }
}

fn matches(condition: Option<&Expr>, row: &RowData) -> bool {
    condition.map(|expr| truthy(&eval(expr, row))).unwrap_or(true)
}

fn truthy(value: &Value) -> bool {
    matches!(value, Value::Boolean(true))
}

fn eval(expr: &Expr, row: &RowData) -> Value {
    match expr {
        Expr::Identifier(ident) => lookup(row, ident),
        Expr::Value(value) => value.clone(),
        Expr::BinaryOp(op) => match op.op {
            BinaryOperator::And => Value::Boolean(
                truthy(&eval(&op.left, row)) && truthy(&eval(&op.right, row)),
            ),
            BinaryOperator::Or => Value::Boolean(
                truthy(&eval(&op.left, row)) || truthy(&eval(&op.right, row)),
            ),
            comparison => {
                let left = eval(&op.left, row);
                let right = eval(&op.right, row);
                match left.compare(&right) {
                    // NULL comparisons stay NULL, like in SQL.
                    None => Value::Null,
                    Some(ordering) => Value::Boolean(match comparison {
                        BinaryOperator::Eq => ordering == Ordering::Equal,
                        BinaryOperator::NotEq => ordering != Ordering::Equal,
                        BinaryOperator::Lt => ordering == Ordering::Less,
                        BinaryOperator::LtEq => ordering != Ordering::Greater,
                        BinaryOperator::Gt => ordering == Ordering::Greater,
                        BinaryOperator::GtEq => ordering != Ordering::Less,
                        BinaryOperator::And | BinaryOperator::Or => unreachable!(),
                    }),
                }
            }
        },
        _ => Value::Null,
    }
}

fn lookup(row: &RowData, ident: &Ident) -> Value {
    if let Some(qualifier) = &ident.qualifier {
        if row.get(&ident.name).is_none() {
            if let Some(child) = row.association(qualifier) {
                return child.get_value(&ident.name);
            }
        }
    }
    row.get_value(&ident.name)
}

fn sort_rows(rows: &mut [RowData], order_by: &[OrderByExpr]) {
    rows.sort_by(|a, b| {
        for key in order_by {
            let left = eval(&key.expr, a);
            let right = eval(&key.expr, b);
            let ordering = left.compare(&right).unwrap_or(Ordering::Equal);
            let ordering = match key.direction.unwrap_or(OrderDir::Asc) {
                OrderDir::Asc => ordering,
                OrderDir::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn charged_at(hour_slot: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_100_000 + hour_slot * 3_600, 0).unwrap()
}

fn payment(id: i64, hour_slot: i64, amount: i64) -> RowData {
    RowData::new(
        "payments",
        vec![
            FieldValue::new("id", DataType::Integer, Some(Value::Int(id))),
            FieldValue::new(
                "charged_at",
                DataType::UtcDatetimeMicros,
                Some(Value::Timestamp(charged_at(hour_slot))),
            ),
            FieldValue::new("amount", DataType::Integer, Some(Value::Int(amount))),
        ],
    )
}

/// Twelve payments whose `(charged_at, id)` ordering is
/// `[p5, p4, p1, p6, p7, p3, p10, p2, p12, p8, p9, p11]`; ties on
/// `charged_at` are broken by `id`.
pub fn payments() -> Vec<RowData> {
    vec![
        payment(1, 2, 300),
        payment(2, 5, 800),
        payment(3, 4, 600),
        payment(4, 1, 100),
        payment(5, 0, 50),
        payment(6, 2, 400),
        payment(7, 3, 100),
        payment(8, 7, 900),
        payment(9, 7, 950),
        payment(10, 4, 700),
        payment(11, 8, 1100),
        payment(12, 6, 850),
    ]
}

pub fn payment_by_id(id: i64) -> RowData {
    payments()
        .into_iter()
        .find(|row| row.get_value("id") == Value::Int(id))
        .unwrap()
}

pub fn payments_schema() -> StaticSchema {
    StaticSchema::new()
        .column("payments", "id", DataType::Integer)
        .column("payments", "charged_at", DataType::UtcDatetimeMicros)
        .column("payments", "amount", DataType::Integer)
}

fn payments_table() -> TableRef {
    TableRef {
        schema: None,
        name: "payments".to_string(),
    }
}

/// `SELECT id, charged_at, amount FROM payments ORDER BY charged_at, id`.
pub fn payments_query() -> Select {
    SelectBuilder::new()
        .select(vec![ident("id"), ident("charged_at"), ident("amount")])
        .from(payments_table(), None)
        .order_by(ident("charged_at"), Some(OrderDir::Asc))
        .order_by(ident("id"), Some(OrderDir::Asc))
        .build()
}

/// The same query ordered `amount ASC, charged_at DESC, id ASC`.
pub fn mixed_order_query() -> Select {
    SelectBuilder::new()
        .select(vec![ident("id"), ident("charged_at"), ident("amount")])
        .from(payments_table(), None)
        .order_by(ident("amount"), Some(OrderDir::Asc))
        .order_by(ident("charged_at"), Some(OrderDir::Desc))
        .order_by(ident("id"), Some(OrderDir::Asc))
        .build()
}

pub fn entry_ids(rows: &[RowData]) -> Vec<i64> {
    rows.iter()
        .map(|row| match row.get_value("id") {
            Value::Int(id) => id,
            other => panic!("unexpected id value: {other:?}"),
        })
        .collect()
}
