//! Defines the Abstract Syntax Tree (AST) for a SELECT query, plus the
//! small set of mutations the pagination engine performs on one.

use crate::ast::{
    common::{JoinKind, OrderDir, TableRef},
    expr::Expr,
};
use model::core::value::Value;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// The list of columns or expressions to be returned.
    pub columns: Vec<Expr>,

    /// SELECT DISTINCT when set.
    pub distinct: bool,

    /// The primary table (or subquery) for the query.
    pub from: Option<FromClause>,

    /// A list of JOIN clauses.
    pub joins: Vec<JoinClause>,

    /// The WHERE clause condition.
    pub where_clause: Option<Expr>,

    /// The GROUP BY clause.
    pub group_by: Vec<Expr>,

    /// The ORDER BY clause.
    pub order_by: Vec<OrderByExpr>,

    /// The LIMIT clause.
    pub limit: Option<Expr>,

    /// The OFFSET clause.
    pub offset: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub source: FromSource,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FromSource {
    Table(TableRef),
    Subquery(Box<Select>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub table: TableRef,
    pub alias: Option<String>,
    /// The join condition, e.g., `ON users.id = posts.user_id`.
    pub on: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Option<OrderDir>,
}

impl Select {
    /// Name of the entity the query selects from, when it is a plain table.
    pub fn root_entity(&self) -> Option<&str> {
        match &self.from {
            Some(FromClause {
                source: FromSource::Table(table),
                ..
            }) => Some(table.name.as_str()),
            _ => None,
        }
    }

    /// Qualifier for unbound columns: the FROM alias when one exists, else
    /// the table name once joins make bare columns ambiguous.
    pub fn root_qualifier(&self) -> Option<&str> {
        let from = self.from.as_ref()?;
        if let Some(alias) = &from.alias {
            return Some(alias.as_str());
        }
        if self.joins.is_empty() {
            return None;
        }
        self.root_entity()
    }

    /// Every binding a field spec may legally reference: the FROM alias (or
    /// table name) plus each join's alias (or table name).
    pub fn aliases(&self) -> Vec<String> {
        let mut known = Vec::with_capacity(self.joins.len() + 1);
        if let Some(from) = &self.from {
            match (&from.alias, &from.source) {
                (Some(alias), _) => known.push(alias.clone()),
                (None, FromSource::Table(table)) => known.push(table.name.clone()),
                (None, FromSource::Subquery(_)) => {}
            }
        }
        for join in &self.joins {
            known.push(join.alias.clone().unwrap_or_else(|| join.table.name.clone()));
        }
        known
    }

    /// ANDs `condition` onto any existing WHERE clause.
    pub fn append_where(&mut self, condition: Expr) {
        self.where_clause = match self.where_clause.take() {
            Some(existing) => Some(Expr::and(existing, condition)),
            None => Some(condition),
        };
    }

    pub fn set_limit(&mut self, limit: u64) {
        self.limit = Some(Expr::Value(Value::Uint(limit)));
    }

    /// Flips every ORDER BY direction. An absent direction means ASC, so it
    /// flips to an explicit DESC.
    pub fn reverse_order_by(&mut self) {
        for order in &mut self.order_by {
            order.direction = Some(order.direction.unwrap_or(OrderDir::Asc).reversed());
        }
    }

    pub fn strip_order_by(&mut self) {
        self.order_by.clear();
    }

    /// Replaces the select list, e.g. with `COUNT(*)`.
    pub fn replace_columns(&mut self, columns: Vec<Expr>) {
        self.columns = columns;
    }
}
