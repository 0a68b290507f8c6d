//! Renders `Select` trees into parameterized SQL.
//!
//! Rendering is the trust boundary for cursor-derived values: every literal
//! in the tree leaves as a bind parameter, so a decoded boundary value can
//! never splice text into the statement.

use crate::ast::{
    common::{JoinKind, OrderDir},
    expr::{BinaryOperator, Expr},
    select::{FromClause, FromSource, JoinClause, OrderByExpr, Select},
};
use crate::dialect::Dialect;
use model::core::value::Value;

/// Implemented by every node that can write itself into a statement.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the SQL text and the bind parameters for one statement,
/// quoting and numbering through the active dialect.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Quotes and writes an identifier, prefixed by its binding qualifier
    /// (or schema) when one is present.
    fn ident(&mut self, qualifier: Option<&str>, name: &str) {
        if let Some(qualifier) = qualifier {
            let quoted = self.dialect.quote_identifier(qualifier);
            self.sql.push_str(&quoted);
            self.sql.push('.');
        }
        let quoted = self.dialect.quote_identifier(name);
        self.sql.push_str(&quoted);
    }

    /// Emits a placeholder and queues the value for binding. Boundary
    /// values from cursors only ever pass through here.
    fn bind(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    fn comma_list(&mut self, items: &[impl Render]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            item.render(self);
        }
    }
}

fn operator_symbol(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Eq => " = ",
        BinaryOperator::NotEq => " <> ",
        BinaryOperator::Lt => " < ",
        BinaryOperator::LtEq => " <= ",
        BinaryOperator::Gt => " > ",
        BinaryOperator::GtEq => " >= ",
        BinaryOperator::And => " AND ",
        BinaryOperator::Or => " OR ",
    }
}

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => r.ident(ident.qualifier.as_deref(), &ident.name),
            Expr::Value(value) => r.bind(value.clone()),
            // Parenthesize unconditionally; the seek predicate relies on
            // its OR-of-AND-chains grouping surviving verbatim.
            Expr::BinaryOp(op) => {
                r.sql.push('(');
                op.left.render(r);
                r.sql.push_str(operator_symbol(op.op));
                op.right.render(r);
                r.sql.push(')');
            }
            Expr::FunctionCall(func) => {
                r.sql.push_str(&func.name);
                r.sql.push('(');
                if func.wildcard {
                    r.sql.push('*');
                } else {
                    r.comma_list(&func.args);
                }
                r.sql.push(')');
            }
            Expr::Alias { expr, alias } => {
                expr.render(r);
                r.sql.push_str(" AS ");
                r.ident(None, alias);
            }
        }
    }
}

/// Clause order is fixed; the pagination mutator only ever touches WHERE,
/// ORDER BY, and LIMIT, and the count driver swaps the select list.
impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("SELECT ");
        if self.distinct {
            r.sql.push_str("DISTINCT ");
        }
        r.comma_list(&self.columns);

        if let Some(from) = &self.from {
            r.sql.push(' ');
            from.render(r);
        }
        for join in &self.joins {
            r.sql.push(' ');
            join.render(r);
        }
        if let Some(condition) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            condition.render(r);
        }
        if !self.group_by.is_empty() {
            r.sql.push_str(" GROUP BY ");
            r.comma_list(&self.group_by);
        }
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            r.comma_list(&self.order_by);
        }
        if let Some(limit) = &self.limit {
            r.sql.push_str(" LIMIT ");
            limit.render(r);
        }
        if let Some(offset) = &self.offset {
            r.sql.push_str(" OFFSET ");
            offset.render(r);
        }
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("FROM ");
        match &self.source {
            FromSource::Table(table) => r.ident(table.schema.as_deref(), &table.name),
            // Count queries over DISTINCT or grouped selects nest here.
            FromSource::Subquery(inner) => {
                r.sql.push('(');
                inner.render(r);
                r.sql.push(')');
            }
        }
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.ident(None, alias);
        }
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        let keyword = match self.kind {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
        };
        r.sql.push_str(keyword);
        r.sql.push(' ');
        r.ident(self.table.schema.as_deref(), &self.table.name);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.ident(None, alias);
        }
        r.sql.push_str(" ON ");
        self.on.render(r);
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        match self.direction {
            Some(OrderDir::Asc) => r.sql.push_str(" ASC"),
            Some(OrderDir::Desc) => r.sql.push_str(" DESC"),
            None => {}
        }
    }
}
