//! Seek predicate synthesis: turns boundary values into the lexicographic
//! range condition that selects rows past (or before) the boundary row.

use crate::{error::PaginateError, fields::FieldSpec};
use model::core::value::Value;
use query::ast::{
    common::OrderDir,
    expr::{BinaryOperator, Expr, Ident},
    select::Select,
};

/// Which side of the boundary row a cursor selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSide {
    After,
    Before,
}

/// Builds the seek predicate for `values` against the ordering of `fields`:
/// a disjunction of prefix-equalities, each terminated by one strict
/// comparison.
///
/// Fields whose boundary value is null drop out of the chain entirely;
/// comparing against NULL would empty the page under SQL's three-valued
/// logic. Returns `None` when nothing is left to compare.
pub fn seek_predicate(
    query: &Select,
    fields: &[FieldSpec],
    values: &[Value],
    side: CursorSide,
) -> Result<Option<Expr>, PaginateError> {
    let bounded: Vec<(&FieldSpec, &Value)> = fields
        .iter()
        .zip(values)
        .filter(|(_, value)| !value.is_null())
        .collect();

    if bounded.is_empty() {
        return Ok(None);
    }

    let known = query.aliases();
    let root = query.root_qualifier();

    let mut arms: Vec<Expr> = Vec::with_capacity(bounded.len());
    for (position, (field, value)) in bounded.iter().copied().enumerate() {
        let mut arm = Expr::binary(
            column_expr(field, &known, root)?,
            strict_op(field.direction, side),
            Expr::Value(value.clone()),
        );
        for (prefix_field, prefix_value) in bounded[..position].iter().copied().rev() {
            arm = Expr::and(
                Expr::binary(
                    column_expr(prefix_field, &known, root)?,
                    BinaryOperator::Eq,
                    Expr::Value(prefix_value.clone()),
                ),
                arm,
            );
        }
        arms.push(arm);
    }

    Ok(arms.into_iter().reduce(Expr::or))
}

/// Strict comparison for one field: walking forward on an ascending key
/// means `>`, and every other combination mirrors it.
fn strict_op(direction: OrderDir, side: CursorSide) -> BinaryOperator {
    match (direction, side) {
        (OrderDir::Asc, CursorSide::After) | (OrderDir::Desc, CursorSide::Before) => {
            BinaryOperator::Gt
        }
        (OrderDir::Asc, CursorSide::Before) | (OrderDir::Desc, CursorSide::After) => {
            BinaryOperator::Lt
        }
    }
}

fn column_expr(
    field: &FieldSpec,
    known: &[String],
    root: Option<&str>,
) -> Result<Expr, PaginateError> {
    let qualifier = match &field.binding {
        Some(binding) => {
            if !known.iter().any(|alias| alias == binding) {
                return Err(PaginateError::UnknownBinding {
                    binding: binding.clone(),
                    known: known.to_vec(),
                });
            }
            Some(binding.clone())
        }
        None => root.map(String::from),
    };
    Ok(Expr::Identifier(Ident {
        qualifier,
        name: field.column.clone(),
    }))
}
