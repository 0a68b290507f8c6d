//! Database-specific syntax: identifier quoting and placeholder style.

pub trait Dialect: Send + Sync {
    /// Quotes a table or column name. Cursor field specs carry raw names,
    /// so everything the engine emits goes through this.
    ///
    /// - PostgreSQL: `"my_column"`
    /// - MySQL: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Placeholder for the parameter at `index` (zero-based).
    ///
    /// - PostgreSQL: `$1`, `$2`, …
    /// - MySQL: `?`
    fn get_placeholder(&self, index: usize) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident)
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#"`{}`"#, ident)
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }
}
