use thiserror::Error;

/// All errors coming from the database layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any SQL driver error.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}
