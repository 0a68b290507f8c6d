use async_trait::async_trait;
use model::records::row::RowData;
use query::ast::select::Select;

/// The two operations the engine delegates to a database backend.
///
/// Both calls run under whatever transactional context the implementation
/// supplies; the engine itself holds no connections and no state.
#[async_trait]
pub trait Executor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes an ordered, limited SELECT and returns its rows.
    async fn fetch_rows(&self, query: &Select) -> Result<Vec<RowData>, Self::Error>;

    /// Executes a single-value query (the count driver) and returns the
    /// scalar in its first column.
    async fn fetch_scalar(&self, query: &Select) -> Result<i64, Self::Error>;
}
