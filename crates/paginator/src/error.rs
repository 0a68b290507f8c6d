use model::pagination::cursor::CursorError;
use thiserror::Error;

/// All errors surfaced by the pagination engine. None of them are retried;
/// a failed call never produces a partial page.
#[derive(Debug, Error)]
pub enum PaginateError {
    /// The `fields` option was absent or empty.
    #[error("pagination requires a non-empty `fields` option")]
    MissingFields,

    /// A field referenced a join alias the query does not declare.
    #[error("unknown binding `{binding}`; query declares: {known:?}")]
    UnknownBinding { binding: String, known: Vec<String> },

    /// A sort direction other than `asc`/`desc`.
    #[error("invalid sort direction `{0}`")]
    InvalidDirection(String),

    /// The cursor failed base64 or binary decoding, or does not match the
    /// `fields` option it was handed back with.
    #[error("invalid cursor: {0}")]
    CursorCorrupt(#[from] CursorError),

    /// Executor failure, resurfaced as-is.
    #[error("{0}")]
    Executor(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl PaginateError {
    pub fn executor<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PaginateError::Executor(Box::new(err))
    }
}
