use crate::records::row::RowData;
use serde::{Deserialize, Serialize};

/// One page of results plus the cursors needed to continue in either
/// direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub entries: Vec<RowData>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Cursor referencing the first entry; feed back as `before` to walk
    /// toward the start of the result set.
    pub before: Option<String>,

    /// Cursor referencing the last entry; feed back as `after` to walk
    /// toward the end. `None` means this is the last page.
    pub after: Option<String>,

    /// The clamped page size this page was fetched with.
    pub limit: u32,

    /// Result of the auxiliary count query, when requested.
    pub total: Option<u64>,
}
