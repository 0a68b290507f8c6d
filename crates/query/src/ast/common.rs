//! Common, reusable AST nodes shared across query shapes.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}

impl OrderDir {
    /// Parses `asc`/`desc`, case-insensitively. Anything else is `None`;
    /// callers decide whether that is an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(OrderDir::Asc),
            "desc" => Some(OrderDir::Desc),
            _ => None,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            OrderDir::Asc => OrderDir::Desc,
            OrderDir::Desc => OrderDir::Asc,
        }
    }
}
