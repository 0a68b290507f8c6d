use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Semantic column types used for cursor round-tripping.
///
/// The temporal tags carry their precision because cursors store integer
/// epoch values; every other tag passes through the codec unchanged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    /// Identifier column: integer or UUID primary key, passed through.
    Id,
    Integer,
    String,
    Boolean,
    Float,
    /// Fixed-point numeric; stringified on the wire so no precision is lost.
    Decimal,
    /// UTC timestamp truncated to whole seconds on the wire.
    UtcDatetimeSeconds,
    /// UTC timestamp with microsecond precision on the wire.
    UtcDatetimeMicros,
    /// Timestamp without a timezone.
    NaiveDatetime,
    Date,
    Binary,
    Null,
}

lazy_static! {
    static ref MYSQL_TYPE_MAP: HashMap<&'static str, DataType> = build_mysql_type_map();
    static ref POSTGRES_TYPE_MAP: HashMap<&'static str, DataType> = build_postgres_type_map();
}

impl DataType {
    pub fn from_mysql_type(type_name: &str) -> Option<Self> {
        MYSQL_TYPE_MAP
            .get(normalize_type_name(type_name).as_str())
            .copied()
    }

    pub fn from_postgres_type(type_name: &str) -> Option<Self> {
        POSTGRES_TYPE_MAP
            .get(normalize_type_name(type_name).as_str())
            .copied()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Id => "id",
            DataType::Integer => "integer",
            DataType::String => "string",
            DataType::Boolean => "boolean",
            DataType::Float => "float",
            DataType::Decimal => "decimal",
            DataType::UtcDatetimeSeconds => "utc_datetime",
            DataType::UtcDatetimeMicros => "utc_datetime_usec",
            DataType::NaiveDatetime => "naive_datetime",
            DataType::Date => "date",
            DataType::Binary => "binary",
            DataType::Null => "null",
        };
        write!(f, "{name}")
    }
}

fn normalize_type_name(type_name: &str) -> String {
    type_name.trim().to_uppercase()
}

fn build_mysql_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("TINYINT", Integer),
        ("TINYINT UNSIGNED", Integer),
        ("SMALLINT", Integer),
        ("SMALLINT UNSIGNED", Integer),
        ("MEDIUMINT", Integer),
        ("MEDIUMINT UNSIGNED", Integer),
        ("INT", Integer),
        ("INTEGER", Integer),
        ("INT UNSIGNED", Integer),
        ("INTEGER UNSIGNED", Integer),
        ("BIGINT", Integer),
        ("BIGINT UNSIGNED", Integer),
        ("FLOAT", Float),
        ("DOUBLE", Float),
        ("DOUBLE PRECISION", Float),
        ("DECIMAL", Decimal),
        ("NUMERIC", Decimal),
        ("NEWDECIMAL", Decimal),
        ("NULL", Null),
        ("DATE", Date),
        ("DATETIME", NaiveDatetime),
        ("TIMESTAMP", UtcDatetimeMicros),
        ("CHAR", String),
        ("CHARACTER", String),
        ("VARCHAR", String),
        ("CHARACTER VARYING", String),
        ("TEXT", String),
        ("TINYTEXT", String),
        ("MEDIUMTEXT", String),
        ("LONGTEXT", String),
        ("ENUM", String),
        ("BINARY", Binary),
        ("VARBINARY", Binary),
        ("TINYBLOB", Binary),
        ("BLOB", Binary),
        ("MEDIUMBLOB", Binary),
        ("LONGBLOB", Binary),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}

fn build_postgres_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("SMALLINT", Integer),
        ("INT2", Integer),
        ("INTEGER", Integer),
        ("INT", Integer),
        ("INT4", Integer),
        ("INT8", Integer),
        ("BIGINT", Integer),
        ("FLOAT4", Float),
        ("REAL", Float),
        ("FLOAT8", Float),
        ("DOUBLE PRECISION", Float),
        ("NUMERIC", Decimal),
        ("DECIMAL", Decimal),
        ("TEXT", String),
        ("NAME", String),
        ("CHARACTER VARYING", String),
        ("VARCHAR", String),
        ("CHARACTER", String),
        ("CHAR", String),
        ("BPCHAR", String),
        ("UUID", Id),
        ("BYTEA", Binary),
        ("DATE", Date),
        ("TIMESTAMP", NaiveDatetime),
        ("TIMESTAMP WITHOUT TIME ZONE", NaiveDatetime),
        ("TIMESTAMP WITH TIME ZONE", UtcDatetimeMicros),
        ("TIMESTAMPTZ", UtcDatetimeMicros),
        ("NULL", Null),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}
