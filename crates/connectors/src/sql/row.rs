//! Driver-agnostic row decoding into the engine's typed row model.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use model::core::{
    data_type::DataType,
    value::{FieldValue, Value},
};
use model::records::row::RowData;
use sqlx::{Column, Row, TypeInfo, mysql::MySqlRow, postgres::PgRow};
use tracing::warn;
use uuid::Uuid;

pub enum DbRow<'a> {
    Postgres(&'a PgRow),
    MySql(&'a MySqlRow),
}

impl DbRow<'_> {
    pub fn columns(&self) -> Vec<&str> {
        match self {
            DbRow::Postgres(row) => row.columns().iter().map(|col| col.name()).collect(),
            DbRow::MySql(row) => row.columns().iter().map(|col| col.name()).collect(),
        }
    }

    pub fn column_type(&self, name: &str) -> &str {
        match self {
            DbRow::Postgres(row) => row.column(name).type_info().name(),
            DbRow::MySql(row) => row.column(name).type_info().name(),
        }
    }

    /// Decodes the full row against the driver's reported column types.
    pub fn to_row_data(&self, entity: &str) -> RowData {
        let field_values = self
            .columns()
            .iter()
            .map(|name| {
                let type_name = self.column_type(name);
                let data_type = self.tag_for(type_name).unwrap_or_else(|| {
                    warn!(
                        column = *name,
                        db_type = type_name,
                        "unmapped column type; decoding as string"
                    );
                    DataType::String
                });
                FieldValue {
                    name: (*name).to_string(),
                    value: self.read_value(name, data_type),
                    data_type,
                }
            })
            .collect();

        RowData::new(entity, field_values)
    }

    fn tag_for(&self, type_name: &str) -> Option<DataType> {
        match self {
            DbRow::Postgres(_) => DataType::from_postgres_type(type_name),
            DbRow::MySql(_) => DataType::from_mysql_type(type_name),
        }
    }

    fn read_value(&self, name: &str, data_type: DataType) -> Option<Value> {
        match data_type {
            DataType::Id => self
                .try_get_uuid(name)
                .map(Value::Uuid)
                .or_else(|| self.try_get_i64(name).map(Value::Int)),
            DataType::Integer => self
                .try_get_i64(name)
                .map(Value::Int)
                .or_else(|| self.try_get_u64(name).map(Value::Uint)),
            DataType::Float => self.try_get_f64(name).map(Value::Float),
            DataType::Decimal => self.try_get_decimal(name).map(Value::Decimal),
            DataType::String => self.try_get_string(name).map(Value::String),
            DataType::Boolean => self.try_get_bool(name).map(Value::Boolean),
            DataType::Binary => self.try_get_bytes(name).map(Value::Bytes),
            DataType::Date => self.try_get_date(name).map(Value::Date),
            DataType::NaiveDatetime => self.try_get_naive(name).map(Value::TimestampNaive),
            DataType::UtcDatetimeSeconds | DataType::UtcDatetimeMicros => {
                self.try_get_timestamp(name).map(Value::Timestamp)
            }
            DataType::Null => None,
        }
    }

    fn try_get_i64(&self, name: &str) -> Option<i64> {
        match self {
            DbRow::Postgres(row) => row.try_get::<Option<i64>, _>(name).ok().flatten(),
            DbRow::MySql(row) => row.try_get::<Option<i64>, _>(name).ok().flatten(),
        }
    }

    fn try_get_u64(&self, name: &str) -> Option<u64> {
        match self {
            DbRow::Postgres(row) => row
                .try_get::<Option<i64>, _>(name)
                .ok()
                .flatten()
                .and_then(|v| u64::try_from(v).ok()),
            DbRow::MySql(row) => row.try_get::<Option<u64>, _>(name).ok().flatten(),
        }
    }

    fn try_get_f64(&self, name: &str) -> Option<f64> {
        match self {
            DbRow::Postgres(row) => row.try_get::<Option<f64>, _>(name).ok().flatten(),
            DbRow::MySql(row) => row.try_get::<Option<f64>, _>(name).ok().flatten(),
        }
    }

    fn try_get_string(&self, name: &str) -> Option<String> {
        match self {
            DbRow::Postgres(row) => row.try_get::<Option<String>, _>(name).ok().flatten(),
            DbRow::MySql(row) => row.try_get::<Option<String>, _>(name).ok().flatten(),
        }
    }

    fn try_get_bool(&self, name: &str) -> Option<bool> {
        match self {
            DbRow::Postgres(row) => row.try_get::<Option<bool>, _>(name).ok().flatten(),
            DbRow::MySql(row) => row.try_get::<Option<bool>, _>(name).ok().flatten(),
        }
    }

    fn try_get_bytes(&self, name: &str) -> Option<Vec<u8>> {
        match self {
            DbRow::Postgres(row) => row.try_get::<Option<Vec<u8>>, _>(name).ok().flatten(),
            DbRow::MySql(row) => row.try_get::<Option<Vec<u8>>, _>(name).ok().flatten(),
        }
    }

    fn try_get_decimal(&self, name: &str) -> Option<BigDecimal> {
        match self {
            DbRow::Postgres(row) => row.try_get::<Option<BigDecimal>, _>(name).ok().flatten(),
            DbRow::MySql(row) => row.try_get::<Option<BigDecimal>, _>(name).ok().flatten(),
        }
    }

    fn try_get_timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        match self {
            DbRow::Postgres(row) => row
                .try_get::<Option<DateTime<Utc>>, _>(name)
                .ok()
                .flatten(),
            DbRow::MySql(row) => row
                .try_get::<Option<DateTime<Utc>>, _>(name)
                .ok()
                .flatten(),
        }
    }

    fn try_get_naive(&self, name: &str) -> Option<NaiveDateTime> {
        match self {
            DbRow::Postgres(row) => row
                .try_get::<Option<NaiveDateTime>, _>(name)
                .ok()
                .flatten(),
            DbRow::MySql(row) => row
                .try_get::<Option<NaiveDateTime>, _>(name)
                .ok()
                .flatten(),
        }
    }

    fn try_get_date(&self, name: &str) -> Option<NaiveDate> {
        match self {
            DbRow::Postgres(row) => row.try_get::<Option<NaiveDate>, _>(name).ok().flatten(),
            DbRow::MySql(row) => row.try_get::<Option<NaiveDate>, _>(name).ok().flatten(),
        }
    }

    fn try_get_uuid(&self, name: &str) -> Option<Uuid> {
        match self {
            DbRow::Postgres(row) => row.try_get::<Option<Uuid>, _>(name).ok().flatten(),
            // MySQL has no native uuid column type; Id columns decode as
            // integers there.
            DbRow::MySql(_) => None,
        }
    }
}
