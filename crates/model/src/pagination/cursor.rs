//! Opaque cursor codec: typed boundary values to and from URL-safe strings.

use crate::core::{data_type::DataType, value::Value};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Wire representation of one cursor position.
///
/// A closed set on purpose: decoding never resolves foreign types and never
/// goes through `deserialize_any`, so a hostile cursor can at worst fail to
/// decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
enum Packed {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("cursor is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cursor payload is not decodable: {0}")]
    Binary(#[from] bincode::Error),

    #[error("cursor holds {got} values, expected {expected}")]
    Length { got: usize, expected: usize },

    #[error("cursor value at position {0} does not fit its field type")]
    Value(usize),
}

/// Encodes one `(type, value)` pair per sort field into an opaque,
/// URL-safe, unpadded base64 string.
pub fn encode(pairs: &[(DataType, Value)]) -> Result<String, CursorError> {
    let packed: Vec<Packed> = pairs.iter().map(|(tag, value)| pack(*tag, value)).collect();
    let bytes = bincode::serialize(&packed)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decodes a cursor against the caller's type vector. The vector comes from
/// the normalized field specs, so a length mismatch means the cursor was not
/// minted for this field list.
pub fn decode(types: &[DataType], cursor: &str) -> Result<Vec<Value>, CursorError> {
    let bytes = URL_SAFE_NO_PAD.decode(cursor)?;
    let packed: Vec<Packed> = bincode::deserialize(&bytes)?;
    if packed.len() != types.len() {
        return Err(CursorError::Length {
            got: packed.len(),
            expected: types.len(),
        });
    }
    types
        .iter()
        .zip(packed)
        .enumerate()
        .map(|(position, (tag, value))| unpack(*tag, value, position))
        .collect()
}

fn pack(tag: DataType, value: &Value) -> Packed {
    match (tag, value) {
        (_, Value::Null) => Packed::Null,
        (DataType::UtcDatetimeSeconds, Value::Timestamp(ts)) => Packed::Int(ts.timestamp()),
        (DataType::UtcDatetimeMicros, Value::Timestamp(ts)) => Packed::Int(ts.timestamp_micros()),
        (DataType::Decimal, Value::Decimal(d)) => Packed::Str(d.to_string()),
        (_, Value::Int(v)) => Packed::Int(*v),
        (_, Value::Uint(v)) => Packed::Uint(*v),
        (_, Value::Float(v)) => Packed::Float(*v),
        (_, Value::Decimal(d)) => Packed::Str(d.to_string()),
        (_, Value::String(s)) => Packed::Str(s.clone()),
        (_, Value::Boolean(b)) => Packed::Bool(*b),
        (_, Value::Uuid(u)) => Packed::Uuid(*u),
        (_, Value::Bytes(b)) => Packed::Bytes(b.clone()),
        (_, Value::Date(d)) => Packed::Date(*d),
        // A UTC timestamp under a non-temporal tag still travels as micros.
        (_, Value::Timestamp(ts)) => Packed::Int(ts.timestamp_micros()),
        (_, Value::TimestampNaive(ts)) => Packed::DateTime(*ts),
    }
}

fn unpack(tag: DataType, packed: Packed, position: usize) -> Result<Value, CursorError> {
    let value = match (tag, packed) {
        (_, Packed::Null) => Value::Null,
        (DataType::UtcDatetimeSeconds, Packed::Int(secs)) => Value::Timestamp(
            DateTime::from_timestamp(secs, 0).ok_or(CursorError::Value(position))?,
        ),
        (DataType::UtcDatetimeMicros, Packed::Int(micros)) => Value::Timestamp(
            DateTime::from_timestamp_micros(micros).ok_or(CursorError::Value(position))?,
        ),
        (DataType::Decimal, Packed::Str(s)) => {
            Value::Decimal(BigDecimal::from_str(&s).map_err(|_| CursorError::Value(position))?)
        }
        (_, Packed::Int(v)) => Value::Int(v),
        (_, Packed::Uint(v)) => Value::Uint(v),
        (_, Packed::Float(v)) => Value::Float(v),
        (_, Packed::Str(s)) => Value::String(s),
        (_, Packed::Bool(b)) => Value::Boolean(b),
        (_, Packed::Uuid(u)) => Value::Uuid(u),
        (_, Packed::Bytes(b)) => Value::Bytes(b),
        (_, Packed::Date(d)) => Value::Date(d),
        (_, Packed::DateTime(ts)) => Value::TimestampNaive(ts),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{CursorError, decode, encode};
    use crate::core::{data_type::DataType, value::Value};
    use bigdecimal::BigDecimal;
    use chrono::{DateTime, Utc};
    use std::str::FromStr;
    use uuid::Uuid;

    fn ts(secs: i64, micros: u32) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, micros * 1_000).unwrap()
    }

    #[test]
    fn test_round_trip_scalar_values() {
        let pairs = vec![
            (DataType::Integer, Value::Int(-42)),
            (DataType::String, Value::String("pending".to_string())),
            (DataType::Boolean, Value::Boolean(true)),
            (DataType::Float, Value::Float(13.5)),
            (DataType::Binary, Value::Bytes(vec![0, 1, 255])),
            (DataType::Id, Value::Uuid(Uuid::from_u128(7))),
        ];
        let cursor = encode(&pairs).unwrap();
        let types: Vec<_> = pairs.iter().map(|(t, _)| *t).collect();
        let values: Vec<_> = pairs.into_iter().map(|(_, v)| v).collect();
        assert_eq!(decode(&types, &cursor).unwrap(), values);
    }

    #[test]
    fn test_round_trip_decimal_keeps_precision() {
        let amount = BigDecimal::from_str("1234.5600").unwrap();
        let cursor = encode(&[(DataType::Decimal, Value::Decimal(amount.clone()))]).unwrap();
        assert_eq!(
            decode(&[DataType::Decimal], &cursor).unwrap(),
            vec![Value::Decimal(amount)]
        );
    }

    #[test]
    fn test_round_trip_micros_timestamp() {
        let charged_at = ts(1_700_000_000, 123_456);
        let cursor = encode(&[(
            DataType::UtcDatetimeMicros,
            Value::Timestamp(charged_at),
        )])
        .unwrap();
        assert_eq!(
            decode(&[DataType::UtcDatetimeMicros], &cursor).unwrap(),
            vec![Value::Timestamp(charged_at)]
        );
    }

    #[test]
    fn test_seconds_tag_truncates_to_seconds() {
        let charged_at = ts(1_700_000_000, 123_456);
        let cursor = encode(&[(
            DataType::UtcDatetimeSeconds,
            Value::Timestamp(charged_at),
        )])
        .unwrap();
        assert_eq!(
            decode(&[DataType::UtcDatetimeSeconds], &cursor).unwrap(),
            vec![Value::Timestamp(ts(1_700_000_000, 0))]
        );
    }

    #[test]
    fn test_null_round_trips_under_any_tag() {
        let pairs = vec![
            (DataType::UtcDatetimeMicros, Value::Null),
            (DataType::Integer, Value::Int(3)),
        ];
        let cursor = encode(&pairs).unwrap();
        assert_eq!(
            decode(&[DataType::UtcDatetimeMicros, DataType::Integer], &cursor).unwrap(),
            vec![Value::Null, Value::Int(3)]
        );
    }

    #[test]
    fn test_empty_tuple_is_distinct_from_no_cursor() {
        let cursor = encode(&[]).unwrap();
        assert!(!cursor.is_empty());
        assert_eq!(decode(&[], &cursor).unwrap(), vec![]);
    }

    #[test]
    fn test_rejects_invalid_base64() {
        assert!(matches!(
            decode(&[DataType::Integer], "not%valid"),
            Err(CursorError::Base64(_))
        ));
    }

    #[test]
    fn test_rejects_garbage_payload() {
        use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
        let garbage = URL_SAFE_NO_PAD.encode([0xff, 0xff, 0xff, 0xff, 0xff]);
        assert!(decode(&[DataType::Integer], &garbage).is_err());
    }

    #[test]
    fn test_rejects_arity_mismatch() {
        let cursor = encode(&[(DataType::Integer, Value::Int(1))]).unwrap();
        assert!(matches!(
            decode(&[DataType::Integer, DataType::Integer], &cursor),
            Err(CursorError::Length {
                got: 1,
                expected: 2
            })
        ));
    }
}
